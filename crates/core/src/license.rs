//! License header placed at the top of every assembled file.

/// The license this tool ships under, one line per entry, without comment markers.
pub const EMBEDDED_LICENSE: &[&str] = &[
    "Copyright 2022 Google LLC",
    "",
    "Licensed under the Apache License, Version 2.0 (the \"License\");",
    "you may not use this file except in compliance with the License.",
    "You may obtain a copy of the License at",
    "",
    "     http://www.apache.org/licenses/LICENSE-2.0",
    "",
    "Unless required by applicable law or agreed to in writing, software",
    "distributed under the License is distributed on an \"AS IS\" BASIS,",
    "WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.",
    "See the License for the specific language governing permissions and",
    "limitations under the License.",
];

/// License text rendered as `//` comment lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    lines: Vec<String>,
}

impl License {
    /// Build from plain text lines. Trailing blank lines are dropped.
    pub fn from_plain_text(text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(comment).collect();
        while lines.last().is_some_and(|l| l == "//") {
            lines.pop();
        }
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Default for License {
    fn default() -> Self {
        Self {
            lines: EMBEDDED_LICENSE.iter().map(|l| comment(l)).collect(),
        }
    }
}

fn comment(line: &str) -> String {
    let line = line.trim_end();
    if line.is_empty() {
        "//".to_string()
    } else {
        format!("// {line}")
    }
}
