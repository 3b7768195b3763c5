//! Fragment parser: turns one header's text into a structured record.
//!
//! A fragment keeps its body with the leading license comment, its own
//! include-guard boilerplate and its top-level `#include` lines stripped.
//! The guard is regenerated once for the merged output and the includes are
//! classified later by the [`IncludeGraph`](crate::graph::IncludeGraph).
//!
//! Parsing never fails: anything that does not match guard or include syntax
//! exactly is kept as ordinary body text.

use tracing::debug;

const COMMENT_PREFIX: &str = "//";
const INCLUDE_DIRECTIVE: &str = "#include";
const GUARD_OPEN: &str = "#ifndef";

/// One parsed input header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Path-like key, exactly as the caller named the file.
    pub identity: String,

    /// Original file contents.
    pub raw_text: String,

    /// Contents minus license, guard and include lines, outer whitespace trimmed.
    pub body: String,

    /// Include targets in file order, verbatim (`"a.h"` or `<stdint.h>`).
    pub includes: Vec<String>,

    /// Macro named by the first `#ifndef` after the license, if any.
    pub guard_name: Option<String>,
}

impl Fragment {
    /// Parse `raw_text` into a fragment keyed by `identity`.
    pub fn parse(identity: impl Into<String>, raw_text: impl Into<String>) -> Self {
        let identity = identity.into();
        let raw_text = raw_text.into();

        let mut in_license = true;
        let mut guard_name: Option<String> = None;
        let mut includes = Vec::new();
        let mut body = Vec::new();

        for line in raw_text.lines() {
            if in_license && line.starts_with(COMMENT_PREFIX) {
                continue;
            }
            in_license = false;

            if guard_name.is_none() && line.starts_with(GUARD_OPEN) {
                let name = line[GUARD_OPEN.len()..].trim().to_string();
                debug!(fragment = %identity, guard = %name, "Found include guard");
                guard_name = Some(name);
                continue;
            }

            if guard_name
                .as_deref()
                .is_some_and(|guard| is_guard_line(line, guard))
            {
                continue;
            }

            match line.strip_prefix(INCLUDE_DIRECTIVE) {
                Some(target) => includes.push(target.trim().to_string()),
                None => body.push(line),
            }
        }

        let body = body.join("\n").trim().to_string();

        Self {
            identity,
            raw_text,
            body,
            includes,
            guard_name,
        }
    }

    /// The include string another fragment must write to depend on this one.
    pub fn reference(&self) -> String {
        quote(&self.identity)
    }
}

/// Render an identity in the quoted form used by internal includes.
pub fn quote(identity: &str) -> String {
    format!("\"{identity}\"")
}

/// Recover the identity from a quoted include target, if it is quoted.
pub fn unquote(target: &str) -> Option<&str> {
    target.strip_prefix('"')?.strip_suffix('"')
}

fn is_guard_line(line: &str, guard: &str) -> bool {
    line.strip_prefix("#define ") == Some(guard) || line.strip_prefix("#endif  // ") == Some(guard)
}
