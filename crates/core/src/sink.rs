//! Output sinks for the assembled header.
//!
//! File output goes to a temporary sibling first and is renamed into place,
//! so an existing output is either fully replaced or left untouched.

use crate::error::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the assembled text is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    File(PathBuf),
}

impl OutputSink {
    /// `-` selects stdout; anything else is a file path.
    pub fn from_path(path: &Path) -> Self {
        if path == Path::new("-") {
            Self::Stdout
        } else {
            Self::File(path.to_path_buf())
        }
    }

    /// Path used in diagnostics.
    pub fn display_path(&self) -> PathBuf {
        match self {
            Self::Stdout => PathBuf::from("<stdout>"),
            Self::File(path) => path.clone(),
        }
    }

    /// Write `text` in one go.
    pub fn write(&self, text: &str) -> Result<()> {
        match self {
            Self::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(text.as_bytes())
                    .and_then(|()| stdout.flush())
                    .map_err(|e| self.write_error(e))
            }
            Self::File(path) => write_atomically(path, text).map_err(|e| self.write_error(e)),
        }
    }

    /// Current contents, or `None` if there is nothing to compare against.
    pub fn read_existing(&self) -> Result<Option<String>> {
        let Self::File(path) = self else {
            return Ok(None);
        };
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Read {
                path: path.clone(),
                reason: e.to_string(),
            }),
        }
    }

    fn write_error(&self, e: std::io::Error) -> Error {
        Error::Write {
            path: self.display_path(),
            reason: e.to_string(),
        }
    }
}

fn write_atomically(path: &Path, text: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(text.as_bytes())?;
    staged.flush()?;
    staged.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), bytes = text.len(), "Output written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_means_stdout() {
        assert_eq!(OutputSink::from_path(Path::new("-")), OutputSink::Stdout);
        assert_eq!(
            OutputSink::from_path(Path::new("cwisstable.h")),
            OutputSink::File(PathBuf::from("cwisstable.h"))
        );
    }

    #[test]
    fn file_sink_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("merged.h");
        let sink = OutputSink::File(path.clone());

        assert_eq!(sink.read_existing().unwrap(), None);
        sink.write("first\n").unwrap();
        sink.write("second\n").unwrap();
        assert_eq!(sink.read_existing().unwrap().as_deref(), Some("second\n"));

        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn stdout_has_nothing_to_compare() {
        assert_eq!(OutputSink::Stdout.read_existing().unwrap(), None);
    }
}
