//! Error types for the agglomeration pipeline.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Every error is terminal for the run; nothing in the pipeline retries.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all agglomerate operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Ordering errors ---
    #[error("dependency cycle detected among: {}", .unresolved.join(", "))]
    CycleDetected { unresolved: Vec<String> },

    #[error("no input headers given")]
    NoInputs,

    // --- I/O errors ---
    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("{path} is out of date; re-run `agglomerate build`")]
    Stale { path: PathBuf },

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a cycle error from any collection of identities, sorted so the
    /// message is stable across runs.
    pub fn cycle<I, S>(unresolved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unresolved: Vec<String> = unresolved.into_iter().map(Into::into).collect();
        unresolved.sort();
        Error::CycleDetected { unresolved }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_error_displays_correctly() {
        let err = Error::cycle(["b.h", "a.h"]);
        assert_eq!(err.to_string(), "dependency cycle detected among: a.h, b.h");
    }

    #[test]
    fn read_error_names_the_path() {
        let err = Error::Read {
            path: PathBuf::from("cwisstable/base.h"),
            reason: "No such file or directory".into(),
        };
        assert!(err.to_string().contains("cwisstable/base.h"));
        assert!(err.to_string().contains("No such file"));
    }
}
