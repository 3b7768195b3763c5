//! Input loading: reads each header once and parses it.

use crate::error::{Error, Result};
use crate::fragment::Fragment;
use std::path::Path;
use tracing::debug;

/// Read and parse every path. The identity of each fragment is the path as
/// given; nothing is canonicalized.
pub fn load_fragments<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Fragment>> {
    paths.iter().map(|p| load_fragment(p.as_ref())).collect()
}

/// Read and parse a single header.
pub fn load_fragment(path: &Path) -> Result<Fragment> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    debug!(path = %path.display(), bytes = text.len(), "Loaded header");
    Ok(Fragment::parse(identity_of(path), text))
}

/// Identity string for a path, with `/` separators on every platform.
pub fn identity_of(path: &Path) -> String {
    let identity = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        identity.into_owned()
    } else {
        identity.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
