//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist before writing.

use std::{fs, io, path::Path};

use tracing::info;

/// Create the directory holding `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            info!(dir = %dir.display(), "creating storage directory");
            fs::create_dir_all(dir)
        }
        _ => Ok(()),
    }
}
