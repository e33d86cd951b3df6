use crate::error::{RecentsError, Result};
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};

/// Resolves a requested path to its canonical, symlink-free absolute form.
///
/// Existence is checked on every call. A path with no filesystem entry yields
/// [`RecentsError::NotFound`]; a path that exists but cannot be canonicalized
/// (dangling symlink, permission denied) yields [`RecentsError::Resolution`].
pub fn resolve<F: FileSystem + ?Sized>(fs: &F, raw_path: &str) -> Result<PathBuf> {
    let path = Path::new(raw_path);

    match fs.entry_exists(path) {
        Ok(true) => {}
        Ok(false) => return Err(RecentsError::NotFound(raw_path.to_string())),
        Err(source) => {
            return Err(RecentsError::Resolution {
                path: raw_path.to_string(),
                source,
            })
        }
    }

    fs.canonicalize(path)
        .map_err(|source| RecentsError::Resolution {
            path: raw_path.to_string(),
            source,
        })
}
