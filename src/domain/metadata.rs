use super::{RecentEntry, APP_EXEC, APP_NAME, DEFAULT_MIME_TYPE};
use crate::fs::FileSystem;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Builds complete registry entries for canonical paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataBuilder {
    app_name: String,
    app_exec: String,
}

impl Default for MetadataBuilder {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            app_exec: APP_EXEC.to_string(),
        }
    }
}

impl MetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers entries under a different application name
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// Describes `path`, which must already be canonical.
    ///
    /// Never fails: an undetermined content type falls back to
    /// [`DEFAULT_MIME_TYPE`].
    pub fn build<F: FileSystem + ?Sized>(&self, fs: &F, path: &Path) -> RecentEntry {
        let mime_type = normalize_mime(fs.sniff_mime(path));
        debug!(path = %path.display(), mime = %mime_type, "built entry metadata");

        RecentEntry {
            uri: file_uri(path),
            display_name: path.to_string_lossy().into_owned(),
            mime_type,
            app_name: self.app_name.clone(),
            app_exec: self.app_exec.clone(),
            groups: BTreeSet::new(),
            is_private: false,
        }
    }
}

fn normalize_mime(sniffed: Option<String>) -> String {
    match sniffed {
        Some(mime) if mime.trim().contains('/') => mime.trim().to_string(),
        _ => DEFAULT_MIME_TYPE.to_string(),
    }
}

/// Percent-encodes an absolute path into a `file://` URI.
///
/// Unreserved characters and the sub-delimiters allowed in a path segment
/// are kept verbatim; every other byte is escaped as `%XX`.
pub fn file_uri(path: &Path) -> String {
    let mut uri = String::from("file://");
    for &byte in path_bytes(path).iter() {
        if is_path_safe(byte) {
            uri.push(byte as char);
        } else {
            uri.push_str(&format!("%{:02X}", byte));
        }
    }
    uri
}

fn is_path_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'_'
                | b'.'
                | b'~'
                | b'!'
                | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
                | b':'
                | b'@'
                | b'/'
        )
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Vec<u8> {
    let normalized = path.to_string_lossy().replace('\\', "/");
    if normalized.starts_with('/') {
        normalized.into_bytes()
    } else {
        format!("/{}", normalized).into_bytes()
    }
}
