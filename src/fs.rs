//! Filesystem primitives used while registering files

use filetime::FileTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem operations the registry manager depends on.
///
/// Abstracted so batches can be exercised against failing or scripted filesystems.
pub trait FileSystem {
    /// Whether any entry (including a dangling symlink) exists at `path`
    fn entry_exists(&self, path: &Path) -> io::Result<bool>;

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Sets access and modification time to now
    fn touch(&self, path: &Path) -> io::Result<()>;

    /// Best-effort content type; `None` when nothing could be determined
    fn sniff_mime(&self, path: &Path) -> Option<String>;
}

/// The host filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn entry_exists(&self, path: &Path) -> io::Result<bool> {
        match fs::symlink_metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn touch(&self, path: &Path) -> io::Result<()> {
        // Sets times by path; opening would block on a FIFO
        let now = FileTime::now();
        filetime::set_file_times(path, now, now)
    }

    fn sniff_mime(&self, path: &Path) -> Option<String> {
        if path.is_dir() {
            return Some("inode/directory".to_string());
        }

        // The file name decides first; magic bytes only fill in for unknown extensions
        mime_from_extension(path).map(str::to_string).or_else(|| {
            // Only regular files are read; pipes and devices would block or never end
            let regular = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
            if !regular {
                return None;
            }
            infer::get_from_path(path)
                .ok()
                .flatten()
                .map(|kind| kind.mime_type().to_string())
        })
    }
}

/// Maps well-known file extensions to content types
pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let mime = match ext.as_str() {
        "txt" | "log" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "rs" => "text/rust",
        "py" => "text/x-python",
        "c" | "h" => "text/x-csrc",
        "cpp" | "hpp" | "cc" => "text/x-c++src",
        "sh" | "bash" => "application/x-shellscript",
        "js" => "application/javascript",
        "ts" => "application/typescript",
        "json" => "application/json",
        "yaml" | "yml" => "application/yaml",
        "toml" => "application/toml",
        "xml" => "application/xml",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/vnd.microsoft.icon",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "odt" => "application/vnd.oasis.opendocument.text",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "mp4" => "video/mp4",
        "mkv" => "video/x-matroska",
        _ => return None,
    };
    Some(mime)
}
