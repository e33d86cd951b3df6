use super::exit_code::ExitStatus;
use super::metadata::MetadataBuilder;
use super::resolver;
use super::{FileOutcome, FileStatus, IncludeRequest, OperationResult};
use crate::error::RecentsError;
use crate::fs::FileSystem;
use crate::registry::RegistryGateway;
use tracing::{debug, info, warn};

/// Registers a batch of files, one at a time in request order
#[derive(Debug)]
pub struct IncludeOperation<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    metadata: &'a MetadataBuilder,
}

impl<'a, F: FileSystem + ?Sized> IncludeOperation<'a, F> {
    pub fn new(fs: &'a F, metadata: &'a MetadataBuilder) -> Self {
        Self { fs, metadata }
    }

    /// Runs the batch. Failures are recorded per file and never stop the
    /// remaining paths from being processed.
    pub fn run<R: RegistryGateway + ?Sized>(
        &self,
        req: &IncludeRequest,
        gateway: &mut R,
    ) -> OperationResult {
        let per_file: Vec<FileStatus> = req
            .paths
            .iter()
            .map(|raw| self.include_one(raw, req.touch, gateway))
            .collect();

        let attempted = per_file.len();
        let succeeded = per_file
            .iter()
            .filter(|status| status.outcome.is_registered())
            .count();

        info!(attempted, succeeded, "include finished");

        OperationResult {
            attempted,
            succeeded,
            exit_status: ExitStatus::for_include(attempted, succeeded),
            per_file,
            clear_state: None,
        }
    }

    fn include_one<R: RegistryGateway + ?Sized>(
        &self,
        raw: &str,
        touch: bool,
        gateway: &mut R,
    ) -> FileStatus {
        let canonical = match resolver::resolve(self.fs, raw) {
            Ok(path) => path,
            Err(e) => {
                debug!(path = raw, error = %e, "could not resolve");
                let outcome = match e {
                    RecentsError::NotFound(_) => FileOutcome::NotFound,
                    RecentsError::Resolution { source, .. } => {
                        FileOutcome::ResolutionFailed(source.to_string())
                    }
                    other => FileOutcome::ResolutionFailed(other.to_string()),
                };
                return FileStatus {
                    path: raw.to_string(),
                    resolved: None,
                    outcome,
                };
            }
        };

        let entry = self.metadata.build(self.fs, &canonical);
        let outcome = match gateway.upsert(entry) {
            Err(e) => {
                warn!(path = %canonical.display(), error = %e, "registry rejected entry");
                FileOutcome::RegistryWriteFailed(e.to_string())
            }
            Ok(upserted) => {
                debug!(path = %canonical.display(), ?upserted, "registered");
                match touch.then(|| self.fs.touch(&canonical)) {
                    Some(Err(e)) => {
                        warn!(path = %canonical.display(), error = %e, "touch failed");
                        FileOutcome::TouchFailed(e.to_string())
                    }
                    _ => FileOutcome::Added,
                }
            }
        };

        FileStatus {
            path: raw.to_string(),
            resolved: Some(canonical),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecentEntry;
    use crate::error::Result;
    use crate::fs::RealFileSystem;
    use crate::registry::{MemoryRegistry, Upserted};
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Host filesystem whose touch always fails
    struct NoTouch;

    impl FileSystem for NoTouch {
        fn entry_exists(&self, path: &Path) -> io::Result<bool> {
            RealFileSystem.entry_exists(path)
        }

        fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
            RealFileSystem.canonicalize(path)
        }

        fn touch(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }

        fn sniff_mime(&self, path: &Path) -> Option<String> {
            RealFileSystem.sniff_mime(path)
        }
    }

    /// Registry that rejects every write
    struct ReadOnlyRegistry;

    impl RegistryGateway for ReadOnlyRegistry {
        fn upsert(&mut self, _entry: RecentEntry) -> Result<Upserted> {
            Err(RecentsError::RegistryWrite("read-only".to_string()))
        }

        fn purge_all(&mut self) -> Result<usize> {
            Err(RecentsError::RegistryWrite("read-only".to_string()))
        }

        fn exists(&mut self, _uri: &str) -> Result<bool> {
            Ok(false)
        }
    }

    fn write_file(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, b"content").unwrap();
        path.to_str().unwrap().to_string()
    }

    fn request(paths: Vec<String>, touch: bool) -> IncludeRequest {
        IncludeRequest::new(paths, touch, true).unwrap()
    }

    #[test]
    fn test_all_files_registered() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_file(&temp_dir, "a.txt");
        let b = write_file(&temp_dir, "b.txt");

        let builder = MetadataBuilder::new();
        let op = IncludeOperation::new(&RealFileSystem, &builder);
        let mut registry = MemoryRegistry::new();
        let result = op.run(&request(vec![a, b], false), &mut registry);

        assert_eq!(result.attempted, 2);
        assert_eq!(result.succeeded, 2);
        assert_eq!(result.exit_status, ExitStatus::Success);
        assert_eq!(result.exit_code(), 0);
        assert_eq!(registry.len(), 2);
        assert!(result.clear_state.is_none());
    }

    #[test]
    fn test_missing_file_does_not_stop_batch() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_file(&temp_dir, "a.txt");
        let missing = temp_dir.path().join("missing").to_str().unwrap().to_string();
        let b = write_file(&temp_dir, "b.txt");

        let builder = MetadataBuilder::new();
        let op = IncludeOperation::new(&RealFileSystem, &builder);
        let mut registry = MemoryRegistry::new();
        let result = op.run(&request(vec![a, missing.clone(), b], false), &mut registry);

        assert_eq!(result.attempted, 3);
        assert_eq!(result.succeeded, 2);
        assert_eq!(result.exit_code(), 100);
        assert_eq!(result.per_file[1].path, missing);
        assert_eq!(result.per_file[1].outcome, FileOutcome::NotFound);
        assert!(result.per_file[1].resolved.is_none());
        assert_eq!(result.per_file[2].outcome, FileOutcome::Added);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicates_collapse_to_one_entry() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_file(&temp_dir, "a.txt");

        let builder = MetadataBuilder::new();
        let op = IncludeOperation::new(&RealFileSystem, &builder);
        let mut registry = MemoryRegistry::new();
        let result = op.run(&request(vec![a.clone(), a], false), &mut registry);

        assert_eq!(result.attempted, 2);
        assert_eq!(result.succeeded, 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_touch_failure_still_counts_as_success() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_file(&temp_dir, "a.txt");

        let builder = MetadataBuilder::new();
        let op = IncludeOperation::new(&NoTouch, &builder);
        let mut registry = MemoryRegistry::new();
        let result = op.run(&request(vec![a], true), &mut registry);

        assert_eq!(result.succeeded, 1);
        assert_eq!(result.exit_status, ExitStatus::Success);
        assert!(matches!(result.per_file[0].outcome, FileOutcome::TouchFailed(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_touch_not_attempted_without_flag() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_file(&temp_dir, "a.txt");

        let builder = MetadataBuilder::new();
        let op = IncludeOperation::new(&NoTouch, &builder);
        let mut registry = MemoryRegistry::new();
        let result = op.run(&request(vec![a], false), &mut registry);

        assert_eq!(result.per_file[0].outcome, FileOutcome::Added);
    }

    #[test]
    fn test_registry_write_failure_is_per_file() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_file(&temp_dir, "a.txt");
        let b = write_file(&temp_dir, "b.txt");

        let builder = MetadataBuilder::new();
        let op = IncludeOperation::new(&RealFileSystem, &builder);
        let result = op.run(&request(vec![a, b], false), &mut ReadOnlyRegistry);

        assert_eq!(result.attempted, 2);
        assert_eq!(result.succeeded, 0);
        assert_eq!(result.exit_status, ExitStatus::PartialFailure);
        assert!(result
            .per_file
            .iter()
            .all(|s| matches!(s.outcome, FileOutcome::RegistryWriteFailed(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_resolution_failure() {
        let temp_dir = TempDir::new().unwrap();
        let link = temp_dir.path().join("dangling");
        std::os::unix::fs::symlink(temp_dir.path().join("gone"), &link).unwrap();

        let builder = MetadataBuilder::new();
        let op = IncludeOperation::new(&RealFileSystem, &builder);
        let mut registry = MemoryRegistry::new();
        let result = op.run(
            &request(vec![link.to_str().unwrap().to_string()], false),
            &mut registry,
        );

        assert!(matches!(
            result.per_file[0].outcome,
            FileOutcome::ResolutionFailed(_)
        ));
        assert!(registry.is_empty());
        assert_eq!(result.exit_code(), 100);
    }
}
