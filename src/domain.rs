//! Core data model for registering recently used files

pub mod clear;
pub mod exit_code;
pub mod include;
pub mod metadata;
pub mod resolver;

use crate::error::{RecentsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

pub use clear::{ClearOperation, ClearState};
pub use exit_code::ExitStatus;
pub use include::IncludeOperation;
pub use metadata::MetadataBuilder;

/// Content type used when detection fails or is inconclusive
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Identity under which this tool registers files
pub const APP_NAME: &str = "recents";
pub const APP_EXEC: &str = "recents";

/// One record destined for the registry.
///
/// `uri` is the unique key: it is derived from the canonical absolute path,
/// so the same file reached through different relative paths always maps to
/// the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub uri: String,
    pub display_name: String,
    pub mime_type: String,
    pub app_name: String,
    pub app_exec: String,
    #[serde(default)]
    pub groups: BTreeSet<String>,
    #[serde(default)]
    pub is_private: bool,
}

/// Files to register, in the order they were given
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeRequest {
    pub paths: Vec<String>,
    /// Update the modification time of each registered file
    pub touch: bool,
    pub quiet: bool,
}

impl IncludeRequest {
    /// Builds a request, rejecting an empty path list before anything touches the registry
    pub fn new(paths: Vec<String>, touch: bool, quiet: bool) -> Result<Self> {
        if paths.is_empty() {
            return Err(RecentsError::Configuration(
                "No files specified".to_string(),
            ));
        }

        Ok(Self {
            paths,
            touch,
            quiet,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearRequest {
    /// Skip the confirmation prompt
    pub force: bool,
    pub quiet: bool,
}

/// What happened to a single requested path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Registered (newly or again)
    Added,
    /// Registered, but updating the modification time failed
    TouchFailed(String),
    /// Nothing exists at the requested path
    NotFound,
    /// The path exists but could not be canonicalized
    ResolutionFailed(String),
    /// The registry store rejected the entry
    RegistryWriteFailed(String),
}

impl FileOutcome {
    /// True when the file ended up in the registry
    pub fn is_registered(&self) -> bool {
        matches!(self, FileOutcome::Added | FileOutcome::TouchFailed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// The path exactly as requested
    pub path: String,
    /// Canonical path, when resolution succeeded
    pub resolved: Option<PathBuf>,
    pub outcome: FileOutcome,
}

/// Aggregate result of one operation, consumed by the CLI for reporting and exit status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    pub attempted: usize,
    pub succeeded: usize,
    pub exit_status: ExitStatus,
    pub per_file: Vec<FileStatus>,
    /// Terminal state of a clear operation; `None` for includes
    pub clear_state: Option<ClearState>,
}

impl OperationResult {
    pub fn exit_code(&self) -> i32 {
        self.exit_status.code()
    }
}
