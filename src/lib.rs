//! Recents - recently used files management from the terminal
//!
//! This crate provides the core of the `recents` tool: turning requested
//! paths into registry entries, registering them idempotently, and purging
//! the registry behind a confirmation prompt.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod fs;
pub mod logging;
pub mod prompt;
pub mod registry;
pub mod report;

// Re-export primary types for convenience
pub use config::UserConfig;
pub use domain::{
    ClearOperation, ClearRequest, ClearState, ExitStatus, FileOutcome, FileStatus,
    IncludeOperation, IncludeRequest, MetadataBuilder, OperationResult, RecentEntry,
};
pub use error::{RecentsError, Result};
pub use fs::{FileSystem, RealFileSystem};
pub use registry::{JsonRegistry, MemoryRegistry, RegistryGateway, Upserted};
