//! Registry gateway and the stores behind it
//!
//! [`RegistryGateway`] is the only way operations touch persisted state.
//! [`JsonRegistry`] keeps entries in a private JSON document on disk;
//! [`MemoryRegistry`] keeps them in process.

use crate::domain::RecentEntry;
use crate::error::{RecentsError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const DOCUMENT_VERSION: u32 = 1;

/// Result of a successful upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    /// No entry had this URI before
    Inserted,
    /// An entry with this URI already existed and was updated in place
    Refreshed,
}

/// Boundary to the persisted recently-used list
pub trait RegistryGateway {
    /// Inserts `entry` or updates the entry with the same URI. Never creates duplicates.
    fn upsert(&mut self, entry: RecentEntry) -> Result<Upserted>;

    /// Removes every entry, returning how many were removed
    fn purge_all(&mut self) -> Result<usize>;

    fn exists(&mut self, uri: &str) -> Result<bool>;
}

/// An entry as kept by a store, with its bookkeeping timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    #[serde(flatten)]
    pub entry: RecentEntry,
    pub added: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub visited: DateTime<Utc>,
}

impl StoredEntry {
    fn new(entry: RecentEntry, now: DateTime<Utc>) -> Self {
        Self {
            entry,
            added: now,
            modified: now,
            visited: now,
        }
    }
}

fn upsert_into(entries: &mut Vec<StoredEntry>, entry: RecentEntry, now: DateTime<Utc>) -> Upserted {
    match entries.iter_mut().find(|stored| stored.entry.uri == entry.uri) {
        Some(stored) => {
            stored.entry = entry;
            stored.modified = now;
            stored.visited = now;
            Upserted::Refreshed
        }
        None => {
            entries.push(StoredEntry::new(entry, now));
            Upserted::Inserted
        }
    }
}

/// Registry held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    entries: Vec<StoredEntry>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[StoredEntry] {
        &self.entries
    }

    pub fn get(&self, uri: &str) -> Option<&StoredEntry> {
        self.entries.iter().find(|stored| stored.entry.uri == uri)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RegistryGateway for MemoryRegistry {
    fn upsert(&mut self, entry: RecentEntry) -> Result<Upserted> {
        Ok(upsert_into(&mut self.entries, entry, Utc::now()))
    }

    fn purge_all(&mut self) -> Result<usize> {
        let removed = self.entries.len();
        self.entries.clear();
        Ok(removed)
    }

    fn exists(&mut self, uri: &str) -> Result<bool> {
        Ok(self.get(uri).is_some())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RegistryDocument {
    version: u32,
    #[serde(default)]
    entries: Vec<StoredEntry>,
}

/// Registry persisted as a JSON document
///
/// The document is read lazily on first use and written back after every
/// mutation, so entries registered earlier in a batch survive a later failure.
#[derive(Debug)]
pub struct JsonRegistry {
    path: PathBuf,
    entries: Option<Vec<StoredEntry>>,
}

impl JsonRegistry {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: None,
        }
    }

    /// Default store location (~/.local/share/recents/recently-used.json on Linux)
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("recents").join("recently-used.json"))
    }

    /// All stored entries, in registration order
    pub fn entries(&mut self) -> Result<&[StoredEntry]> {
        Ok(self.loaded()?.as_slice())
    }

    fn loaded(&mut self) -> Result<&mut Vec<StoredEntry>> {
        if self.entries.is_none() {
            self.entries = Some(read_document(&self.path)?);
        }
        match self.entries.as_mut() {
            Some(entries) => Ok(entries),
            None => Err(RecentsError::Registry("registry not loaded".to_string())),
        }
    }

    fn save(&self, entries: &[StoredEntry]) -> Result<()> {
        let document = RegistryDocument {
            version: DOCUMENT_VERSION,
            entries: entries.to_vec(),
        };
        write_document(&self.path, &document)
            .map_err(|e| RecentsError::RegistryWrite(format!("{}: {}", self.path.display(), e)))
    }
}

impl RegistryGateway for JsonRegistry {
    fn upsert(&mut self, entry: RecentEntry) -> Result<Upserted> {
        let uri = entry.uri.clone();
        let mut entries = self
            .loaded()
            .map_err(|e| RecentsError::RegistryWrite(e.to_string()))?
            .clone();
        let upserted = upsert_into(&mut entries, entry, Utc::now());

        self.save(&entries)?;
        self.entries = Some(entries);
        debug!(uri = %uri, ?upserted, "registry upsert");
        Ok(upserted)
    }

    fn purge_all(&mut self) -> Result<usize> {
        if !self.path.exists() {
            self.entries = Some(Vec::new());
            return Ok(0);
        }

        // An unreadable document is still purged; only the count is lost
        let loaded = self.loaded().map(|entries| entries.len());
        let removed = match loaded {
            Ok(count) => count,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "purging unreadable registry");
                0
            }
        };

        self.save(&[])?;
        self.entries = Some(Vec::new());
        info!(path = %self.path.display(), removed, "registry purged");
        Ok(removed)
    }

    fn exists(&mut self, uri: &str) -> Result<bool> {
        Ok(self.loaded()?.iter().any(|stored| stored.entry.uri == uri))
    }
}

fn read_document(path: &Path) -> Result<Vec<StoredEntry>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(RecentsError::Registry(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let document: RegistryDocument = serde_json::from_str(&contents).map_err(|e| {
        RecentsError::Registry(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    if document.version != DOCUMENT_VERSION {
        return Err(RecentsError::Registry(format!(
            "Unsupported registry version {} in {}",
            document.version,
            path.display()
        )));
    }

    Ok(document.entries)
}

fn write_document(path: &Path, document: &RegistryDocument) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let contents = serde_json::to_string_pretty(document)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    // Write beside the target and rename so readers never see a partial document
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);

    fs::write(&staging, contents)?;
    if let Err(e) = fs::rename(&staging, path) {
        fs::remove_file(&staging).ok();
        return Err(e);
    }
    Ok(())
}
