//! Allowlist file persistence
//!
//! One JSON document per deployment shape, whole-file overwrite on save.
//! Loading distinguishes three outcomes with distinct caller-visible
//! effects:
//!
//! - missing file → [`LoadOutcome::Missing`], the caller bootstraps defaults
//!   and persists them;
//! - valid file → [`LoadOutcome::Loaded`], the caller replaces its state
//!   wholesale;
//! - malformed file → [`StoreError::Parse`]. The file is never rewritten on
//!   a parse failure, so a hand-edited document can be repaired instead of
//!   being clobbered by defaults.

use crate::entry::AllowEntry;
use crate::error::{StoreError, StoreResult};
use crate::store::AllowListStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default allowlist file name, relative to the host's configuration
/// directory
pub const DEFAULT_FILE_NAME: &str = "better-allowlist.json";

/// Result of loading the allowlist file
#[derive(Debug)]
pub enum LoadOutcome<E> {
    /// The file does not exist. Not an error: first run.
    Missing,
    /// The file parsed successfully
    Loaded(AllowListStore<E>),
}

/// Reads and writes one allowlist document at a fixed path
#[derive(Debug, Clone)]
pub struct AllowListFile {
    path: PathBuf,
}

impl AllowListFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. A parse failure leaves the file untouched.
    pub fn load<E: AllowEntry>(&self) -> StoreResult<LoadOutcome<E>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Allowlist file does not exist");
            return Ok(LoadOutcome::Missing);
        }

        let contents = fs::read_to_string(&self.path)?;
        let store = serde_json::from_str(&contents)
            .map_err(|e| StoreError::parse(self.path.display().to_string(), e.to_string()))?;

        Ok(LoadOutcome::Loaded(store))
    }

    /// Serialize and overwrite the whole file.
    ///
    /// Field order is stable (`enabled`, `allowList`, `removalReason`) and
    /// unset optional fields are omitted, keeping pattern entries compact.
    /// Callers must not invoke this from concurrent mutation paths; see
    /// [`crate::store::SharedAllowList`].
    pub fn save<E: AllowEntry>(&self, store: &AllowListStore<E>) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(store)?;
        fs::write(&self.path, json)?;
        debug!(
            path = %self.path.display(),
            entries = store.len(),
            enabled = store.enabled(),
            "Saved allowlist"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::PatternEntry;
    use tempfile::tempdir;

    fn file_in(dir: &tempfile::TempDir) -> AllowListFile {
        AllowListFile::new(dir.path().join(DEFAULT_FILE_NAME))
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let file = file_in(&dir);
        assert!(matches!(
            file.load::<PatternEntry>().unwrap(),
            LoadOutcome::Missing
        ));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let file = file_in(&dir);

        let mut store = AllowListStore::new();
        store.set_enabled(true);
        store.add(PatternEntry::named("Alice"));
        store.add(PatternEntry::new(Some("1.2.3.4".into()), None, Some("xyz".into())));
        file.save(&store).unwrap();

        match file.load::<PatternEntry>().unwrap() {
            LoadOutcome::Loaded(loaded) => assert_eq!(loaded, store),
            LoadOutcome::Missing => panic!("file should exist"),
        }
    }

    #[test]
    fn test_malformed_file_is_not_rewritten() {
        let dir = tempdir().unwrap();
        let file = file_in(&dir);
        fs::write(file.path(), "{ not json").unwrap();

        let result = file.load::<PatternEntry>();
        assert!(matches!(result, Err(StoreError::Parse { .. })));
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "{ not json");
    }

    #[test]
    fn test_saved_document_uses_original_field_names() {
        let dir = tempdir().unwrap();
        let file = file_in(&dir);

        let mut store = AllowListStore::new();
        store.add(PatternEntry::named("Alice"));
        file.save(&store).unwrap();

        let raw = fs::read_to_string(file.path()).unwrap();
        assert!(raw.contains("\"enabled\""));
        assert!(raw.contains("\"allowList\""));
        assert!(raw.contains("\"removalReason\""));
        // Unset optional fields are omitted, not encoded as null.
        assert!(!raw.contains("\"ip\""));
        assert!(!raw.contains("null"));
    }
}
