//! Shared allowlist service
//!
//! [`SharedAllowList`] combines the in-memory store with its backing file
//! behind a single lock. Every mutation and the persistence write it
//! triggers execute inside one write-lock critical section, so concurrent
//! administrator commands cannot interleave file writes (last writer wins,
//! never a torn file). Reads take the read lock and observe either the pre-
//! or post-state of a mutation atomically.
//!
//! This is the object shared, via `Arc`, between the access gate and the
//! command processor.

use crate::entry::AllowEntry;
use crate::error::StoreResult;
use crate::host::Identity;
use crate::store::persist::{AllowListFile, LoadOutcome};
use crate::store::AllowListStore;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{error, info, warn};

/// Thread-safe allowlist backed by a file
pub struct SharedAllowList<E: AllowEntry> {
    store: RwLock<AllowListStore<E>>,
    file: AllowListFile,
}

impl<E: AllowEntry> SharedAllowList<E> {
    /// Hydrate from the backing file.
    ///
    /// A missing file is first-run bootstrap: defaults are written out. A
    /// malformed file leaves the disk untouched and starts the in-memory
    /// state at explicitly-logged defaults; a later `reload` picks up the
    /// repaired file.
    pub fn bootstrap(file: AllowListFile) -> StoreResult<Self> {
        let store = match file.load::<E>() {
            Ok(LoadOutcome::Loaded(store)) => {
                info!(
                    path = %file.path().display(),
                    entries = store.len(),
                    enabled = store.enabled(),
                    "Loaded allowlist"
                );
                store
            }
            Ok(LoadOutcome::Missing) => {
                let store = AllowListStore::new();
                file.save(&store)?;
                info!(path = %file.path().display(), "Created new allowlist file");
                store
            }
            Err(err) => {
                error!(
                    path = %file.path().display(),
                    error = %err,
                    "Could not parse allowlist file; starting with defaults, file left untouched"
                );
                AllowListStore::new()
            }
        };

        let shared = Self {
            store: RwLock::new(store),
            file,
        };
        shared.warn_if_unconditional();
        Ok(shared)
    }

    fn read(&self) -> RwLockReadGuard<'_, AllowListStore<E>> {
        self.store.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AllowListStore<E>> {
        self.store.write().unwrap_or_else(|e| e.into_inner())
    }

    /// The mutation has already applied in memory when this fails, so the
    /// divergence from disk is logged here and surfaced to the caller.
    fn persist(&self, store: &AllowListStore<E>) -> StoreResult<()> {
        self.file.save(store).inspect_err(|err| {
            error!(
                path = %self.file.path().display(),
                error = %err,
                "Allowlist changed in memory but could not be saved; disk is out of sync"
            );
        })
    }

    fn warn_if_unconditional(&self) {
        let count = self.read().unconditional_count();
        if count > 0 {
            warn!(
                count,
                "Allowlist contains unconditional entries that match every identity"
            );
        }
    }

    // --- reads ---

    pub fn is_enabled(&self) -> bool {
        self.read().enabled()
    }

    pub fn entry_count(&self) -> usize {
        self.read().len()
    }

    pub fn removal_reason(&self) -> String {
        self.read().removal_reason().to_string()
    }

    pub fn list_as_text(&self) -> Option<String> {
        self.read().list_as_text()
    }

    /// Join-time match check under one lock: the entry scan and the
    /// rejection reason come from the same snapshot.
    pub fn admit(&self, identity: &Identity) -> Result<(), String> {
        let store = self.read();
        if store.is_allowed(identity) {
            Ok(())
        } else {
            Err(store.removal_reason().to_string())
        }
    }

    /// Copy of the current state, for tests and diagnostics
    pub fn snapshot(&self) -> AllowListStore<E> {
        self.read().clone()
    }

    // --- mutations (each holds the write lock across mutate + save) ---

    pub fn add(&self, entry: E) -> StoreResult<()> {
        let mut store = self.write();
        if entry.is_unconditional() {
            warn!(%entry, "Adding unconditional entry; it matches every identity");
        }
        store.add(entry);
        self.persist(&store)
    }

    /// Remove every entry matching `entry`. Zero matches is a normal
    /// outcome and triggers no write.
    pub fn remove_all_matching(&self, entry: &E) -> StoreResult<usize> {
        let mut store = self.write();
        let removed = store.remove_all_matching(entry);
        if removed == 0 {
            return Ok(0);
        }
        self.persist(&store)?;
        Ok(removed)
    }

    /// Remove by the shape-specific identifier. Zero matches triggers no
    /// write.
    pub fn remove_by_identifier(&self, value: &str) -> StoreResult<usize> {
        let mut store = self.write();
        let removed = store.remove_by_identifier(value);
        if removed == 0 {
            return Ok(0);
        }
        self.persist(&store)?;
        Ok(removed)
    }

    pub fn set_enabled(&self, enabled: bool) -> StoreResult<()> {
        let mut store = self.write();
        store.set_enabled(enabled);
        self.persist(&store)
    }

    /// Replace the in-memory state from disk.
    ///
    /// A malformed file fails the reload and leaves both the in-memory
    /// entries and the on-disk file exactly as they were. A missing file is
    /// treated like first-run bootstrap: defaults are recreated and saved.
    pub fn reload(&self) -> StoreResult<()> {
        let mut store = self.write();
        match self.file.load::<E>()? {
            LoadOutcome::Loaded(loaded) => {
                info!(
                    path = %self.file.path().display(),
                    entries = loaded.len(),
                    enabled = loaded.enabled(),
                    "Reloaded allowlist"
                );
                *store = loaded;
            }
            LoadOutcome::Missing => {
                *store = AllowListStore::new();
                self.file.save(&store)?;
                info!(
                    path = %self.file.path().display(),
                    "Allowlist file was missing on reload; recreated with defaults"
                );
            }
        }
        drop(store);
        self.warn_if_unconditional();
        Ok(())
    }
}
