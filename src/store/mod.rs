//! In-memory allowlist store
//!
//! [`AllowListStore`] owns the ordered entry collection, the enforcement
//! flag, and the rejection message. It is a plain data structure with no
//! locking or persistence of its own; [`persist::AllowListFile`] handles the
//! file and [`shared::SharedAllowList`] combines the two behind one lock.
//!
//! The store doubles as the persisted document: serde renames keep the
//! original `enabled` / `allowList` / `removalReason` wire format.

pub mod persist;
pub mod shared;

pub use persist::{AllowListFile, DEFAULT_FILE_NAME, LoadOutcome};
pub use shared::SharedAllowList;

use crate::entry::AllowEntry;
use crate::host::Identity;
use serde::{Deserialize, Serialize};

/// Default user-visible message shown to rejected players
pub const DEFAULT_REMOVAL_REASON: &str = "You are not on the allowlist.";

fn default_removal_reason() -> String {
    DEFAULT_REMOVAL_REASON.to_string()
}

/// Ordered allowlist plus enforcement flag and rejection message.
///
/// Entries keep insertion order (significant only for deterministic
/// listing) and are never deduplicated: an identity is allowed if ANY entry
/// matches, so duplicates are harmless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowListStore<E> {
    /// Whether the allowlist is enforced at join time. Off by default.
    #[serde(default)]
    enabled: bool,

    #[serde(rename = "allowList", default = "Vec::new")]
    entries: Vec<E>,

    #[serde(rename = "removalReason", default = "default_removal_reason")]
    removal_reason: String,
}

impl<E> Default for AllowListStore<E> {
    fn default() -> Self {
        Self {
            enabled: false,
            entries: Vec::new(),
            removal_reason: default_removal_reason(),
        }
    }
}

impl<E: AllowEntry> AllowListStore<E> {
    /// Empty, disabled store with the default rejection message
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the enforcement flag. No validation; enabling an empty list is
    /// legal and rejects everyone without a bypass capability.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn removal_reason(&self) -> &str {
        &self.removal_reason
    }

    pub fn set_removal_reason(&mut self, reason: impl Into<String>) {
        self.removal_reason = reason.into();
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry. Never deduplicates; always succeeds.
    pub fn add(&mut self, entry: E) {
        self.entries.push(entry);
    }

    /// Remove every stored entry that matches `entry` in entry-to-entry
    /// mode. Returns the count removed; zero is a normal outcome.
    pub fn remove_all_matching(&mut self, entry: &E) -> usize {
        let before = self.entries.len();
        self.entries.retain(|existing| !existing.matches_entry(entry));
        before - self.entries.len()
    }

    /// Shape-specific removal shortcut, see
    /// [`AllowEntry::matches_identifier`]. Returns the count removed.
    pub fn remove_by_identifier(&mut self, value: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|existing| !existing.matches_identifier(value));
        before - self.entries.len()
    }

    /// Whether any entry matches the identity.
    ///
    /// Only meaningful while the list is enforced; the gate admits everyone
    /// without consulting this when `enabled` is false.
    pub fn is_allowed(&self, identity: &Identity) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.matches_identity(identity))
    }

    /// Newline-joined rendering of all entries in insertion order.
    /// `None` signals an empty list, distinct from an empty rendering.
    pub fn list_as_text(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        Some(
            self.entries
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    /// How many entries match every identity
    pub fn unconditional_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.is_unconditional())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{FieldKind, PatternEntry, TypedEntry};

    #[test]
    fn test_new_store_is_empty_and_disabled() {
        let store: AllowListStore<PatternEntry> = AllowListStore::new();
        assert!(!store.enabled());
        assert!(store.is_empty());
        assert_eq!(store.removal_reason(), DEFAULT_REMOVAL_REASON);
    }

    #[test]
    fn test_add_keeps_duplicates() {
        let mut store = AllowListStore::new();
        store.add(PatternEntry::named("Alice"));
        store.add(PatternEntry::named("Alice"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_all_matching_is_reflexive() {
        let mut store = AllowListStore::new();
        let entry = PatternEntry::new(Some("1.2.3.4".into()), Some("Alice".into()), None);
        store.add(entry.clone());
        assert!(store.remove_all_matching(&entry) >= 1);
    }

    #[test]
    fn test_remove_all_matching_counts_every_match() {
        let mut store = AllowListStore::new();
        store.add(TypedEntry::new(FieldKind::Name, "Alice"));
        store.add(TypedEntry::new(FieldKind::Name, "Alice"));
        store.add(TypedEntry::new(FieldKind::Name, "Bob"));

        let removed = store.remove_all_matching(&TypedEntry::new(FieldKind::Name, "Alice"));
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_zero_removals_leave_entries_untouched() {
        let mut store = AllowListStore::new();
        store.add(PatternEntry::named("Alice"));
        let before = store.clone();

        assert_eq!(store.remove_by_identifier("Bob"), 0);
        assert_eq!(store, before);
    }

    #[test]
    fn test_is_allowed_any_entry_suffices() {
        let mut store = AllowListStore::new();
        store.add(PatternEntry::named("Alice"));
        store.add(PatternEntry::new(Some("5.6.7.8".into()), None, None));

        assert!(store.is_allowed(&crate::host::Identity::named("Alice")));
        assert!(!store.is_allowed(&crate::host::Identity::named("Bob")));
    }

    #[test]
    fn test_list_as_text_preserves_insertion_order() {
        let mut store = AllowListStore::new();
        assert_eq!(store.list_as_text(), None);

        store.add(TypedEntry::new(FieldKind::Name, "Alice"));
        store.add(TypedEntry::new(FieldKind::Ip, "1.2.3.4"));
        assert_eq!(store.list_as_text().unwrap(), "name Alice\nip 1.2.3.4");
    }

    #[test]
    fn test_unconditional_count() {
        let mut store = AllowListStore::new();
        store.add(PatternEntry::named("Alice"));
        assert_eq!(store.unconditional_count(), 0);
        store.add(PatternEntry::default());
        assert_eq!(store.unconditional_count(), 1);
    }

    #[test]
    fn test_partial_document_deserializes_with_defaults() {
        let store: AllowListStore<PatternEntry> = serde_json::from_str("{}").unwrap();
        assert!(!store.enabled());
        assert!(store.is_empty());
        assert_eq!(store.removal_reason(), DEFAULT_REMOVAL_REASON);
    }
}
