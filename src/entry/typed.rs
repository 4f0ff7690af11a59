//! Typed-value entries
//!
//! The single-field entry shape: one [`FieldKind`] selector plus one exact
//! value. Two typed entries match each other iff both the kind and the value
//! are equal.

use crate::entry::AllowEntry;
use crate::error::CommandError;
use crate::host::{Identity, PlayerRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which identity field a [`TypedEntry`] compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Ip,
    Name,
    Uuid,
}

impl FieldKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Ip => "ip",
            FieldKind::Name => "name",
            FieldKind::Uuid => "uuid",
        }
    }

    /// Try to parse a kind from a string
    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "ip" => Some(FieldKind::Ip),
            "name" => Some(FieldKind::Name),
            "uuid" => Some(FieldKind::Uuid),
            _ => None,
        }
    }

    /// Get all field kinds
    pub fn all() -> &'static [FieldKind] {
        &[FieldKind::Ip, FieldKind::Name, FieldKind::Uuid]
    }

    /// Select the named field from an identity
    fn select<'a>(&self, identity: &'a Identity) -> Option<&'a str> {
        match self {
            FieldKind::Ip => identity.address.as_deref(),
            FieldKind::Name => identity.display_name.as_deref(),
            FieldKind::Uuid => identity.session_id.as_deref(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Allowlist entry matching exactly one identity field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypedEntry {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub value: String,
}

impl TypedEntry {
    pub fn new(kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl AllowEntry for TypedEntry {
    const FILTER_KINDS: &'static [&'static str] = &["ip", "name", "uuid"];

    fn from_command(
        kind: &str,
        value: &str,
        _registry: &dyn PlayerRegistry,
    ) -> Result<Self, CommandError> {
        let kind = FieldKind::try_parse(kind)
            .ok_or_else(|| CommandError::UnknownFilterType(kind.to_string()))?;
        Ok(Self::new(kind, value))
    }

    fn matches_identity(&self, identity: &Identity) -> bool {
        self.kind.select(identity) == Some(self.value.as_str())
    }

    fn matches_entry(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value
    }

    fn matches_identifier(&self, value: &str) -> bool {
        self.value == value
    }
}

impl fmt::Display for TypedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::OfflineRegistry;

    fn identity() -> Identity {
        Identity::new(
            Some("1.2.3.4".into()),
            Some("Alice".into()),
            Some("xyz".into()),
        )
    }

    #[test]
    fn test_field_kind_roundtrip() {
        for kind in FieldKind::all() {
            let parsed = FieldKind::try_parse(kind.as_str()).unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn test_matches_the_selected_field_only() {
        assert!(TypedEntry::new(FieldKind::Name, "Alice").matches_identity(&identity()));
        assert!(TypedEntry::new(FieldKind::Ip, "1.2.3.4").matches_identity(&identity()));
        assert!(TypedEntry::new(FieldKind::Uuid, "xyz").matches_identity(&identity()));

        // The value exists on the identity, but under a different field.
        assert!(!TypedEntry::new(FieldKind::Ip, "Alice").matches_identity(&identity()));
    }

    #[test]
    fn test_absent_field_is_a_non_match() {
        let entry = TypedEntry::new(FieldKind::Ip, "1.2.3.4");
        assert!(!entry.matches_identity(&Identity::named("Alice")));
    }

    #[test]
    fn test_entry_matching_requires_kind_and_value() {
        let entry = TypedEntry::new(FieldKind::Name, "Alice");
        assert!(entry.matches_entry(&TypedEntry::new(FieldKind::Name, "Alice")));
        assert!(!entry.matches_entry(&TypedEntry::new(FieldKind::Uuid, "Alice")));
        assert!(!entry.matches_entry(&TypedEntry::new(FieldKind::Name, "Bob")));
    }

    #[test]
    fn test_identifier_ignores_kind() {
        assert!(TypedEntry::new(FieldKind::Ip, "Alice").matches_identifier("Alice"));
        assert!(TypedEntry::new(FieldKind::Name, "Alice").matches_identifier("Alice"));
        assert!(!TypedEntry::new(FieldKind::Name, "Alice").matches_identifier("Bob"));
    }

    #[test]
    fn test_from_command_needs_no_lookup() {
        let entry = TypedEntry::from_command("uuid", "xyz", &OfflineRegistry).unwrap();
        assert_eq!(entry, TypedEntry::new(FieldKind::Uuid, "xyz"));
    }

    #[test]
    fn test_from_command_rejects_unknown_kind() {
        let result = TypedEntry::from_command("all", "Alice", &OfflineRegistry);
        assert!(matches!(result, Err(CommandError::UnknownFilterType(_))));
    }

    #[test]
    fn test_serialized_shape() {
        let entry = TypedEntry::new(FieldKind::Name, "Alice");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"type":"name","value":"Alice"}"#);
    }
}
