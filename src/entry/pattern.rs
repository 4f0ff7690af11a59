//! Pattern entries
//!
//! The multi-field entry shape: any combination of address, name, and
//! session id. An unset field matches anything, including an absent field on
//! the candidate; a set field requires exact, case-sensitive equality. The
//! match is the AND of the three field tests.

use crate::entry::AllowEntry;
use crate::error::CommandError;
use crate::host::{Identity, PlayerRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Allowlist entry matching on any combination of address, name, and
/// session id. Unset fields are wildcards.
///
/// An entry with all three fields unset matches every identity; see
/// [`AllowEntry::is_unconditional`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl PatternEntry {
    pub fn new(ip: Option<String>, name: Option<String>, uuid: Option<String>) -> Self {
        Self { ip, name, uuid }
    }

    /// Entry matching on display name only
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Entry capturing every identity attribute the host knows
    pub fn from_identity(identity: Identity) -> Self {
        Self {
            ip: identity.address,
            name: identity.display_name,
            uuid: identity.session_id,
        }
    }
}

/// An unset expected field matches anything; a set one requires the
/// candidate to carry exactly that value. Exact-vs-absent is a non-match.
fn field_matches(expected: Option<&str>, candidate: Option<&str>) -> bool {
    match expected {
        None => true,
        Some(value) => candidate == Some(value),
    }
}

impl AllowEntry for PatternEntry {
    const FILTER_KINDS: &'static [&'static str] = &["name", "ip", "uuid", "all"];

    fn from_command(
        kind: &str,
        value: &str,
        registry: &dyn PlayerRegistry,
    ) -> Result<Self, CommandError> {
        let entry = match kind {
            "name" => Self::named(value),
            "ip" | "uuid" | "all" => {
                let identity =
                    registry
                        .resolve(value)
                        .ok_or_else(|| CommandError::ResolveFailed {
                            name: value.to_string(),
                        })?;
                match kind {
                    "ip" => Self {
                        ip: identity.address,
                        ..Self::default()
                    },
                    "uuid" => Self {
                        uuid: identity.session_id,
                        ..Self::default()
                    },
                    _ => Self::from_identity(identity),
                }
            }
            other => return Err(CommandError::UnknownFilterType(other.to_string())),
        };

        // A resolved player missing the requested attribute would otherwise
        // produce an entry that matches everyone.
        if entry.is_unconditional() {
            return Err(CommandError::ResolveFailed {
                name: value.to_string(),
            });
        }

        Ok(entry)
    }

    fn matches_identity(&self, identity: &Identity) -> bool {
        field_matches(self.ip.as_deref(), identity.address.as_deref())
            && field_matches(self.name.as_deref(), identity.display_name.as_deref())
            && field_matches(self.uuid.as_deref(), identity.session_id.as_deref())
    }

    fn matches_entry(&self, other: &Self) -> bool {
        field_matches(self.ip.as_deref(), other.ip.as_deref())
            && field_matches(self.name.as_deref(), other.name.as_deref())
            && field_matches(self.uuid.as_deref(), other.uuid.as_deref())
    }

    fn matches_identifier(&self, value: &str) -> bool {
        self.name.as_deref() == Some(value)
    }

    fn is_unconditional(&self) -> bool {
        self.ip.is_none() && self.name.is_none() && self.uuid.is_none()
    }
}

impl fmt::Display for PatternEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ip={} name={} uuid={}",
            self.ip.as_deref().unwrap_or("*"),
            self.name.as_deref().unwrap_or("*"),
            self.uuid.as_deref().unwrap_or("*"),
        )
    }
}
