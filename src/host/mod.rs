//! Host boundary
//!
//! Types and traits at the seam between this crate and the embedding game
//! server: the identity attributes of a connected player, the privileged
//! capabilities that bypass the allowlist, and the operations the host must
//! provide (capability queries, connection termination, and live player
//! lookup for command-time entry construction).
//!
//! Identities are trusted as supplied by the host; this crate performs no
//! authentication of its own.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity attributes for a connecting player, as supplied by the host.
///
/// Any subset of fields may be absent. Absent fields are valid match inputs,
/// never errors: a pattern wildcard matches them, an exact field test fails
/// against them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// Network address, e.g. "1.2.3.4"
    pub address: Option<String>,
    /// Display name of the character
    pub display_name: Option<String>,
    /// Session identifier (client UUID)
    pub session_id: Option<String>,
}

impl Identity {
    pub fn new(
        address: Option<String>,
        display_name: Option<String>,
        session_id: Option<String>,
    ) -> Self {
        Self {
            address,
            display_name,
            session_id,
        }
    }

    /// Identity known only by display name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            display_name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "address={} name={} session={}",
            self.address.as_deref().unwrap_or("-"),
            self.display_name.as_deref().unwrap_or("-"),
            self.session_id.as_deref().unwrap_or("-"),
        )
    }
}

/// Privileged roles that exempt a connecting identity from the allowlist
/// check entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    WhitelistExempt,
    Ban,
    Kick,
    KickImmune,
}

impl Capability {
    /// Get the capability name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::WhitelistExempt => "whitelist-exempt",
            Capability::Ban => "ban",
            Capability::Kick => "kick",
            Capability::KickImmune => "kick-immune",
        }
    }

    /// Try to parse a capability from a string
    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "whitelist-exempt" => Some(Capability::WhitelistExempt),
            "ban" => Some(Capability::Ban),
            "kick" => Some(Capability::Kick),
            "kick-immune" => Some(Capability::KickImmune),
            _ => None,
        }
    }

    /// Get all capabilities
    pub fn all() -> &'static [Capability] {
        &[
            Capability::WhitelistExempt,
            Capability::Ban,
            Capability::Kick,
            Capability::KickImmune,
        ]
    }

    /// The default bypass set: every privileged role exempts its holder
    pub fn default_bypass_set() -> Vec<Capability> {
        Self::all().to_vec()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Host-side operations the gate needs at join time.
pub trait HostActions: Send + Sync {
    /// Whether the identity holds any of the given capabilities
    fn has_any_capability(&self, identity: &Identity, capabilities: &[Capability]) -> bool;

    /// Terminate the connection with a user-visible reason
    fn terminate(&self, identity: &Identity, reason: &str);
}

/// Lookup of currently connected players by display name.
///
/// Used when an entry is built from a live player, e.g.
/// `allowlist add ip Logan` resolves Logan's current address.
pub trait PlayerRegistry: Send + Sync {
    fn resolve(&self, name: &str) -> Option<Identity>;
}

/// Registry that never resolves anyone, for tooling that runs outside the
/// host process.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineRegistry;

impl PlayerRegistry for OfflineRegistry {
    fn resolve(&self, _name: &str) -> Option<Identity> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_roundtrip() {
        for capability in Capability::all() {
            let s = capability.as_str();
            let parsed = Capability::try_parse(s).unwrap();
            assert_eq!(*capability, parsed);
        }
    }

    #[test]
    fn test_capability_serde_tags() {
        let json = r#""whitelist-exempt""#;
        let capability: Capability = serde_json::from_str(json).unwrap();
        assert_eq!(capability, Capability::WhitelistExempt);

        let json = r#""kick-immune""#;
        let capability: Capability = serde_json::from_str(json).unwrap();
        assert_eq!(capability, Capability::KickImmune);
    }

    #[test]
    fn test_offline_registry_resolves_nothing() {
        assert!(OfflineRegistry.resolve("Logan").is_none());
    }

    #[test]
    fn test_identity_display_marks_absent_fields() {
        let identity = Identity::named("Alice");
        assert_eq!(identity.to_string(), "address=- name=Alice session=-");
    }
}
