//! Allowlist entry shapes
//!
//! Two entry shapes exist, inherited from two generations of the persisted
//! format:
//!
//! - [`PatternEntry`] — three optional fields (`ip`, `name`, `uuid`). An
//!   unset field is a wildcard; every set field must match exactly. The
//!   conjunction of the field tests decides the match.
//! - [`TypedEntry`] — one [`FieldKind`] selector plus one exact value.
//!
//! A deployment commits to exactly one shape: the store, gate, and command
//! processor are generic over `E: AllowEntry`, so the shapes can never mix
//! within one list and cross-shape matching is unrepresentable.

pub mod pattern;
pub mod typed;

pub use pattern::PatternEntry;
pub use typed::{FieldKind, TypedEntry};

use crate::error::CommandError;
use crate::host::{Identity, PlayerRegistry};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// Matching contract shared by both entry shapes.
///
/// All predicates are pure, deterministic, and total: an absent field is a
/// wildcard (pattern shape) or a non-match signal (typed shape), never an
/// error.
pub trait AllowEntry:
    Clone
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Filter-type tokens accepted by `allowlist add` for this shape
    const FILTER_KINDS: &'static [&'static str];

    /// Build an entry from an `add <filterType> <value>` command.
    ///
    /// Filter kinds that capture attributes of a live player resolve them
    /// through `registry`; a lookup miss is an explicit
    /// [`CommandError::ResolveFailed`], never a silently empty entry.
    fn from_command(
        kind: &str,
        value: &str,
        registry: &dyn PlayerRegistry,
    ) -> Result<Self, CommandError>;

    /// Whether a connecting identity satisfies this entry
    fn matches_identity(&self, identity: &Identity) -> bool;

    /// Entry-to-entry matching, used for removal by pattern
    fn matches_entry(&self, other: &Self) -> bool;

    /// Shape-specific shortcut used by `allowlist remove <value>`:
    /// pattern entries compare their `name` field, typed entries compare
    /// their value regardless of kind.
    fn matches_identifier(&self, value: &str) -> bool;

    /// True when the entry matches every identity. Such entries are
    /// permitted but flagged by callers, since one of them neutralizes
    /// enforcement while the list is enabled.
    fn is_unconditional(&self) -> bool {
        false
    }
}
