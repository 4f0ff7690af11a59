//! Allowlist access gate for game server hosts
//!
//! On every incoming player connection the gate decides whether the
//! connection is permitted, based on a persisted list of identity entries
//! (network address, display name, and/or session id). Administrators
//! mutate the list and toggle enforcement through `allowlist` commands;
//! changes persist immediately and apply to the next connection check.
//!
//! ## Decision order
//!
//! ```text
//! enforcement disabled → bypass capability → entry match → reject
//! ```
//!
//! ## Entry shapes
//!
//! Two shapes exist, and a deployment commits to exactly one:
//!
//! - **Pattern** ([`PatternEntry`]): any combination of `ip`, `name`,
//!   `uuid`; unset fields are wildcards, set fields must match exactly.
//! - **Typed** ([`TypedEntry`]): one field kind plus one exact value.
//!
//! ## Persisted document
//!
//! ```json
//! {
//!   "enabled": true,
//!   "allowList": [
//!     { "name": "Alice" },
//!     { "ip": "1.2.3.4", "uuid": "xyz" }
//!   ],
//!   "removalReason": "You are not on the allowlist."
//! }
//! ```
//!
//! Mutations and their file write happen inside one critical section; a
//! malformed file is reported and never overwritten.
//!
//! ## Embedding
//!
//! The host process implements [`host::HostActions`] (capability queries and
//! connection termination) and [`host::PlayerRegistry`] (live player
//! lookup), then shares one [`store::SharedAllowList`] between an
//! [`gate::AccessGate`] hooked into its join event and a
//! [`command::CommandProcessor`] hooked into its command dispatcher.

pub mod command;
pub mod config;
pub mod entry;
pub mod error;
pub mod gate;
pub mod host;
pub mod store;

// Re-export main types
pub use command::{Action, CommandProcessor, Feedback};
pub use config::{AppConfig, EntryShape, load_config};
pub use entry::{AllowEntry, FieldKind, PatternEntry, TypedEntry};
pub use error::{AppError, Result};
pub use gate::{AccessGate, GateDecision};
pub use host::{Capability, HostActions, Identity, OfflineRegistry, PlayerRegistry};
pub use store::{AllowListFile, AllowListStore, LoadOutcome, SharedAllowList};
