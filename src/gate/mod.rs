//! Join-time access gate
//!
//! Per-connection decision with no persistent state, evaluated in a fixed
//! order: enforcement disabled → bypass capability → entry match → reject.
//! When the list is disabled the store is not consulted at all. Each
//! decision path is recorded via `tracing`; the diagnostics are advisory and
//! not part of the decision contract.

use crate::entry::AllowEntry;
use crate::host::{Capability, HostActions, Identity};
use crate::store::SharedAllowList;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of a join-time check, one per connection attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Enforcement is off; everyone is admitted
    Disabled,
    /// The identity holds a bypass capability
    Bypass,
    /// An allowlist entry matched
    Matched,
    /// No entry matched; carries the user-visible reason
    Rejected(String),
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, GateDecision::Rejected(_))
    }

    /// Short label of the decision path, for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            GateDecision::Disabled => "disabled",
            GateDecision::Bypass => "bypass",
            GateDecision::Matched => "matched",
            GateDecision::Rejected(_) => "rejected",
        }
    }
}

/// Decides whether a connecting identity may join
pub struct AccessGate<E: AllowEntry> {
    list: Arc<SharedAllowList<E>>,
    host: Arc<dyn HostActions>,
    bypass: Vec<Capability>,
}

impl<E: AllowEntry> AccessGate<E> {
    pub fn new(
        list: Arc<SharedAllowList<E>>,
        host: Arc<dyn HostActions>,
        bypass: Vec<Capability>,
    ) -> Self {
        Self { list, host, bypass }
    }

    /// Evaluate the decision without acting on the connection
    pub fn evaluate(&self, identity: &Identity) -> GateDecision {
        if !self.list.is_enabled() {
            debug!(%identity, "Allowlist is disabled; admitting");
            return GateDecision::Disabled;
        }

        if self.host.has_any_capability(identity, &self.bypass) {
            debug!(%identity, "Identity holds a bypass capability; admitting");
            return GateDecision::Bypass;
        }

        match self.list.admit(identity) {
            Ok(()) => {
                debug!(%identity, "Identity matched an allowlist entry; admitting");
                GateDecision::Matched
            }
            Err(reason) => {
                info!(%identity, "Identity matched no allowlist entry; rejecting");
                GateDecision::Rejected(reason)
            }
        }
    }

    /// Evaluate and, on rejection, instruct the host to terminate the
    /// connection with the configured reason
    pub fn on_join(&self, identity: &Identity) -> GateDecision {
        let decision = self.evaluate(identity);
        if let GateDecision::Rejected(reason) = &decision {
            self.host.terminate(identity, reason);
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::PatternEntry;
    use crate::store::{AllowListFile, DEFAULT_FILE_NAME};
    use std::sync::Mutex;
    use tempfile::tempdir;

    struct FakeHost {
        capabilities: Vec<Capability>,
        terminations: Mutex<Vec<(Identity, String)>>,
    }

    impl FakeHost {
        fn new(capabilities: Vec<Capability>) -> Self {
            Self {
                capabilities,
                terminations: Mutex::new(Vec::new()),
            }
        }
    }

    impl HostActions for FakeHost {
        fn has_any_capability(&self, _identity: &Identity, capabilities: &[Capability]) -> bool {
            capabilities.iter().any(|c| self.capabilities.contains(c))
        }

        fn terminate(&self, identity: &Identity, reason: &str) {
            self.terminations
                .lock()
                .unwrap()
                .push((identity.clone(), reason.to_string()));
        }
    }

    fn gate_with(
        dir: &tempfile::TempDir,
        host: Arc<FakeHost>,
        setup: impl FnOnce(&SharedAllowList<PatternEntry>),
    ) -> AccessGate<PatternEntry> {
        let list = Arc::new(
            SharedAllowList::bootstrap(AllowListFile::new(dir.path().join(DEFAULT_FILE_NAME)))
                .unwrap(),
        );
        setup(&list);
        AccessGate::new(list, host, Capability::default_bypass_set())
    }

    #[test]
    fn test_disabled_list_admits_everyone() {
        let dir = tempdir().unwrap();
        let host = Arc::new(FakeHost::new(vec![]));
        // Empty, disabled by default: feature off, nobody rejected.
        let gate = gate_with(&dir, host.clone(), |_| {});

        let decision = gate.on_join(&Identity::named("Bob"));
        assert_eq!(decision, GateDecision::Disabled);
        assert!(host.terminations.lock().unwrap().is_empty());
    }

    #[test]
    fn test_bypass_capability_short_circuits_matching() {
        let dir = tempdir().unwrap();
        let host = Arc::new(FakeHost::new(vec![Capability::Kick]));
        let gate = gate_with(&dir, host.clone(), |list| {
            list.set_enabled(true).unwrap();
        });

        // Enabled empty list would reject anyone without a bypass.
        let decision = gate.on_join(&Identity::named("Admin"));
        assert_eq!(decision, GateDecision::Bypass);
        assert!(host.terminations.lock().unwrap().is_empty());
    }

    #[test]
    fn test_matching_entry_admits() {
        let dir = tempdir().unwrap();
        let host = Arc::new(FakeHost::new(vec![]));
        let gate = gate_with(&dir, host, |list| {
            list.add(PatternEntry::named("Alice")).unwrap();
            list.set_enabled(true).unwrap();
        });

        let identity = Identity::new(
            Some("1.2.3.4".into()),
            Some("Alice".into()),
            Some("xyz".into()),
        );
        assert_eq!(gate.on_join(&identity), GateDecision::Matched);
    }

    #[test]
    fn test_rejection_terminates_with_configured_reason() {
        let dir = tempdir().unwrap();
        let host = Arc::new(FakeHost::new(vec![]));
        let gate = gate_with(&dir, host.clone(), |list| {
            list.add(PatternEntry::named("Alice")).unwrap();
            list.set_enabled(true).unwrap();
        });

        let bob = Identity::named("Bob");
        let decision = gate.on_join(&bob);
        assert!(!decision.is_allowed());

        let terminations = host.terminations.lock().unwrap();
        assert_eq!(terminations.len(), 1);
        assert_eq!(terminations[0].0, bob);
        assert_eq!(terminations[0].1, crate::store::DEFAULT_REMOVAL_REASON);
    }
}
