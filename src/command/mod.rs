//! Administrator command surface
//!
//! Translates `allowlist ...` token lists into store mutations plus a
//! persistence write, and renders list/status feedback. Validation failures
//! (unknown action, unknown filter type, wrong argument count) cause no
//! mutation and no write. Every successful mutating action is saved
//! synchronously before success is reported. No command ever panics; every
//! outcome is rendered as [`Feedback`].

use crate::entry::AllowEntry;
use crate::error::{CommandError, CommandResult};
use crate::host::PlayerRegistry;
use crate::store::SharedAllowList;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Accepted command actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
    List,
    Enable,
    Disable,
    Reload,
}

impl Action {
    /// Get the action name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Remove => "remove",
            Action::List => "list",
            Action::Enable => "enable",
            Action::Disable => "disable",
            Action::Reload => "reload",
        }
    }

    /// Try to parse an action from a string
    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "add" => Some(Action::Add),
            "remove" => Some(Action::Remove),
            "list" => Some(Action::List),
            "enable" => Some(Action::Enable),
            "disable" => Some(Action::Disable),
            "reload" => Some(Action::Reload),
            _ => None,
        }
    }

    /// Get all actions
    pub fn all() -> &'static [Action] {
        &[
            Action::Add,
            Action::Remove,
            Action::List,
            Action::Enable,
            Action::Disable,
            Action::Reload,
        ]
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Feedback for the invoking administrator, mirroring the host's message
/// channels (success / informational / error)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Info(String),
    Error(String),
}

impl Feedback {
    pub fn text(&self) -> &str {
        match self {
            Feedback::Success(text) | Feedback::Info(text) | Feedback::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Error(_))
    }
}

/// Translates administrator commands into allowlist mutations
pub struct CommandProcessor<E: AllowEntry> {
    list: Arc<SharedAllowList<E>>,
    registry: Arc<dyn PlayerRegistry>,
}

impl<E: AllowEntry> CommandProcessor<E> {
    pub fn new(list: Arc<SharedAllowList<E>>, registry: Arc<dyn PlayerRegistry>) -> Self {
        Self { list, registry }
    }

    /// Usage text listing every command form for this deployment's shape
    pub fn usage() -> String {
        format!(
            "Proper syntax:\n\
             /allowlist add [{kinds}] <value> - Add an entry. \
             Types that capture attributes of a live player (such as an address) \
             require that player to be connected.\n\
             /allowlist remove <value> - Remove all matching entries.\n\
             /allowlist list\n\
             /allowlist enable\n\
             /allowlist disable\n\
             /allowlist reload",
            kinds = E::FILTER_KINDS.join("/"),
        )
    }

    /// Handle one command. Every outcome, including validation failures, is
    /// rendered as feedback text.
    pub fn handle(&self, args: &[&str]) -> Feedback {
        match self.try_handle(args) {
            Ok(feedback) => feedback,
            Err(err) if err.is_syntax() => {
                Feedback::Error(format!("Invalid syntax: {}. {}", err, Self::usage()))
            }
            Err(err) => Feedback::Error(err.to_string()),
        }
    }

    fn try_handle(&self, args: &[&str]) -> CommandResult<Feedback> {
        let (action_token, rest) = args.split_first().ok_or(CommandError::MissingAction)?;
        let action = Action::try_parse(action_token)
            .ok_or_else(|| CommandError::UnknownAction(action_token.to_string()))?;

        debug!(%action, args = rest.len(), "Handling allowlist command");

        match action {
            Action::Add => self.add(rest),
            Action::Remove => self.remove(rest),
            Action::List => Self::expect_no_args(action, rest).map(|_| self.list()),
            Action::Enable => {
                Self::expect_no_args(action, rest)?;
                Ok(self.set_enabled(true))
            }
            Action::Disable => {
                Self::expect_no_args(action, rest)?;
                Ok(self.set_enabled(false))
            }
            Action::Reload => {
                Self::expect_no_args(action, rest)?;
                Ok(self.reload())
            }
        }
    }

    fn expect_no_args(action: Action, rest: &[&str]) -> CommandResult<()> {
        if rest.is_empty() {
            Ok(())
        } else {
            Err(CommandError::WrongArity {
                action: action.as_str(),
            })
        }
    }

    fn add(&self, rest: &[&str]) -> CommandResult<Feedback> {
        let [kind, value] = rest else {
            return Err(CommandError::WrongArity { action: "add" });
        };
        if !E::FILTER_KINDS.contains(kind) {
            return Err(CommandError::UnknownFilterType((*kind).to_string()));
        }

        let entry = E::from_command(kind, value, self.registry.as_ref())?;
        let unconditional = entry.is_unconditional();

        Ok(match self.list.add(entry) {
            Ok(()) if unconditional => Feedback::Success(
                "Added entry to allowlist. Warning: it matches every identity.".to_string(),
            ),
            Ok(()) => Feedback::Success("Added entry to allowlist.".to_string()),
            Err(err) => Feedback::Error(format!(
                "Entry added in memory but saving failed: {err}. \
                 Disk is out of sync until the next successful save or reload."
            )),
        })
    }

    fn remove(&self, rest: &[&str]) -> CommandResult<Feedback> {
        let [value] = rest else {
            return Err(CommandError::WrongArity { action: "remove" });
        };

        Ok(match self.list.remove_by_identifier(value) {
            Ok(0) => Feedback::Info("No matching entries found; nothing removed.".to_string()),
            Ok(removed) => Feedback::Success(format!(
                "Removed {removed} matching entries from the allowlist."
            )),
            Err(err) => Feedback::Error(format!(
                "Entries removed in memory but saving failed: {err}. \
                 Disk is out of sync until the next successful save or reload."
            )),
        })
    }

    fn list(&self) -> Feedback {
        match self.list.list_as_text() {
            None => Feedback::Info("No entries in allowlist.".to_string()),
            Some(text) => Feedback::Success(text),
        }
    }

    fn set_enabled(&self, enabled: bool) -> Feedback {
        let state = if enabled { "enabled" } else { "disabled" };
        match self.list.set_enabled(enabled) {
            Ok(()) => Feedback::Success(format!("Allowlist {state}.")),
            Err(err) => Feedback::Error(format!(
                "Allowlist {state} in memory but saving failed: {err}. \
                 Disk is out of sync until the next successful save or reload."
            )),
        }
    }

    fn reload(&self) -> Feedback {
        match self.list.reload() {
            Ok(()) => Feedback::Success("Reloaded allowlist.".to_string()),
            Err(err) => Feedback::Error(format!(
                "Could not reload allowlist: {err}. \
                 Current entries kept; the file was left untouched."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_roundtrip() {
        for action in Action::all() {
            let parsed = Action::try_parse(action.as_str()).unwrap();
            assert_eq!(*action, parsed);
        }
    }

    #[test]
    fn test_usage_lists_shape_filter_kinds() {
        let pattern = CommandProcessor::<crate::entry::PatternEntry>::usage();
        assert!(pattern.contains("[name/ip/uuid/all]"));

        let typed = CommandProcessor::<crate::entry::TypedEntry>::usage();
        assert!(typed.contains("[ip/name/uuid]"));
    }

    #[test]
    fn test_feedback_text_accessor() {
        assert_eq!(Feedback::Info("hi".into()).text(), "hi");
        assert!(Feedback::Error("bad".into()).is_error());
        assert!(!Feedback::Success("ok".into()).is_error());
    }
}
