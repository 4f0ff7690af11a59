//! Error types for allowgate
//!
//! This module defines the error hierarchy used throughout the crate.
//! We use `thiserror` for library-style errors that are part of the API,
//! and render them as plain feedback text at the command boundary.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Allowlist store error: {0}")]
    Store(#[from] StoreError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },
}

/// Allowlist store and persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// The file exists but does not deserialize. The on-disk file is never
    /// overwritten when this is raised; the caller keeps its prior state.
    #[error("Failed to parse allowlist file '{path}': {reason}")]
    Parse { path: String, reason: String },

    #[error("Failed to encode allowlist: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn parse(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Administrator command errors
///
/// Validation failures cause no mutation and no persistence write.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("an action is required")]
    MissingAction,

    #[error("'{0}' is not a valid action")]
    UnknownAction(String),

    #[error("'{0}' is not a valid type")]
    UnknownFilterType(String),

    #[error("wrong number of arguments for '{action}'")]
    WrongArity { action: &'static str },

    #[error("could not resolve '{name}' to a connected player with the requested attributes")]
    ResolveFailed { name: String },
}

impl CommandError {
    /// Whether this error should be reported together with the usage text
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            CommandError::MissingAction
                | CommandError::UnknownAction(_)
                | CommandError::UnknownFilterType(_)
                | CommandError::WrongArity { .. }
        )
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for store and persistence operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for command handling
pub type CommandResult<T> = std::result::Result<T, CommandError>;
