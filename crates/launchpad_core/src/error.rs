use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level launchpad error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LaunchpadError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("Insufficient funds: need {required} {symbol}, have {available}")]
    InsufficientFunds {
        symbol: String,
        required: f64,
        available: f64,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Classification of errors for logging and user display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Caused by user input (bad amount, missing field, not enough funds).
    UserError,
    /// Local persistence or bundled data is broken.
    SystemError,
    /// Invalid or missing configuration.
    ConfigError,
}

impl LaunchpadError {
    /// Returns the broad error category for routing and display purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::ConfigError,
            Self::Storage(_) | Self::Fixture(_) => ErrorCategory::SystemError,
            Self::InvalidAmount(_)
            | Self::InvalidIdentity(_)
            | Self::InsufficientFunds { .. }
            | Self::Validation(_)
            | Self::NotFound(_) => ErrorCategory::UserError,
        }
    }

    /// Returns a user-friendly message (hides internal details).
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(msg) => format!("Configuration issue: {msg}"),
            Self::Storage(_) => "Local storage is unavailable. Your changes were not saved.".into(),
            Self::Fixture(_) => "Bundled data could not be loaded.".into(),
            Self::InvalidAmount(msg) => format!("Invalid amount: {msg}"),
            Self::InvalidIdentity(_) => "Could not connect that account.".into(),
            Self::InsufficientFunds {
                symbol, required, ..
            } => format!("Not enough {symbol}. You need at least {required:.2} {symbol}."),
            Self::Validation(msg) => msg.clone(),
            Self::NotFound(what) => format!("{what} was not found."),
        }
    }
}
