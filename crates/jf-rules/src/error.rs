//! Error types for rule registration and rule files.

use thiserror::Error;

use crate::rule::RuleAction;

/// Errors that can occur while building a rule set.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The selector pattern is not a valid regular expression.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The action was given a payload it does not take.
    #[error("action '{action}' expects {expected}, got {got}")]
    ParamsMismatch {
        action: RuleAction,
        expected: &'static str,
        got: &'static str,
    },

    /// A rule file entry is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The rule file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The rule file is not valid TOML for a rule list.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience alias for rule operations.
pub type RuleResult<T> = Result<T, RuleError>;
