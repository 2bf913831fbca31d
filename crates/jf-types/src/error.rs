use thiserror::Error;

/// Errors produced by value model operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The input text is not well-formed JSON.
    #[error("invalid JSON: {0}")]
    Parse(String),
}
