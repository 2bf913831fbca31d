//! Error types for the diff crate.

use jf_types::{TypeError, ValueKind};

/// Errors that can abort a diff call.
///
/// A type mismatch between the two trees is not an error: it is reported as
/// a patch. No partial patch list survives an error.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The comparator reached a value pairing it has no rule for.
    #[error("support for type {kind} is not implemented (at {selector:?})")]
    UnsupportedType { selector: String, kind: ValueKind },

    /// One of the inputs is not well-formed JSON.
    #[error("parse error: {0}")]
    Parse(#[from] TypeError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
