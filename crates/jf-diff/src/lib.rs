//! Structural diff engine for JSON trees.
//!
//! Walks two [`Value`](jf_types::Value) trees in parallel and reports where
//! they differ as a flat, ordered list of patches keyed by selector. A
//! [`RuleSet`](jf_rules::RuleSet) relaxes or redefines equality at the
//! selectors its rules match.
//!
//! # Key Types
//!
//! - [`Differ`] -- A rule set bundled with the diff operation
//! - [`Patch`] / [`PatchKind`] -- One difference: selector plus left and/or right JSON text
//! - [`PatchList`] -- All differences of one diff call, in traversal order
//!
//! # Traversal order
//!
//! Object keys are visited in ascending order; keys only the right tree has
//! come after all keys of the left tree. Array elements are visited by
//! index, after any order-by-key sorting.

mod array;
mod compare;
pub mod differ;
pub mod error;
pub mod patch;
mod walker;

pub use differ::{diff, diff_json_str, Differ};
pub use error::{DiffError, DiffResult};
pub use patch::{Patch, PatchKind, PatchList};
