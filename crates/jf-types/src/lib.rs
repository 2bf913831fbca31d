//! Foundation types for the `jf` structural JSON differ.
//!
//! This crate provides the closed value model the diff engine walks and the
//! textual selectors it uses to address locations inside a tree. Every other
//! `jf` crate depends on `jf-types`.
//!
//! # Key Types
//!
//! - [`Value`] -- One JSON node: null, bool, int, float, string, array or object
//! - [`ValueKind`] -- The kind tag of a [`Value`], used for exhaustive dispatch
//! - [`Selector`] -- Dotted/bracketed address of a node, e.g. `a.b[2]`

pub mod error;
pub mod selector;
pub mod value;

pub use error::TypeError;
pub use selector::Selector;
pub use value::{Value, ValueKind};
