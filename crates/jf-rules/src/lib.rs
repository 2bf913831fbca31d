//! Rule sets for the `jf` structural JSON differ.
//!
//! A rule pairs a regular expression over selector text with a side (left,
//! right or both trees) and an action that relaxes or redefines equality at
//! the selectors it matches. Patterns are validated when a rule is
//! registered; matching never fails.
//!
//! # Quick Start
//!
//! ```rust
//! use jf_rules::{RuleAction, RuleSet, RuleSide};
//!
//! let rules = RuleSet::new()
//!     .coerce_null(RuleSide::A, ".*")?
//!     .float_tolerance("price", 0.01)?;
//!
//! assert!(rules.matches("key", RuleAction::CoerceNull).a);
//! assert!(rules.float_equal_fn("price")(9.99, 10.0));
//! # Ok::<(), jf_rules::RuleError>(())
//! ```

pub mod config;
pub mod error;
pub mod rule;
pub mod set;

pub use config::{RuleEntry, RulesConfig};
pub use error::{RuleError, RuleResult};
pub use rule::{CustomEqualFn, FloatEqualFn, Rule, RuleAction, RuleParams, RuleSide};
pub use set::{RuleSet, SideMatch, DEFAULT_FLOAT_TOLERANCE};
