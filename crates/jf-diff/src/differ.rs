//! Diff entry points.
//!
//! [`diff`] walks two trees under a rule set and returns every surviving
//! difference in traversal order. [`Differ`] bundles a rule set with the same
//! operation for callers that diff many pairs under one configuration.

use jf_rules::RuleSet;
use jf_types::{Selector, Value};
use tracing::debug;

use crate::error::DiffResult;
use crate::patch::PatchList;
use crate::walker::Walker;

/// Compare `a` (left) against `b` (right) under `rules`.
///
/// Two object roots are compared field by field starting at the empty
/// selector. Any other pair of roots is compared as a single value at the
/// empty selector, so a kind mismatch at the root is one patch.
///
/// Either every patch is returned or an error is; no partial result
/// survives a failure.
pub fn diff(a: &Value, b: &Value, rules: &RuleSet) -> DiffResult<PatchList> {
    debug!(rules = rules.len(), "diff started");

    let mut walker = Walker::new(rules);
    let root = Selector::root();
    match (a, b) {
        (Value::Object(x), Value::Object(y)) => walker.diff_object(&root, x, y)?,
        _ => walker.diff_values(&root, a, b)?,
    }
    let patches = walker.into_patches();

    debug!(
        patches = patches.len(),
        left_only = patches.left_only(),
        right_only = patches.right_only(),
        changed = patches.changed(),
        "diff finished"
    );
    Ok(patches)
}

/// Parse two JSON texts and diff them.
pub fn diff_json_str(a: &str, b: &str, rules: &RuleSet) -> DiffResult<PatchList> {
    let a = Value::from_json_str(a)?;
    let b = Value::from_json_str(b)?;
    diff(&a, &b, rules)
}

/// A rule set plus the diff operation.
///
/// ```
/// use jf_diff::Differ;
/// use jf_rules::RuleSet;
///
/// let differ = Differ::with_rules(RuleSet::new().ignore_order("list")?);
/// let patches = differ.diff_json_str(r#"{"list": [1, 2, 3]}"#, r#"{"list": [3, 2, 1]}"#)?;
/// assert!(patches.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Differ {
    rules: RuleSet,
}

impl Differ {
    /// A differ with no rules: exact comparison.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleSet {
        &mut self.rules
    }

    pub fn diff(&self, a: &Value, b: &Value) -> DiffResult<PatchList> {
        diff(a, b, &self.rules)
    }

    pub fn diff_json_str(&self, a: &str, b: &str) -> DiffResult<PatchList> {
        diff_json_str(a, b, &self.rules)
    }
}
