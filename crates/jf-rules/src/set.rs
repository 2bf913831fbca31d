//! Ordered rule storage and per-selector queries.
//!
//! Registration order matters only as a tie-break: for parameterized actions
//! the first matching rule wins.

use std::sync::Arc;

use jf_types::Value;
use tracing::debug;

use crate::error::RuleResult;
use crate::rule::{CustomEqualFn, FloatEqualFn, Rule, RuleAction, RuleParams, RuleSide};

/// Absolute tolerance of the built-in float comparison.
pub const DEFAULT_FLOAT_TOLERANCE: f64 = 1e-9;

fn default_float_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= DEFAULT_FLOAT_TOLERANCE
}

static DEFAULT_FLOAT_EQUAL: fn(f64, f64) -> bool = default_float_equal;

/// Per-side outcome of a rule query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SideMatch {
    /// Some rule covering the left tree matched.
    pub a: bool,
    /// Some rule covering the right tree matched.
    pub b: bool,
}

impl SideMatch {
    pub fn any(self) -> bool {
        self.a || self.b
    }
}

/// An ordered sequence of rules.
///
/// A `RuleSet` is read-only during a diff and can be shared between
/// concurrent diff calls.
///
/// ```
/// use jf_rules::{RuleSet, RuleSide};
///
/// let rules = RuleSet::new()
///     .ignore(RuleSide::B, "^additional$")?
///     .ignore_order("list")?;
/// assert_eq!(rules.len(), 2);
/// assert!(rules.matches("additional", jf_rules::RuleAction::Ignore).b);
/// # Ok::<(), jf_rules::RuleError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty rule set: exact diffing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    // ---------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------

    /// Compile and append a rule.
    pub fn add_rule(
        &mut self,
        side: RuleSide,
        pattern: &str,
        action: RuleAction,
        params: RuleParams,
    ) -> RuleResult<&mut Self> {
        let rule = Rule::new(side, pattern, action, params)?;
        debug!(%side, %action, pattern, "rule registered");
        self.rules.push(rule);
        Ok(self)
    }

    fn with(
        mut self,
        side: RuleSide,
        pattern: &str,
        action: RuleAction,
        params: RuleParams,
    ) -> RuleResult<Self> {
        self.add_rule(side, pattern, action, params)?;
        Ok(self)
    }

    /// Treat `null` as the empty value of the other side's kind
    /// (`{}`, `[]`, `""`, `0`, `false`).
    pub fn coerce_null(self, side: RuleSide, pattern: &str) -> RuleResult<Self> {
        self.with(side, pattern, RuleAction::CoerceNull, RuleParams::None)
    }

    /// Drop differences at matching selectors.
    pub fn ignore(self, side: RuleSide, pattern: &str) -> RuleResult<Self> {
        self.with(side, pattern, RuleAction::Ignore, RuleParams::None)
    }

    /// Drop differences at matching selectors when the value is zero.
    pub fn ignore_if_zero(self, side: RuleSide, pattern: &str) -> RuleResult<Self> {
        self.with(side, pattern, RuleAction::IgnoreIfZero, RuleParams::None)
    }

    /// Compare floats at matching selectors with `eq`.
    pub fn float_equal<F>(self, pattern: &str, eq: F) -> RuleResult<Self>
    where
        F: Fn(f64, f64) -> bool + Send + Sync + 'static,
    {
        self.with(
            RuleSide::AB,
            pattern,
            RuleAction::FloatEqual,
            RuleParams::FloatEqual(Arc::new(eq)),
        )
    }

    /// Compare floats at matching selectors with an absolute tolerance.
    pub fn float_tolerance(self, pattern: &str, tolerance: f64) -> RuleResult<Self> {
        self.float_equal(pattern, move |a, b| (a - b).abs() <= tolerance)
    }

    /// Accept any permutation of arrays at matching selectors.
    pub fn ignore_order(self, pattern: &str) -> RuleResult<Self> {
        self.with(RuleSide::AB, pattern, RuleAction::IgnoreOrder, RuleParams::None)
    }

    /// Parse numeric strings at matching selectors, so `"1"` equals `1`.
    pub fn string_number(self, pattern: &str) -> RuleResult<Self> {
        self.with(RuleSide::AB, pattern, RuleAction::StringNumber, RuleParams::None)
    }

    /// Sort arrays of objects at matching selectors by `key` before comparing.
    pub fn order_by_key(self, pattern: &str, key: &str) -> RuleResult<Self> {
        self.with(
            RuleSide::AB,
            pattern,
            RuleAction::OrderByKey,
            RuleParams::OrderByKey(key.to_string()),
        )
    }

    /// Let `eq` decide equality of matching nodes.
    pub fn custom_equal<F>(self, pattern: &str, eq: F) -> RuleResult<Self>
    where
        F: Fn(&str, &Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.with(
            RuleSide::AB,
            pattern,
            RuleAction::CustomEqual,
            RuleParams::CustomEqual(Arc::new(eq)),
        )
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    /// Whether any rule of `action` matches `selector`, per side.
    pub fn matches(&self, selector: &str, action: RuleAction) -> SideMatch {
        let mut out = SideMatch::default();
        for rule in self.matching(selector, action) {
            out.a |= rule.side().covers_a();
            out.b |= rule.side().covers_b();
            if out.a && out.b {
                break;
            }
        }
        out
    }

    /// Whether any rule of `action` matches `selector` on either side.
    pub fn matches_any(&self, selector: &str, action: RuleAction) -> bool {
        self.matching(selector, action).next().is_some()
    }

    /// Float comparison for `selector`: the first matching float-equal rule,
    /// or an absolute difference of at most [`DEFAULT_FLOAT_TOLERANCE`].
    pub fn float_equal_fn(&self, selector: &str) -> &(dyn Fn(f64, f64) -> bool + Send + Sync) {
        self.matching(selector, RuleAction::FloatEqual)
            .find_map(|rule| match rule.params() {
                RuleParams::FloatEqual(eq) => Some(eq),
                _ => None,
            })
            .map(|eq: &FloatEqualFn| eq.as_ref())
            .unwrap_or(&DEFAULT_FLOAT_EQUAL)
    }

    /// Predicate of the first matching custom-equal rule.
    pub fn custom_equal_fn(&self, selector: &str) -> Option<&CustomEqualFn> {
        self.matching(selector, RuleAction::CustomEqual)
            .find_map(|rule| match rule.params() {
                RuleParams::CustomEqual(eq) => Some(eq),
                _ => None,
            })
    }

    /// Sort key of the first matching order-by-key rule.
    pub fn order_key(&self, selector: &str) -> Option<&str> {
        self.matching(selector, RuleAction::OrderByKey)
            .find_map(|rule| match rule.params() {
                RuleParams::OrderByKey(key) => Some(key.as_str()),
                _ => None,
            })
    }

    fn matching<'a, 'b>(
        &'a self,
        selector: &'b str,
        action: RuleAction,
    ) -> impl Iterator<Item = &'a Rule> + 'b
    where
        'a: 'b,
    {
        self.rules
            .iter()
            .filter(move |rule| rule.action() == action && rule.matches(selector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleError;

    #[test]
    fn empty_set_matches_nothing() {
        let rules = RuleSet::new();
        assert!(rules.is_empty());
        assert_eq!(rules.matches("a", RuleAction::Ignore), SideMatch::default());
        assert!(!rules.matches_any("a", RuleAction::IgnoreOrder));
        assert!(rules.custom_equal_fn("a").is_none());
        assert!(rules.order_key("a").is_none());
    }

    #[test]
    fn per_side_matching() {
        let rules = RuleSet::new()
            .coerce_null(RuleSide::A, "x")
            .unwrap()
            .coerce_null(RuleSide::B, "y")
            .unwrap();

        assert_eq!(
            rules.matches("x", RuleAction::CoerceNull),
            SideMatch { a: true, b: false }
        );
        assert_eq!(
            rules.matches("y", RuleAction::CoerceNull),
            SideMatch { a: false, b: true }
        );
        assert_eq!(
            rules.matches("xy", RuleAction::CoerceNull),
            SideMatch { a: true, b: true }
        );
        assert!(!rules.matches("z", RuleAction::CoerceNull).any());
    }

    #[test]
    fn both_sides_rule() {
        let rules = RuleSet::new().ignore(RuleSide::AB, ".*").unwrap();
        let m = rules.matches("anything", RuleAction::Ignore);
        assert!(m.a && m.b);
    }

    #[test]
    fn action_must_match_too() {
        let rules = RuleSet::new().ignore(RuleSide::AB, ".*").unwrap();
        assert!(!rules.matches("k", RuleAction::IgnoreIfZero).any());
    }

    #[test]
    fn default_float_equal() {
        let rules = RuleSet::new();
        let eq = rules.float_equal_fn("f");
        assert!(eq(1.0, 1.0 + 1e-10));
        assert!(!eq(1.0, 1.0 + 1e-6));
    }

    #[test]
    fn first_float_rule_wins() {
        let rules = RuleSet::new()
            .float_tolerance("price", 0.5)
            .unwrap()
            .float_tolerance(".*", 0.0)
            .unwrap();

        assert!(rules.float_equal_fn("price")(10.0, 10.4));
        assert!(!rules.float_equal_fn("weight")(10.0, 10.4));
    }

    #[test]
    fn custom_equal_lookup() {
        let rules = RuleSet::new()
            .custom_equal("^int$", |_, _, _| true)
            .unwrap();
        let eq = rules.custom_equal_fn("int").unwrap();
        assert!(eq("int", &Value::Int(1), &Value::Int(2)));
        assert!(rules.custom_equal_fn("other").is_none());
    }

    #[test]
    fn order_key_lookup() {
        let rules = RuleSet::new()
            .order_by_key("items", "id")
            .unwrap()
            .order_by_key(".*", "name")
            .unwrap();
        assert_eq!(rules.order_key("items"), Some("id"));
        assert_eq!(rules.order_key("users"), Some("name"));
    }

    #[test]
    fn add_rule_generic() {
        let mut rules = RuleSet::new();
        rules
            .add_rule(RuleSide::B, "tmp", RuleAction::Ignore, RuleParams::None)
            .unwrap()
            .add_rule(RuleSide::AB, "list", RuleAction::IgnoreOrder, RuleParams::None)
            .unwrap();
        assert_eq!(rules.len(), 2);
        let actions: Vec<RuleAction> = rules.iter().map(Rule::action).collect();
        assert_eq!(actions, vec![RuleAction::Ignore, RuleAction::IgnoreOrder]);
    }

    #[test]
    fn invalid_pattern_leaves_set_unchanged() {
        let mut rules = RuleSet::new();
        let err = rules
            .add_rule(RuleSide::AB, "[", RuleAction::Ignore, RuleParams::None)
            .unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
        assert!(rules.is_empty());
    }

    #[test]
    fn rule_set_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleSet>();
    }
}
