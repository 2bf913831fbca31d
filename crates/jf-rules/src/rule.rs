use std::fmt;
use std::sync::Arc;

use jf_types::Value;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RuleError, RuleResult};

/// Decides whether two floats are equal.
pub type FloatEqualFn = Arc<dyn Fn(f64, f64) -> bool + Send + Sync>;

/// Decides whether two values at a selector are equal, replacing every other
/// comparison for that node.
pub type CustomEqualFn = Arc<dyn Fn(&str, &Value, &Value) -> bool + Send + Sync>;

// ---------------------------------------------------------------------------
// Side / action
// ---------------------------------------------------------------------------

/// Which input tree a rule applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSide {
    /// The left tree only.
    A,
    /// The right tree only.
    B,
    /// Both trees.
    #[default]
    AB,
}

impl RuleSide {
    pub fn covers_a(self) -> bool {
        matches!(self, RuleSide::A | RuleSide::AB)
    }

    pub fn covers_b(self) -> bool {
        matches!(self, RuleSide::B | RuleSide::AB)
    }
}

impl fmt::Display for RuleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleSide::A => "a",
            RuleSide::B => "b",
            RuleSide::AB => "ab",
        };
        f.write_str(s)
    }
}

/// What a rule does to the nodes it matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleAction {
    /// `null` equals the empty value of the other side's kind.
    CoerceNull,
    /// Differences at matching selectors are dropped.
    Ignore,
    /// Differences are dropped when the matching side holds a zero value.
    IgnoreIfZero,
    /// Floats are compared with a caller-supplied function.
    FloatEqual,
    /// Arrays are equal if some permutation of them is.
    IgnoreOrder,
    /// `"1"` equals `1`.
    StringNumber,
    /// Arrays of objects are sorted by a key before comparison.
    OrderByKey,
    /// A caller-supplied predicate decides equality.
    CustomEqual,
}

impl RuleAction {
    pub fn name(self) -> &'static str {
        match self {
            RuleAction::CoerceNull => "coerce-null",
            RuleAction::Ignore => "ignore",
            RuleAction::IgnoreIfZero => "ignore-if-zero",
            RuleAction::FloatEqual => "float-equal",
            RuleAction::IgnoreOrder => "ignore-order",
            RuleAction::StringNumber => "string-number",
            RuleAction::OrderByKey => "order-by-key",
            RuleAction::CustomEqual => "custom-equal",
        }
    }

    /// Actions whose effect does not depend on the side a rule was
    /// registered for: a match on either side counts.
    pub fn is_symmetric(self) -> bool {
        !matches!(
            self,
            RuleAction::CoerceNull | RuleAction::Ignore | RuleAction::IgnoreIfZero
        )
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Params
// ---------------------------------------------------------------------------

/// Action-specific payload of a rule.
#[derive(Clone, Default)]
pub enum RuleParams {
    #[default]
    None,
    FloatEqual(FloatEqualFn),
    OrderByKey(String),
    CustomEqual(CustomEqualFn),
}

impl RuleParams {
    fn describe(&self) -> &'static str {
        match self {
            RuleParams::None => "no parameters",
            RuleParams::FloatEqual(_) => "a float-equal function",
            RuleParams::OrderByKey(_) => "a sort key",
            RuleParams::CustomEqual(_) => "a custom predicate",
        }
    }
}

impl fmt::Debug for RuleParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleParams::None => f.write_str("None"),
            RuleParams::FloatEqual(_) => f.write_str("FloatEqual(<fn>)"),
            RuleParams::OrderByKey(key) => f.debug_tuple("OrderByKey").field(key).finish(),
            RuleParams::CustomEqual(_) => f.write_str("CustomEqual(<fn>)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// A compiled selector pattern tagged with a side and an action.
///
/// Rules are immutable once built. The pattern has regular-expression
/// semantics and is searched anywhere in the selector text, so `list`
/// matches `list`, `data.list` and `list[0]` alike; anchor it with `^...$`
/// for an exact match.
#[derive(Clone, Debug)]
pub struct Rule {
    pattern: Regex,
    side: RuleSide,
    action: RuleAction,
    params: RuleParams,
}

impl Rule {
    /// Compile a rule, validating the pattern and the action/params pairing.
    pub fn new(
        side: RuleSide,
        pattern: &str,
        action: RuleAction,
        params: RuleParams,
    ) -> RuleResult<Self> {
        check_params(action, &params)?;
        let pattern = Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            pattern,
            side,
            action,
            params,
        })
    }

    pub fn side(&self) -> RuleSide {
        self.side
    }

    pub fn action(&self) -> RuleAction {
        self.action
    }

    pub fn params(&self) -> &RuleParams {
        &self.params
    }

    /// The source text of the pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Whether the pattern matches the selector text.
    pub fn matches(&self, selector: &str) -> bool {
        self.pattern.is_match(selector)
    }
}

fn check_params(action: RuleAction, params: &RuleParams) -> RuleResult<()> {
    let expected = match action {
        RuleAction::FloatEqual => "a float-equal function",
        RuleAction::OrderByKey => "a sort key",
        RuleAction::CustomEqual => "a custom predicate",
        RuleAction::CoerceNull
        | RuleAction::Ignore
        | RuleAction::IgnoreIfZero
        | RuleAction::IgnoreOrder
        | RuleAction::StringNumber => "no parameters",
    };
    let ok = matches!(
        (action, params),
        (RuleAction::FloatEqual, RuleParams::FloatEqual(_))
            | (RuleAction::OrderByKey, RuleParams::OrderByKey(_))
            | (RuleAction::CustomEqual, RuleParams::CustomEqual(_))
            | (
                RuleAction::CoerceNull
                    | RuleAction::Ignore
                    | RuleAction::IgnoreIfZero
                    | RuleAction::IgnoreOrder
                    | RuleAction::StringNumber,
                RuleParams::None
            )
    );
    if ok {
        Ok(())
    } else {
        Err(RuleError::ParamsMismatch {
            action,
            expected,
            got: params.describe(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_is_searched_not_anchored() {
        let rule = Rule::new(RuleSide::AB, "list", RuleAction::IgnoreOrder, RuleParams::None)
            .unwrap();
        assert!(rule.matches("list"));
        assert!(rule.matches("data.list"));
        assert!(rule.matches("list[0]"));
        assert!(!rule.matches("items"));
    }

    #[test]
    fn anchored_pattern() {
        let rule =
            Rule::new(RuleSide::A, r"^key\.subkey1$", RuleAction::CoerceNull, RuleParams::None)
                .unwrap();
        assert!(rule.matches("key.subkey1"));
        assert!(!rule.matches("key.subkey10"));
        assert_eq!(rule.pattern(), r"^key\.subkey1$");
    }

    #[test]
    fn invalid_pattern_rejected_at_registration() {
        let err = Rule::new(RuleSide::AB, "(unclosed", RuleAction::Ignore, RuleParams::None)
            .unwrap_err();
        match err {
            RuleError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("expected InvalidPattern, got {other:?}"),
        }
    }

    #[test]
    fn parameterized_action_requires_payload() {
        let err = Rule::new(RuleSide::AB, ".*", RuleAction::FloatEqual, RuleParams::None)
            .unwrap_err();
        assert!(matches!(
            err,
            RuleError::ParamsMismatch {
                action: RuleAction::FloatEqual,
                ..
            }
        ));
    }

    #[test]
    fn plain_action_rejects_payload() {
        let err = Rule::new(
            RuleSide::AB,
            ".*",
            RuleAction::Ignore,
            RuleParams::OrderByKey("id".into()),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "action 'ignore' expects no parameters, got a sort key"
        );
    }

    #[test]
    fn side_coverage() {
        assert!(RuleSide::A.covers_a() && !RuleSide::A.covers_b());
        assert!(!RuleSide::B.covers_a() && RuleSide::B.covers_b());
        assert!(RuleSide::AB.covers_a() && RuleSide::AB.covers_b());
    }

    #[test]
    fn action_names_match_serde() {
        for action in [
            RuleAction::CoerceNull,
            RuleAction::Ignore,
            RuleAction::IgnoreIfZero,
            RuleAction::FloatEqual,
            RuleAction::IgnoreOrder,
            RuleAction::StringNumber,
            RuleAction::OrderByKey,
            RuleAction::CustomEqual,
        ] {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.name()));
        }
    }
}
