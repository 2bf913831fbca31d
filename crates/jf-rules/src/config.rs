//! Rule files.
//!
//! A rule file is TOML with one `[[rule]]` table per rule:
//!
//! ```toml
//! [[rule]]
//! side = "b"
//! pattern = "^additional$"
//! action = "ignore"
//!
//! [[rule]]
//! pattern = "price"
//! action = "float-equal"
//! tolerance = 0.01
//!
//! [[rule]]
//! pattern = "^items$"
//! action = "order-by-key"
//! key = "id"
//! ```
//!
//! `side` defaults to `"ab"`. Custom predicates are code, so `custom-equal`
//! cannot appear in a file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RuleError, RuleResult};
use crate::rule::{RuleAction, RuleParams, RuleSide};
use crate::set::RuleSet;

/// A deserialized rule file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rules in file order.
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleEntry>,
}

/// One `[[rule]]` entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleEntry {
    #[serde(default)]
    pub side: RuleSide,
    pub pattern: String,
    pub action: RuleAction,
    /// Absolute tolerance, for `float-equal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    /// Sort key, for `order-by-key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl RulesConfig {
    /// Parse a rule file from TOML text.
    pub fn from_toml_str(text: &str) -> RuleResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a rule file.
    pub fn load(path: impl AsRef<Path>) -> RuleResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Append every rule to `rules`, in file order.
    pub fn apply_to(&self, rules: &mut RuleSet) -> RuleResult<()> {
        for (idx, entry) in self.rules.iter().enumerate() {
            let params = entry
                .params()
                .map_err(|reason| RuleError::Config(format!("rule #{}: {reason}", idx + 1)))?;
            rules.add_rule(entry.side, &entry.pattern, entry.action, params)?;
        }
        Ok(())
    }

    /// Build a fresh rule set from this file.
    pub fn into_rule_set(self) -> RuleResult<RuleSet> {
        let mut rules = RuleSet::new();
        self.apply_to(&mut rules)?;
        Ok(rules)
    }
}

impl RuleEntry {
    fn params(&self) -> Result<RuleParams, String> {
        match self.action {
            RuleAction::FloatEqual => {
                if self.key.is_some() {
                    return Err("float-equal does not take a key".into());
                }
                let tolerance = self
                    .tolerance
                    .ok_or_else(|| "float-equal requires a tolerance".to_string())?;
                if !tolerance.is_finite() || tolerance < 0.0 {
                    return Err(format!("tolerance must be a non-negative number, got {tolerance}"));
                }
                Ok(RuleParams::FloatEqual(std::sync::Arc::new(move |a: f64, b: f64| {
                    (a - b).abs() <= tolerance
                })))
            }
            RuleAction::OrderByKey => {
                if self.tolerance.is_some() {
                    return Err("order-by-key does not take a tolerance".into());
                }
                match &self.key {
                    Some(key) if !key.is_empty() => Ok(RuleParams::OrderByKey(key.clone())),
                    _ => Err("order-by-key requires a non-empty key".into()),
                }
            }
            RuleAction::CustomEqual => {
                Err("custom-equal rules can only be registered from code".into())
            }
            action => {
                if self.tolerance.is_some() || self.key.is_some() {
                    Err(format!("{action} takes no tolerance or key"))
                } else {
                    Ok(RuleParams::None)
                }
            }
        }
    }
}
