//! Traversal state and patch emission.
//!
//! A [`Walker`] pairs a read-only rule set with the patch list being built.
//! Speculative comparisons (order-insensitive array matching) run in a fresh
//! walker over the same rules, so their patches never reach the real result.
//!
//! Every patch goes through one of the three `emit_*` methods, which apply
//! the `ignore` and `ignore-if-zero` rules before anything is recorded.

use std::collections::BTreeMap;

use jf_rules::{RuleAction, RuleSet};
use jf_types::{Selector, Value};

use crate::error::DiffResult;
use crate::patch::{Patch, PatchList};

pub(crate) struct Walker<'r> {
    pub(crate) rules: &'r RuleSet,
    patches: PatchList,
}

impl<'r> Walker<'r> {
    pub(crate) fn new(rules: &'r RuleSet) -> Self {
        Self {
            rules,
            patches: PatchList::new(),
        }
    }

    /// An empty walker over the same rules.
    pub(crate) fn scratch(&self) -> Walker<'r> {
        Walker::new(self.rules)
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.patches.is_empty()
    }

    pub(crate) fn into_patches(self) -> PatchList {
        self.patches
    }

    /// Compare two objects field by field, in ascending key order: keys of
    /// `a` first, then the keys only `b` has.
    pub(crate) fn diff_object(
        &mut self,
        selector: &Selector,
        a: &BTreeMap<String, Value>,
        b: &BTreeMap<String, Value>,
    ) -> DiffResult<()> {
        for (key, value_a) in a {
            let child = selector.key(key);
            match b.get(key) {
                Some(value_b) => self.diff_values(&child, value_a, value_b)?,
                None => self.emit_left(&child, value_a),
            }
        }

        for (key, value_b) in b {
            if !a.contains_key(key) {
                self.emit_right(&selector.key(key), value_b);
            }
        }

        Ok(())
    }

    // ---------------------------------------------------------------
    // Emission
    // ---------------------------------------------------------------

    pub(crate) fn emit_left(&mut self, selector: &Selector, a: &Value) {
        let s = selector.as_str();
        if self.rules.matches(s, RuleAction::Ignore).a {
            return;
        }
        if self.rules.matches(s, RuleAction::IgnoreIfZero).a && self.is_zero(s, a) {
            return;
        }
        self.patches
            .push(Patch::left_only(selector.clone(), a.to_json()));
    }

    pub(crate) fn emit_right(&mut self, selector: &Selector, b: &Value) {
        let s = selector.as_str();
        if self.rules.matches(s, RuleAction::Ignore).b {
            return;
        }
        if self.rules.matches(s, RuleAction::IgnoreIfZero).b && self.is_zero(s, b) {
            return;
        }
        self.patches
            .push(Patch::right_only(selector.clone(), b.to_json()));
    }

    pub(crate) fn emit_changed(&mut self, selector: &Selector, a: &Value, b: &Value) {
        let s = selector.as_str();
        if self.rules.matches(s, RuleAction::Ignore).any() {
            return;
        }
        let zero = self.rules.matches(s, RuleAction::IgnoreIfZero);
        if (zero.a && self.is_zero(s, a)) || (zero.b && self.is_zero(s, b)) {
            return;
        }
        self.patches
            .push(Patch::changed(selector.clone(), a.to_json(), b.to_json()));
    }

    fn is_zero(&self, selector: &str, value: &Value) -> bool {
        value.is_zero_with(self.rules.float_equal_fn(selector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jf_rules::RuleSide;

    fn obj(v: serde_json::Value) -> BTreeMap<String, Value> {
        match Value::from(v) {
            Value::Object(m) => m,
            other => panic!("expected object, got {other:?}"),
        }
    }

    fn run(rules: &RuleSet, a: serde_json::Value, b: serde_json::Value) -> PatchList {
        let mut walker = Walker::new(rules);
        walker
            .diff_object(&Selector::root(), &obj(a), &obj(b))
            .unwrap();
        walker.into_patches()
    }

    #[test]
    fn different_keys() {
        let rules = RuleSet::new();
        let patches = run(
            &rules,
            serde_json::json!({"numberA": 42}),
            serde_json::json!({"numberB": 42}),
        );
        assert_eq!(patches.len(), 2);
        assert_eq!(patches[0], Patch::left_only("numberA".into(), "42".into()));
        assert_eq!(patches[1], Patch::right_only("numberB".into(), "42".into()));
    }

    #[test]
    fn right_only_keys_come_after_shared_keys() {
        let rules = RuleSet::new();
        let patches = run(
            &rules,
            serde_json::json!({"b": 1, "d": 1}),
            serde_json::json!({"a": 2, "b": 2, "c": 2, "d": 1}),
        );
        let selectors: Vec<&str> = patches.iter().map(Patch::selector).collect();
        assert_eq!(selectors, vec!["b", "a", "c"]);
    }

    #[test]
    fn ignore_is_per_side() {
        let a = serde_json::json!({"id": 11});
        let b = serde_json::json!({"id": 11, "additional": 42});

        let rules = RuleSet::new().ignore(RuleSide::A, "additional").unwrap();
        let patches = run(&rules, a.clone(), b.clone());
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0], Patch::right_only("additional".into(), "42".into()));

        let rules = RuleSet::new().ignore(RuleSide::B, "additional").unwrap();
        assert!(run(&rules, a, b).is_empty());
    }

    #[test]
    fn ignore_either_side_drops_changed() {
        let rules = RuleSet::new().ignore(RuleSide::A, "^v$").unwrap();
        let patches = run(
            &rules,
            serde_json::json!({"v": 1}),
            serde_json::json!({"v": 2}),
        );
        assert!(patches.is_empty());
    }

    #[test]
    fn ignore_if_zero_only_drops_zero_values() {
        let rules = RuleSet::new().ignore_if_zero(RuleSide::A, ".*").unwrap();
        let patches = run(
            &rules,
            serde_json::json!({"zero": 0, "one": 1}),
            serde_json::json!({}),
        );
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].selector(), "one");
    }

    #[test]
    fn ignore_if_zero_on_changed() {
        let rules = RuleSet::new().ignore_if_zero(RuleSide::B, "^n$").unwrap();
        let patches = run(
            &rules,
            serde_json::json!({"n": 5}),
            serde_json::json!({"n": 0}),
        );
        assert!(patches.is_empty());

        let patches = run(
            &rules,
            serde_json::json!({"n": 0}),
            serde_json::json!({"n": 5}),
        );
        assert_eq!(patches.len(), 1);
    }

    #[test]
    fn null_counts_as_zero() {
        let rules = RuleSet::new().ignore_if_zero(RuleSide::B, ".*").unwrap();
        let patches = run(&rules, serde_json::json!({}), serde_json::json!({"k": null}));
        assert!(patches.is_empty());
    }

    #[test]
    fn float_zero_uses_selector_tolerance() {
        let rules = RuleSet::new()
            .ignore_if_zero(RuleSide::A, ".*")
            .unwrap()
            .float_tolerance("^f$", 0.1)
            .unwrap();
        let patches = run(
            &rules,
            serde_json::json!({"f": 0.05, "g": 0.05}),
            serde_json::json!({}),
        );
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].selector(), "g");
    }

    #[test]
    fn scratch_is_isolated() {
        let rules = RuleSet::new();
        let mut walker = Walker::new(&rules);
        walker.emit_left(&Selector::from("x"), &Value::Int(1));

        let mut scratch = walker.scratch();
        assert!(scratch.is_clean());
        scratch.emit_left(&Selector::from("y"), &Value::Int(2));

        let patches = walker.into_patches();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].selector(), "x");
    }
}
