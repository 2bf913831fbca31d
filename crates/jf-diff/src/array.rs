//! Array comparison: optional key ordering, order-insensitive matching, and
//! the positional fallback.

use std::cmp::Ordering;

use jf_rules::RuleAction;
use jf_types::{Selector, Value};
use tracing::trace;

use crate::error::DiffResult;
use crate::walker::Walker;

impl Walker<'_> {
    pub(crate) fn diff_array(&mut self, selector: &Selector, a: &[Value], b: &[Value]) -> DiffResult<()> {
        let rules = self.rules;
        let s = selector.as_str();

        let mut a: Vec<&Value> = a.iter().collect();
        let mut b: Vec<&Value> = b.iter().collect();
        if let Some(key) = rules.order_key(s) {
            trace!(selector = s, key, "sorting arrays by key");
            sort_by_key_field(&mut a, key);
            sort_by_key_field(&mut b, key);
        }

        if rules.matches_any(s, RuleAction::IgnoreOrder) && self.equal_ignoring_order(selector, &a, &b)? {
            return Ok(());
        }

        for idx in 0..a.len().max(b.len()) {
            let child = selector.index(idx);
            match (a.get(idx), b.get(idx)) {
                (Some(x), Some(y)) => self.diff_values(&child, x, y)?,
                (Some(x), None) => self.emit_left(&child, x),
                (None, Some(y)) => self.emit_right(&child, y),
                (None, None) => break,
            }
        }
        Ok(())
    }

    /// Greedy pairing: each element of `a` claims the first unclaimed element
    /// of `b` it compares equal to. Pairing does not backtrack, so some
    /// permutations that a full matching would accept are rejected.
    fn equal_ignoring_order(&self, selector: &Selector, a: &[&Value], b: &[&Value]) -> DiffResult<bool> {
        if a.len() != b.len() {
            return Ok(false);
        }

        let mut claimed = vec![false; b.len()];
        for (idx_a, x) in a.iter().enumerate() {
            let child = selector.index(idx_a);
            let mut paired = false;
            for (idx_b, y) in b.iter().enumerate() {
                if claimed[idx_b] {
                    continue;
                }
                let mut probe = self.scratch();
                probe.diff_values(&child, x, y)?;
                if probe.is_clean() {
                    claimed[idx_b] = true;
                    paired = true;
                    break;
                }
            }
            if !paired {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Stable sort by the value each element holds under `key`. Elements that
/// are not objects, or lack the key, keep their relative order after all
/// keyed elements.
fn sort_by_key_field(items: &mut [&Value], key: &str) {
    items.sort_by(|x, y| {
        let kx = x.as_object().and_then(|m| m.get(key));
        let ky = y.as_object().and_then(|m| m.get(key));
        match (kx, ky) {
            (Some(kx), Some(ky)) => cmp_sort_keys(kx, ky),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// Numbers first (numerically), then strings, then bools, then everything
/// else by its JSON text.
fn cmp_sort_keys(x: &Value, y: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Int(_) | Value::Float(_) => 0,
            Value::String(_) => 1,
            Value::Bool(_) => 2,
            _ => 3,
        }
    }

    match (x, y) {
        (Value::Int(p), Value::Int(q)) => p.cmp(q),
        (Value::String(p), Value::String(q)) => p.cmp(q),
        (Value::Bool(p), Value::Bool(q)) => p.cmp(q),
        _ => match (x.as_f64(), y.as_f64()) {
            (Some(p), Some(q)) => p.total_cmp(&q),
            _ => rank(x)
                .cmp(&rank(y))
                .then_with(|| x.to_json().cmp(&y.to_json())),
        },
    }
}
