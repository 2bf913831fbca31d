//! Value comparison at a single selector.
//!
//! Order of evaluation:
//!
//! 1. null coercion (switches to the coerced comparison)
//! 2. string-number parsing
//! 3. custom-equal predicate
//! 4. int/float widening
//! 5. kind mismatch
//! 6. per-kind comparison, recursing into arrays and objects

use std::borrow::Cow;

use jf_rules::{RuleAction, SideMatch};
use jf_types::{Selector, Value};

use crate::error::{DiffError, DiffResult};
use crate::walker::Walker;

impl Walker<'_> {
    pub(crate) fn diff_values(&mut self, selector: &Selector, a: &Value, b: &Value) -> DiffResult<()> {
        let rules = self.rules;
        let s = selector.as_str();

        let coerce = rules.matches(s, RuleAction::CoerceNull);
        if (coerce.a && a.is_null()) || (coerce.b && b.is_null()) {
            return self.diff_coerced(selector, a, b, coerce);
        }

        let (a, b) = if rules.matches_any(s, RuleAction::StringNumber) {
            (number_or_self(a), number_or_self(b))
        } else {
            (Cow::Borrowed(a), Cow::Borrowed(b))
        };
        let (a, b) = (&*a, &*b);

        if let Some(eq) = rules.custom_equal_fn(s) {
            if !eq(s, a, b) {
                self.emit_changed(selector, a, b);
            }
            return Ok(());
        }

        self.compare(selector, a, b, (a, b))
    }

    /// Comparison when a coercing side holds `null`: that side stands in as
    /// the empty value of the other side's kind. Patches still show the
    /// raw values.
    fn diff_coerced(
        &mut self,
        selector: &Selector,
        a: &Value,
        b: &Value,
        coerce: SideMatch,
    ) -> DiffResult<()> {
        let effective_a = if coerce.a && a.is_null() {
            Cow::Owned(Value::empty_of(b.kind()))
        } else {
            Cow::Borrowed(a)
        };
        let effective_b = if coerce.b && b.is_null() {
            Cow::Owned(Value::empty_of(a.kind()))
        } else {
            Cow::Borrowed(b)
        };
        self.compare(selector, &effective_a, &effective_b, (a, b))
    }

    /// Kind dispatch. `shown` are the values patches report.
    fn compare(
        &mut self,
        selector: &Selector,
        a: &Value,
        b: &Value,
        shown: (&Value, &Value),
    ) -> DiffResult<()> {
        let equal = match (a, b) {
            (Value::Null, Value::Null) => true,
            (Value::Float(_), Value::Float(_) | Value::Int(_)) | (Value::Int(_), Value::Float(_)) => {
                let eq = self.rules.float_equal_fn(selector.as_str());
                match (a.as_f64(), b.as_f64()) {
                    (Some(x), Some(y)) => eq(x, y),
                    _ => false,
                }
            }
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Int(x), Value::Int(y)) => x == y,
            (Value::String(x), Value::String(y)) => x == y,
            (Value::Array(x), Value::Array(y)) => return self.diff_array(selector, x, y),
            (Value::Object(x), Value::Object(y)) => return self.diff_object(selector, x, y),
            _ if a.kind() != b.kind() => false,
            _ => {
                return Err(DiffError::UnsupportedType {
                    selector: selector.to_string(),
                    kind: a.kind(),
                })
            }
        };

        if !equal {
            self.emit_changed(selector, shown.0, shown.1);
        }
        Ok(())
    }
}

fn number_or_self(value: &Value) -> Cow<'_, Value> {
    match value {
        Value::String(text) => match Value::parse_number_str(text) {
            Some(number) => Cow::Owned(number),
            None => Cow::Borrowed(value),
        },
        _ => Cow::Borrowed(value),
    }
}
