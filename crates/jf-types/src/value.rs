//! The closed JSON value model walked by the diff engine.
//!
//! A [`Value`] is immutable once built from parsed input. Objects are kept in
//! a [`BTreeMap`], so field iteration is always in ascending key order and
//! never depends on the order fields had in the source text.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::TypeError;

/// One JSON node.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

/// The kind tag of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Every kind, in declaration order.
    pub const ALL: [ValueKind; 7] = [
        ValueKind::Null,
        ValueKind::Bool,
        ValueKind::Int,
        ValueKind::Float,
        ValueKind::String,
        ValueKind::Array,
        ValueKind::Object,
    ];

    /// Lowercase name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }

    /// Returns `true` for `Int` and `Float`.
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Int | ValueKind::Float)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Parse JSON text into a value tree.
    pub fn from_json_str(text: &str) -> Result<Self, TypeError> {
        let raw: serde_json::Value =
            serde_json::from_str(text).map_err(|e| TypeError::Parse(e.to_string()))?;
        Ok(Self::from(raw))
    }

    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric content widened to `f64`, for `Int` and `Float` only.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }

    /// The "empty" value of a kind: `0`, `0.0`, `""`, `false`, `[]`, `{}`.
    /// The empty value of `Null` is `Null`.
    pub fn empty_of(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Null => Value::Null,
            ValueKind::Bool => Value::Bool(false),
            ValueKind::Int => Value::Int(0),
            ValueKind::Float => Value::Float(0.0),
            ValueKind::String => Value::String(String::new()),
            ValueKind::Array => Value::Array(Vec::new()),
            ValueKind::Object => Value::Object(BTreeMap::new()),
        }
    }

    /// Whether this value is its kind's zero value.
    ///
    /// `Null` always counts as zero. Floats are compared against `0.0` with
    /// `float_eq`, so a tolerance configured for a selector also governs what
    /// counts as zero there.
    pub fn is_zero_with(&self, float_eq: &dyn Fn(f64, f64) -> bool) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Int(i) => *i == 0,
            Value::Float(f) => float_eq(*f, 0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(fields) => fields.is_empty(),
        }
    }

    /// Interpret text as a number: an integer, or a float when the text
    /// contains a `.`. Returns `None` if the text is not a number.
    ///
    /// ```
    /// use jf_types::Value;
    ///
    /// assert_eq!(Value::parse_number_str("1"), Some(Value::Int(1)));
    /// assert_eq!(Value::parse_number_str("11.11"), Some(Value::Float(11.11)));
    /// assert_eq!(Value::parse_number_str("a"), None);
    /// ```
    pub fn parse_number_str(text: &str) -> Option<Self> {
        if text.contains('.') {
            text.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Float)
        } else {
            text.parse::<i64>().ok().map(Value::Int)
        }
    }

    /// Canonical JSON text: strings quoted and escaped, numbers in their
    /// natural form, object keys sorted.
    pub fn to_json(&self) -> String {
        serde_json::Value::from(self).to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl From<serde_json::Value> for Value {
    fn from(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                // u64 above i64::MAX and every non-integral number
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn abs_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9
    }

    #[test]
    fn integral_numbers_are_ints() {
        assert_eq!(Value::from(json!(42)), Value::Int(42));
        assert_eq!(Value::from(json!(-7)), Value::Int(-7));
        assert_eq!(Value::from(json!(11.1)), Value::Float(11.1));
    }

    #[test]
    fn huge_unsigned_becomes_float() {
        let v = Value::from(json!(u64::MAX));
        assert_eq!(v.kind(), ValueKind::Float);
    }

    #[test]
    fn parse_nested_document() {
        let v = Value::from_json_str(r#"{"b": [1, "x", null], "a": {"c": true}}"#).unwrap();
        let fields = v.as_object().unwrap();
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(
            fields["b"],
            Value::Array(vec![Value::Int(1), Value::String("x".into()), Value::Null])
        );
    }

    #[test]
    fn parse_error_is_reported() {
        let err = Value::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, TypeError::Parse(_)));
    }

    #[test]
    fn canonical_json_text() {
        assert_eq!(Value::Int(42).to_json(), "42");
        assert_eq!(Value::Float(11.1).to_json(), "11.1");
        assert_eq!(Value::String("hello".into()).to_json(), r#""hello""#);
        assert_eq!(Value::String("a\"b".into()).to_json(), r#""a\"b""#);
        assert_eq!(Value::Bool(true).to_json(), "true");
        assert_eq!(Value::Null.to_json(), "null");

        let v = Value::from(json!({"z": 1, "a": [1, 2]}));
        assert_eq!(v.to_json(), r#"{"a":[1,2],"z":1}"#);
    }

    #[test]
    fn zero_values_for_every_kind() {
        for kind in ValueKind::ALL {
            assert!(Value::empty_of(kind).is_zero_with(&abs_eq), "{kind}");
        }
    }

    #[test]
    fn non_zero_values() {
        assert!(!Value::Bool(true).is_zero_with(&abs_eq));
        assert!(!Value::Int(1).is_zero_with(&abs_eq));
        assert!(!Value::Float(0.5).is_zero_with(&abs_eq));
        assert!(!Value::String(" ".into()).is_zero_with(&abs_eq));
        assert!(!Value::Array(vec![Value::Null]).is_zero_with(&abs_eq));
        assert!(!Value::from(json!({"k": 0})).is_zero_with(&abs_eq));
    }

    #[test]
    fn float_zero_respects_tolerance() {
        let loose = |a: f64, b: f64| (a - b).abs() <= 0.5;
        assert!(Value::Float(0.25).is_zero_with(&loose));
        assert!(!Value::Float(0.25).is_zero_with(&abs_eq));
    }

    #[test]
    fn number_strings() {
        assert_eq!(Value::parse_number_str("-3"), Some(Value::Int(-3)));
        assert_eq!(Value::parse_number_str("+3"), Some(Value::Int(3)));
        assert_eq!(Value::parse_number_str("1.5"), Some(Value::Float(1.5)));
        assert_eq!(Value::parse_number_str(""), None);
        assert_eq!(Value::parse_number_str("1e5"), None);
        assert_eq!(Value::parse_number_str("1.2.3"), None);
    }

    #[test]
    fn numeric_widening() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::String("3".into()).as_f64(), None);
        assert!(ValueKind::Int.is_numeric());
        assert!(!ValueKind::String.is_numeric());
    }

    #[test]
    fn kind_names() {
        assert_eq!(ValueKind::Object.to_string(), "object");
        assert_eq!(Value::Array(vec![]).kind(), ValueKind::Array);
    }
}
