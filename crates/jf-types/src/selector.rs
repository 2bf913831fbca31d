//! Textual addresses of nodes inside a JSON tree.
//!
//! The root is the empty string. An object field appends `.name` (no
//! separator at the root) and an array element appends `[idx]` (never a
//! separator). Selectors are built once per visited node, bottom-up from the
//! parent, and never mutated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dotted/bracketed address of a location within a JSON tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(String);

impl Selector {
    /// The root selector (`""`).
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns `true` if this is the root selector.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Selector of the object field `name` below this one.
    ///
    /// ```
    /// use jf_types::Selector;
    ///
    /// let data = Selector::root().key("data");
    /// assert_eq!(data.as_str(), "data");
    /// assert_eq!(data.key("name").as_str(), "data.name");
    /// ```
    pub fn key(&self, name: &str) -> Self {
        if self.is_root() {
            return Self(name.to_string());
        }
        let mut s = String::with_capacity(self.0.len() + 1 + name.len());
        s.push_str(&self.0);
        s.push('.');
        s.push_str(name);
        Self(s)
    }

    /// Selector of the array element `idx` below this one.
    ///
    /// ```
    /// use jf_types::Selector;
    ///
    /// assert_eq!(Selector::root().index(0).as_str(), "[0]");
    /// assert_eq!(Selector::root().key("ints").index(2).as_str(), "ints[2]");
    /// ```
    pub fn index(&self, idx: usize) -> Self {
        Self(format!("{}[{idx}]", self.0))
    }

    /// The selector text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the selector, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Selector {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Selector {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty() {
        let root = Selector::root();
        assert!(root.is_root());
        assert_eq!(root.as_str(), "");
        assert_eq!(root.to_string(), "");
    }

    #[test]
    fn key_at_root_has_no_separator() {
        assert_eq!(Selector::root().key("number").as_str(), "number");
    }

    #[test]
    fn nested_keys_are_dotted() {
        let s = Selector::root().key("key").key("subkey").key("name");
        assert_eq!(s.as_str(), "key.subkey.name");
    }

    #[test]
    fn index_never_adds_separator() {
        assert_eq!(Selector::root().index(3).as_str(), "[3]");
        assert_eq!(Selector::root().key("data").index(1).as_str(), "data[1]");
        assert_eq!(Selector::root().index(0).index(1).as_str(), "[0][1]");
    }

    #[test]
    fn mixed_path() {
        let s = Selector::root().key("data").index(0).key("name");
        assert_eq!(s.as_str(), "data[0].name");
    }

    #[test]
    fn keys_are_not_escaped() {
        let s = Selector::root().key("a.b").key("c[0]");
        assert_eq!(s.as_str(), "a.b.c[0]");
    }

    #[test]
    fn parent_is_unchanged() {
        let parent = Selector::root().key("p");
        let _child = parent.key("c");
        assert_eq!(parent.as_str(), "p");
    }

    #[test]
    fn serializes_as_plain_string() {
        let s = Selector::root().key("x").index(1);
        assert_eq!(serde_json::to_string(&s).unwrap(), r#""x[1]""#);
    }
}
