//! Patches and the ordered patch list a diff call produces.

use std::fmt;

use jf_types::Selector;
use serde::Serialize;

/// Which sides of a patch hold a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatchKind {
    /// Present in the left tree only.
    LeftOnly,
    /// Present in the right tree only.
    RightOnly,
    /// Present in both trees, with unequal values.
    Changed,
}

/// One recorded difference.
///
/// Both representations are canonical JSON text. An absent side is `None`,
/// which is distinct from a present empty string (rendered `""`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Patch {
    selector: Selector,
    left: Option<String>,
    right: Option<String>,
}

impl Patch {
    pub fn left_only(selector: Selector, left: String) -> Self {
        Self {
            selector,
            left: Some(left),
            right: None,
        }
    }

    pub fn right_only(selector: Selector, right: String) -> Self {
        Self {
            selector,
            left: None,
            right: Some(right),
        }
    }

    pub fn changed(selector: Selector, left: String, right: String) -> Self {
        Self {
            selector,
            left: Some(left),
            right: Some(right),
        }
    }

    pub fn selector(&self) -> &str {
        self.selector.as_str()
    }

    /// Left representation, `""` when absent.
    pub fn left(&self) -> &str {
        self.left.as_deref().unwrap_or_default()
    }

    /// Right representation, `""` when absent.
    pub fn right(&self) -> &str {
        self.right.as_deref().unwrap_or_default()
    }

    pub fn left_value(&self) -> Option<&str> {
        self.left.as_deref()
    }

    pub fn right_value(&self) -> Option<&str> {
        self.right.as_deref()
    }

    pub fn kind(&self) -> PatchKind {
        match (&self.left, &self.right) {
            (Some(_), None) => PatchKind::LeftOnly,
            (None, Some(_)) => PatchKind::RightOnly,
            _ => PatchKind::Changed,
        }
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.selector, self.left(), self.right())
    }
}

/// Ordered differences produced by one diff call, in traversal order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PatchList {
    patches: Vec<Patch>,
}

impl PatchList {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, patch: Patch) {
        self.patches.push(patch);
    }

    /// Returns `true` if there are no differences.
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Patch> {
        self.patches.iter()
    }

    pub fn as_slice(&self) -> &[Patch] {
        &self.patches
    }

    /// Number of left-only patches.
    pub fn left_only(&self) -> usize {
        self.count(PatchKind::LeftOnly)
    }

    /// Number of right-only patches.
    pub fn right_only(&self) -> usize {
        self.count(PatchKind::RightOnly)
    }

    /// Number of both-sides patches.
    pub fn changed(&self) -> usize {
        self.count(PatchKind::Changed)
    }

    fn count(&self, kind: PatchKind) -> usize {
        self.patches.iter().filter(|p| p.kind() == kind).count()
    }
}

impl std::ops::Index<usize> for PatchList {
    type Output = Patch;

    fn index(&self, idx: usize) -> &Patch {
        &self.patches[idx]
    }
}

impl IntoIterator for PatchList {
    type Item = Patch;
    type IntoIter = std::vec::IntoIter<Patch>;

    fn into_iter(self) -> Self::IntoIter {
        self.patches.into_iter()
    }
}

impl<'a> IntoIterator for &'a PatchList {
    type Item = &'a Patch;
    type IntoIter = std::slice::Iter<'a, Patch>;

    fn into_iter(self) -> Self::IntoIter {
        self.patches.iter()
    }
}
