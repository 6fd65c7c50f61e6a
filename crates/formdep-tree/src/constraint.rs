//! # Constraint Tags
//!
//! The validation layer is represented here only at its interface
//! boundary: an ordered set of opaque constraint-kind tags on each
//! field. The engine never inspects a constraint beyond "is the
//! required-ness marker present" — [`ConstraintKind::NotBlank`] is
//! that marker.

use serde::{Deserialize, Serialize};

/// The closed set of constraint tags a field configuration can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// The required-ness marker: the value must not be empty.
    NotBlank,
    /// The value must not be null (blank strings pass).
    NotNull,
    /// The value must be a well-formed email address.
    Email,
    /// The value must satisfy a configured length range.
    Length,
}

impl ConstraintKind {
    /// The wire name of this constraint tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotBlank => "not_blank",
            Self::NotNull => "not_null",
            Self::Email => "email",
            Self::Length => "length",
        }
    }
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered, duplicate-free collection of constraint tags.
///
/// Insertion preserves first-insert order; inserting a tag that is
/// already present is a no-op. Small enough that a linear scan beats
/// any hashed structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConstraintSet(Vec<ConstraintKind>);

impl ConstraintSet {
    /// Create an empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, keeping the set duplicate-free.
    /// Returns `true` when the tag was newly added.
    pub fn insert(&mut self, kind: ConstraintKind) -> bool {
        if self.0.contains(&kind) {
            return false;
        }
        self.0.push(kind);
        true
    }

    /// Remove a tag. Returns `true` when the tag was present.
    pub fn remove(&mut self, kind: ConstraintKind) -> bool {
        let before = self.0.len();
        self.0.retain(|&k| k != kind);
        self.0.len() != before
    }

    /// Whether the tag is present.
    pub fn contains(&self, kind: ConstraintKind) -> bool {
        self.0.contains(&kind)
    }

    /// Tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = ConstraintKind> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ConstraintKind> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = ConstraintKind>>(iter: I) -> Self {
        let mut set = Self::new();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

// Deserializes as a plain sequence, then routes through `insert` so a
// wire payload with duplicates still yields a duplicate-free set.
impl<'de> Deserialize<'de> for ConstraintSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Vec::<ConstraintKind>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
