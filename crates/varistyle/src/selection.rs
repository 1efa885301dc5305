//! Runtime selections: which choice is active for each variant group.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// A choice value, as looked up in a [`VariantGroup`](crate::VariantGroup).
///
/// Booleans map to `"true"`/`"false"` so boolean groups can be selected with
/// a `bool`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Choice(String);

impl Choice {
    /// The choice as it is looked up in a group.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Choice {
    fn from(s: &str) -> Self {
        Choice(s.to_string())
    }
}

impl From<String> for Choice {
    fn from(s: String) -> Self {
        Choice(s)
    }
}

impl From<&String> for Choice {
    fn from(s: &String) -> Self {
        Choice(s.clone())
    }
}

impl From<bool> for Choice {
    fn from(b: bool) -> Self {
        Choice(b.to_string())
    }
}

/// A flat map from variant group name to the active choice value.
///
/// One selection covers a whole spec tree: nested specs are resolved against
/// the same map, and lookups are by group name only. Entries naming groups
/// the spec does not declare are ignored.
///
/// # Example
///
/// ```rust
/// use varistyle::Selection;
///
/// let selection = Selection::new()
///     .with("size", "lg")
///     .with("disabled", false);
///
/// assert_eq!(selection.get("size"), Some("lg"));
/// assert_eq!(selection.get("disabled"), Some("false"));
/// assert_eq!(selection.get("tone"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    choices: HashMap<String, String>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the choice for a group, returning the updated selection.
    pub fn with(mut self, group: impl Into<String>, choice: impl Into<Choice>) -> Self {
        self.set(group, choice);
        self
    }

    /// Sets the choice for a group, replacing any previous one.
    pub fn set(&mut self, group: impl Into<String>, choice: impl Into<Choice>) {
        self.choices.insert(group.into(), choice.into().0);
    }

    /// Returns the active choice for a group.
    pub fn get(&self, group: &str) -> Option<&str> {
        self.choices.get(group).map(String::as_str)
    }

    /// Layers `other` on top of this selection; its choices win.
    pub fn merge(mut self, other: Selection) -> Self {
        self.choices.extend(other.choices);
        self
    }

    /// Iterates `(group, choice)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.choices.iter().map(|(g, c)| (g.as_str(), c.as_str()))
    }

    /// Number of groups with an active choice.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Returns true if no group has a choice.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Selection
where
    K: Into<String>,
    V: Into<Choice>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for (group, choice) in iter {
            selection.set(group, choice);
        }
        selection
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Selection
where
    K: Into<String>,
    V: Into<Choice>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Scalar forms accepted for a choice in serialized selections.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawChoice {
    Text(String),
    Flag(bool),
    Integer(i64),
    Float(f64),
}

impl From<RawChoice> for Choice {
    fn from(raw: RawChoice) -> Self {
        match raw {
            RawChoice::Text(s) => Choice(s),
            RawChoice::Flag(b) => b.into(),
            RawChoice::Integer(n) => Choice(n.to_string()),
            RawChoice::Float(n) => Choice(n.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, RawChoice>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
