//! Variant groups and their entries.

use super::style_spec::StyleSpec;

/// What a single choice of a variant group resolves to.
///
/// Entries are classified once, when they are built, so resolution never has
/// to inspect their shape:
///
/// - a string becomes a [`Literal`](VariantEntry::Literal)
/// - a spec declaring variant groups becomes [`Nested`](VariantEntry::Nested)
/// - a spec without variant groups becomes [`Inert`](VariantEntry::Inert)
///
/// # Example
///
/// ```rust
/// use varistyle::{StyleSpec, VariantEntry, VariantGroup};
///
/// let literal: VariantEntry = "text-sm".into();
/// assert!(matches!(literal, VariantEntry::Literal(_)));
///
/// let nested: VariantEntry = StyleSpec::new()
///     .with_base("font-bold")
///     .with_variant("tone", VariantGroup::new().choice("loud", "uppercase"))
///     .into();
/// assert!(nested.is_nested());
///
/// // No variant groups: kept, but never resolved.
/// let inert: VariantEntry = StyleSpec::new().with_base("ignored").into();
/// assert!(matches!(inert, VariantEntry::Inert(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantEntry {
    /// A class name string, always contributed to the base channel.
    Literal(String),
    /// A sub-spec with its own variant groups, resolved recursively.
    Nested(StyleSpec),
    /// A sub-spec without variant groups. Its literals are never collected.
    Inert(StyleSpec),
    /// An explicit null choice. Contributes nothing.
    Empty,
}

impl VariantEntry {
    /// Returns true if resolution recurses into this entry.
    pub fn is_nested(&self) -> bool {
        matches!(self, VariantEntry::Nested(_))
    }

    /// Returns the literal if this entry is one.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            VariantEntry::Literal(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for VariantEntry {
    fn from(s: &str) -> Self {
        VariantEntry::Literal(s.to_string())
    }
}

impl From<String> for VariantEntry {
    fn from(s: String) -> Self {
        VariantEntry::Literal(s)
    }
}

impl From<StyleSpec> for VariantEntry {
    fn from(spec: StyleSpec) -> Self {
        if spec.has_variants() {
            VariantEntry::Nested(spec)
        } else {
            VariantEntry::Inert(spec)
        }
    }
}

impl<T: Into<VariantEntry>> From<Option<T>> for VariantEntry {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(VariantEntry::Empty)
    }
}

/// A named set of mutually exclusive choices, in declaration order.
///
/// Choice values are plain strings. A group whose choices are exactly
/// `"true"` and `"false"` is a boolean group: selections may pick it with a
/// `bool` (see [`Choice`](crate::Choice)).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantGroup {
    choices: Vec<(String, VariantEntry)>,
}

impl VariantGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a choice, returning the updated group for chaining.
    ///
    /// Re-declaring an existing choice replaces its entry in place.
    pub fn choice(mut self, value: impl Into<String>, entry: impl Into<VariantEntry>) -> Self {
        self.insert(value, entry);
        self
    }

    /// Adds or replaces a choice.
    pub fn insert(&mut self, value: impl Into<String>, entry: impl Into<VariantEntry>) {
        let value = value.into();
        let entry = entry.into();
        match self.choices.iter_mut().find(|(v, _)| *v == value) {
            Some(slot) => slot.1 = entry,
            None => self.choices.push((value, entry)),
        }
    }

    /// Looks up the entry for a choice value.
    pub fn get(&self, value: &str) -> Option<&VariantEntry> {
        self.choices
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, entry)| entry)
    }

    /// Iterates choices in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariantEntry)> {
        self.choices.iter().map(|(v, e)| (v.as_str(), e))
    }

    /// Returns true if the choices are exactly `"true"` and `"false"`.
    pub fn is_boolean(&self) -> bool {
        self.choices.len() == 2 && self.get("true").is_some() && self.get("false").is_some()
    }

    /// Number of choices.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Returns true if the group declares no choices.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for VariantGroup
where
    K: Into<String>,
    V: Into<VariantEntry>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut group = VariantGroup::new();
        for (value, entry) in iter {
            group.insert(value, entry);
        }
        group
    }
}
