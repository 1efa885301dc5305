//! The declarative style spec tree.

use super::entry::VariantGroup;

/// A node of a style spec: a base literal, optional named field literals and
/// variant groups in declaration order.
///
/// Specs are plain owned trees, built once and then shared (read-only) by the
/// style functions wrapping them.
///
/// # Example
///
/// ```rust
/// use varistyle::{create_style_function, Selection, StyleSpec, VariantGroup};
///
/// let button = StyleSpec::new()
///     .with_base("inline-flex items-center")
///     .with_variant(
///         "size",
///         VariantGroup::new()
///             .choice("sm", "h-8 px-2")
///             .choice("lg", "h-12 px-6"),
///     )
///     .with_variant(
///         "disabled",
///         VariantGroup::new().choice("true", "opacity-50"),
///     );
///
/// let style = create_style_function(button);
/// let selection = Selection::new().with("size", "lg").with("disabled", true);
/// assert_eq!(
///     style.call(Some(&selection), Some("mt-4")),
///     "inline-flex items-center h-12 px-6 opacity-50 mt-4"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSpec {
    base: Option<String>,
    fields: Vec<(String, String)>,
    variants: Vec<(String, VariantGroup)>,
}

impl StyleSpec {
    /// Creates an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base literal, returning the updated spec for chaining.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Sets a named field literal (multi-field mode).
    ///
    /// Field literals are only collected by factories that declare the field.
    pub fn with_field(mut self, name: impl Into<String>, literal: impl Into<String>) -> Self {
        self.set_field(name, literal);
        self
    }

    /// Adds a variant group. Re-declaring a group replaces it in place.
    pub fn with_variant(mut self, name: impl Into<String>, group: VariantGroup) -> Self {
        self.set_variant(name, group);
        self
    }

    pub(crate) fn set_base(&mut self, base: Option<String>) {
        self.base = base;
    }

    pub(crate) fn set_field(&mut self, name: impl Into<String>, literal: impl Into<String>) {
        let name = name.into();
        let literal = literal.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = literal,
            None => self.fields.push((name, literal)),
        }
    }

    pub(crate) fn set_variant(&mut self, name: impl Into<String>, group: VariantGroup) {
        let name = name.into();
        match self.variants.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = group,
            None => self.variants.push((name, group)),
        }
    }

    /// Returns the base literal, if set.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Returns the literal for a named field, if this node defines one.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, literal)| literal.as_str())
    }

    /// Iterates field literals in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, l)| (n.as_str(), l.as_str()))
    }

    /// Looks up a variant group by name.
    pub fn variant(&self, name: &str) -> Option<&VariantGroup> {
        self.variants
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, group)| group)
    }

    /// Iterates variant groups in declaration order.
    pub fn variants(&self) -> impl Iterator<Item = (&str, &VariantGroup)> {
        self.variants.iter().map(|(n, g)| (n.as_str(), g))
    }

    /// Returns true if this node declares at least one variant group.
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Returns true if the node carries no literals and no variant groups.
    pub fn is_empty(&self) -> bool {
        self.base.is_none() && self.fields.is_empty() && self.variants.is_empty()
    }
}
