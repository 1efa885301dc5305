//! Variant resolution: walking a spec tree with a selection.
//!
//! Resolution fills one fragment list per output channel in a single walk.
//! The base channel always exists; every declared field adds one more. The
//! single-field case is simply the walk with no declared fields.
//!
//! At each visited node:
//!
//! 1. The node's `base` literal goes to the base channel, then each declared
//!    field's literal goes to that field's channel.
//! 2. If a selection is given, each variant group is visited in declaration
//!    order. A selected literal goes to the base channel; a selected nested
//!    spec is visited recursively with the same channels and selection.
//!
//! Unknown groups, unknown choices, inert sub-specs and empty entries
//! contribute nothing.

use log::trace;

use crate::flatten::Fragment;
use crate::selection::Selection;
use crate::spec::{StyleSpec, VariantEntry};

/// Per-channel fragments produced by [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    base: Vec<Fragment>,
    fields: Vec<(String, Vec<Fragment>)>,
}

impl Resolved {
    fn with_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        Self {
            base: Vec::new(),
            fields: fields
                .iter()
                .map(|name| (name.as_ref().to_string(), Vec::new()))
                .collect(),
        }
    }

    /// Fragments collected for the base channel.
    pub fn base(&self) -> &[Fragment] {
        &self.base
    }

    /// Fragments collected for a declared field.
    pub fn field(&self, name: &str) -> Option<&[Fragment]> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, fragments)| fragments.as_slice())
    }

    /// Iterates declared fields and their fragments in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[Fragment])> {
        self.fields
            .iter()
            .map(|(n, fragments)| (n.as_str(), fragments.as_slice()))
    }

    /// Splits into the base channel and the field channels.
    pub fn into_parts(self) -> (Vec<Fragment>, Vec<(String, Vec<Fragment>)>) {
        (self.base, self.fields)
    }

    fn visit(&mut self, spec: &StyleSpec, selection: Option<&Selection>) {
        self.base.push(spec.base().into());
        for (name, fragments) in &mut self.fields {
            fragments.push(spec.field(name).into());
        }

        let Some(selection) = selection else {
            return;
        };

        for (group_name, group) in spec.variants() {
            let Some(choice) = selection.get(group_name) else {
                continue;
            };
            match group.get(choice) {
                Some(VariantEntry::Literal(literal)) => {
                    self.base.push(Fragment::from(literal));
                }
                Some(VariantEntry::Nested(nested)) => self.visit(nested, Some(selection)),
                Some(VariantEntry::Inert(_)) => {
                    trace!(
                        "choice '{}' of group '{}' has no variant groups, skipped",
                        choice,
                        group_name
                    );
                }
                Some(VariantEntry::Empty) => {}
                None => {
                    trace!("group '{}' has no choice '{}'", group_name, choice);
                }
            }
        }
    }
}

/// Resolves `spec` against `selection`, collecting the base channel plus one
/// channel per name in `fields`.
///
/// # Example
///
/// ```rust
/// use varistyle::{flatten_refs, resolve, Selection, StyleSpec, VariantGroup};
///
/// let spec = StyleSpec::new()
///     .with_base("menu")
///     .with_field("item", "menu-item")
///     .with_variant(
///         "dense",
///         VariantGroup::new().choice(
///             "true",
///             StyleSpec::new()
///                 .with_field("item", "py-0")
///                 .with_variant("size", VariantGroup::new().choice("sm", "text-xs")),
///         ),
///     );
///
/// let selection = Selection::new().with("dense", true).with("size", "sm");
/// let resolved = resolve(&["item"], &spec, Some(&selection));
///
/// assert_eq!(flatten_refs(resolved.base()), "menu text-xs");
/// assert_eq!(flatten_refs(resolved.field("item").unwrap()), "menu-item py-0");
/// ```
pub fn resolve<S: AsRef<str>>(
    fields: &[S],
    spec: &StyleSpec,
    selection: Option<&Selection>,
) -> Resolved {
    let mut resolved = Resolved::with_fields(fields);
    resolved.visit(spec, selection);
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten_refs;
    use crate::spec::VariantGroup;

    const NO_FIELDS: &[&str] = &[];

    fn deep_spec() -> StyleSpec {
        StyleSpec::new().with_base("base-style").with_variant(
            "a",
            VariantGroup::new().choice("aFoo", "foo-style").choice(
                "aBar",
                StyleSpec::new().with_base("bar-style").with_variant(
                    "b",
                    VariantGroup::new()
                        .choice("bFoo", "foo-style")
                        .choice("bBaz", "baz-style"),
                ),
            ),
        )
    }

    #[test]
    fn test_resolve_base_only() {
        let spec = StyleSpec::new().with_base("x");
        let resolved = resolve(NO_FIELDS, &spec, None);
        assert_eq!(flatten_refs(resolved.base()), "x");
        assert_eq!(resolved.fields().count(), 0);
    }

    #[test]
    fn test_resolve_without_selection_skips_variants() {
        let spec = StyleSpec::new()
            .with_base("base")
            .with_variant("v", VariantGroup::new().choice("foo", "f"));
        assert_eq!(flatten_refs(resolve(NO_FIELDS, &spec, None).base()), "base");
    }

    #[test]
    fn test_resolve_nested_follows_selection() {
        let spec = deep_spec();

        let shallow = Selection::from([("a", "aFoo"), ("b", "bBaz")]);
        assert_eq!(
            flatten_refs(resolve(NO_FIELDS, &spec, Some(&shallow)).base()),
            "base-style foo-style"
        );

        let deep = Selection::from([("a", "aBar"), ("b", "bBaz")]);
        assert_eq!(
            flatten_refs(resolve(NO_FIELDS, &spec, Some(&deep)).base()),
            "base-style bar-style baz-style"
        );
    }

    #[test]
    fn test_resolve_inert_entry_contributes_nothing() {
        let leaf = StyleSpec::new().with_base("never");
        let spec = StyleSpec::new()
            .with_base("root")
            .with_variant("a", VariantGroup::new().choice("leaf", leaf));
        let selection = Selection::from([("a", "leaf")]);
        assert_eq!(
            flatten_refs(resolve(NO_FIELDS, &spec, Some(&selection)).base()),
            "root"
        );
    }

    #[test]
    fn test_resolve_records_every_field() {
        let spec = StyleSpec::new().with_base("b");
        let resolved = resolve(&["item", "icon"], &spec, None);
        let names: Vec<&str> = resolved.fields().map(|(n, _)| n).collect();
        assert_eq!(names, ["item", "icon"]);
        assert_eq!(
            resolved.field("item").map(flatten_refs),
            Some(String::new())
        );
    }

    #[test]
    fn test_resolve_variant_literals_only_reach_base() {
        let spec = StyleSpec::new()
            .with_field("item", "i")
            .with_variant("v", VariantGroup::new().choice("x", "lit"));
        let selection = Selection::from([("v", "x")]);
        let resolved = resolve(&["item"], &spec, Some(&selection));
        assert_eq!(flatten_refs(resolved.base()), "lit");
        assert_eq!(
            resolved.field("item").map(flatten_refs).as_deref(),
            Some("i")
        );
    }

    #[test]
    fn test_resolve_keeps_nested_field_contributions() {
        let spec = StyleSpec::new()
            .with_base("base-style")
            .with_field("item", "base-item")
            .with_variant(
                "foo",
                VariantGroup::new()
                    .choice(
                        "a",
                        StyleSpec::new()
                            .with_field("item", "base-item-a")
                            .with_variant("bar", VariantGroup::new().choice("b", "bar")),
                    )
                    .choice("b", StyleSpec::new().with_field("item", "base-item-b")),
            );

        let selection = Selection::from([("foo", "a"), ("bar", "b")]);
        let resolved = resolve(&["item"], &spec, Some(&selection));
        assert_eq!(flatten_refs(resolved.base()), "base-style bar");
        assert_eq!(
            resolved.field("item").map(flatten_refs).as_deref(),
            Some("base-item base-item-a")
        );

        let inert = Selection::from([("foo", "b")]);
        let resolved = resolve(&["item"], &spec, Some(&inert));
        assert_eq!(
            resolved.field("item").map(flatten_refs).as_deref(),
            Some("base-item")
        );
    }

    #[test]
    fn test_resolve_same_group_name_at_two_depths() {
        let spec = StyleSpec::new().with_variant(
            "size",
            VariantGroup::new().choice(
                "lg",
                StyleSpec::new()
                    .with_base("outer-lg")
                    .with_variant("size", VariantGroup::new().choice("lg", "inner-lg")),
            ),
        );
        let selection = Selection::from([("size", "lg")]);
        assert_eq!(
            flatten_refs(resolve(NO_FIELDS, &spec, Some(&selection)).base()),
            "outer-lg inner-lg"
        );
    }

    #[test]
    fn test_resolve_into_parts() {
        let spec = StyleSpec::new().with_base("b").with_field("item", "i");
        let (base, fields) = resolve(&["item"], &spec, None).into_parts();
        assert_eq!(flatten_refs(&base), "b");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "item");
    }
}
