//! Style functions: specs wrapped behind a callable contract.
//!
//! - [`StyleFunction`]: `(selection?, class_name?) -> String`
//! - [`MultiFieldStyleFunction`]: `(selection?, class_name?) -> StyleOutput`,
//!   built by a [`StyleFactory`] that declares the extra output fields.
//!
//! The single-field function is the zero-field multi-field function keeping
//! only `className`, so both modes share one resolution path.

use std::fmt;
use std::sync::Arc;

use log::warn;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Result, SpecError};
use crate::flatten::{flatten_refs, Fragment};
use crate::resolve::resolve;
use crate::selection::Selection;
use crate::spec::StyleSpec;

/// Field names the output structure or the spec format already uses.
pub const RESERVED_FIELDS: &[&str] = &["base", "variants", "className"];

/// Anything that turns a selection and an extra class name into a class
/// string. Implemented by [`StyleFunction`], by
/// [`MergedStyleFunction`](crate::MergedStyleFunction), and by closures
/// wrapped with [`from_fn`].
pub trait StyleFn: Send + Sync {
    fn call(&self, selection: Option<&Selection>, class_name: Option<&str>) -> String;
}

impl<T: StyleFn + ?Sized> StyleFn for Box<T> {
    fn call(&self, selection: Option<&Selection>, class_name: Option<&str>) -> String {
        (**self).call(selection, class_name)
    }
}

impl<T: StyleFn + ?Sized> StyleFn for Arc<T> {
    fn call(&self, selection: Option<&Selection>, class_name: Option<&str>) -> String {
        (**self).call(selection, class_name)
    }
}

/// A [`StyleFn`] backed by a closure. See [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F>(F);

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FromFn(..)")
    }
}

impl<F> StyleFn for FromFn<F>
where
    F: Fn(Option<&Selection>, Option<&str>) -> String + Send + Sync,
{
    fn call(&self, selection: Option<&Selection>, class_name: Option<&str>) -> String {
        (self.0)(selection, class_name)
    }
}

/// Wraps a closure as a [`StyleFn`], e.g. to merge hand-written logic with
/// spec-driven functions.
///
/// ```rust
/// use varistyle::{from_fn, StyleFn};
///
/// let focus = from_fn(|selection, _class| {
///     match selection.and_then(|s| s.get("focus")) {
///         Some("true") => "ring-2".to_string(),
///         _ => String::new(),
///     }
/// });
/// assert_eq!(focus.call(None, None), "");
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(Option<&Selection>, Option<&str>) -> String + Send + Sync,
{
    FromFn(f)
}

/// Output of a [`MultiFieldStyleFunction`]: the `className` string plus one
/// string per declared field.
///
/// Serializes as a map with `className` first, then the fields in declared
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOutput {
    class_name: String,
    fields: Vec<(String, String)>,
}

impl StyleOutput {
    /// The base channel plus the extra class name.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The flattened string for a declared field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    /// Looks up an output key; `"className"` names the class name.
    pub fn get(&self, key: &str) -> Option<&str> {
        if key == "className" {
            Some(&self.class_name)
        } else {
            self.field(key)
        }
    }

    /// Iterates declared fields in order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Consumes the output, keeping only `className`.
    pub fn into_class_name(self) -> String {
        self.class_name
    }
}

impl Serialize for StyleOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("className", &self.class_name)?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Builds multi-field style functions for a fixed list of field names.
///
/// # Example
///
/// ```rust
/// use varistyle::{build_style_function_factory, StyleSpec};
///
/// let factory = build_style_function_factory(["item"]);
/// let style = factory.create(
///     StyleSpec::new()
///         .with_base("base-style")
///         .with_field("item", "base-item"),
/// );
///
/// let output = style.call(None, Some("extra"));
/// assert_eq!(output.class_name(), "base-style extra");
/// assert_eq!(output.field("item"), Some("base-item"));
/// ```
#[derive(Debug, Clone)]
pub struct StyleFactory {
    fields: Arc<[String]>,
}

impl Default for StyleFactory {
    fn default() -> Self {
        Self {
            fields: Arc::from(Vec::new()),
        }
    }
}

impl StyleFactory {
    /// Creates a factory, dropping reserved and duplicate field names.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut accepted: Vec<String> = Vec::new();
        for name in fields {
            let name = name.into();
            if RESERVED_FIELDS.contains(&name.as_str()) {
                warn!("field name '{}' is reserved, ignored", name);
            } else if accepted.contains(&name) {
                warn!("field name '{}' declared twice, ignored", name);
            } else {
                accepted.push(name);
            }
        }
        Self {
            fields: accepted.into(),
        }
    }

    /// Creates a factory, rejecting reserved field names.
    ///
    /// Duplicate names are collapsed to their first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ReservedField`] for `base`, `variants` or
    /// `className`.
    pub fn try_new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut accepted: Vec<String> = Vec::new();
        for name in fields {
            let name = name.into();
            if RESERVED_FIELDS.contains(&name.as_str()) {
                return Err(SpecError::ReservedField { name });
            }
            if !accepted.contains(&name) {
                accepted.push(name);
            }
        }
        Ok(Self {
            fields: accepted.into(),
        })
    }

    /// Declared field names, in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Wraps a spec in a multi-field style function.
    pub fn create(&self, spec: impl Into<Arc<StyleSpec>>) -> MultiFieldStyleFunction {
        MultiFieldStyleFunction {
            spec: spec.into(),
            fields: Arc::clone(&self.fields),
        }
    }
}

/// A spec bound to a list of output fields.
#[derive(Debug, Clone)]
pub struct MultiFieldStyleFunction {
    spec: Arc<StyleSpec>,
    fields: Arc<[String]>,
}

impl MultiFieldStyleFunction {
    /// Resolves the spec into `className` plus one string per field.
    ///
    /// `class_name` is appended to `className` only; field strings never
    /// include it.
    pub fn call(&self, selection: Option<&Selection>, class_name: Option<&str>) -> StyleOutput {
        let resolved = resolve(&self.fields[..], &self.spec, selection);
        let (base, fields) = resolved.into_parts();
        let extra = Fragment::from(class_name);

        StyleOutput {
            class_name: flatten_refs(base.iter().chain(std::iter::once(&extra))),
            fields: fields
                .into_iter()
                .map(|(name, fragments)| {
                    let value = flatten_refs(&fragments);
                    (name, value)
                })
                .collect(),
        }
    }

    /// The wrapped spec.
    pub fn spec(&self) -> &StyleSpec {
        &self.spec
    }

    /// Declared field names, in output order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// A spec wrapped as a single-string style function.
///
/// Cheap to clone; the spec is shared.
#[derive(Debug, Clone)]
pub struct StyleFunction {
    inner: MultiFieldStyleFunction,
}

impl StyleFunction {
    /// Wraps a spec; same as [`create_style_function`].
    pub fn new(spec: impl Into<Arc<StyleSpec>>) -> Self {
        Self {
            inner: StyleFactory::default().create(spec),
        }
    }

    /// Resolves the spec and appends `class_name`.
    pub fn call(&self, selection: Option<&Selection>, class_name: Option<&str>) -> String {
        self.inner.call(selection, class_name).into_class_name()
    }

    /// Shorthand for `call(Some(selection), None)`.
    pub fn select(&self, selection: &Selection) -> String {
        self.call(Some(selection), None)
    }

    /// The wrapped spec.
    pub fn spec(&self) -> &StyleSpec {
        self.inner.spec()
    }
}

impl StyleFn for StyleFunction {
    fn call(&self, selection: Option<&Selection>, class_name: Option<&str>) -> String {
        StyleFunction::call(self, selection, class_name)
    }
}

/// Wraps a spec in a single-field style function.
///
/// # Example
///
/// ```rust
/// use varistyle::{create_style_function, Selection, StyleSpec, VariantGroup};
///
/// let style = create_style_function(
///     StyleSpec::new()
///         .with_base("base")
///         .with_variant("variant", VariantGroup::new().choice("foo", "f").choice("bar", "b")),
/// );
///
/// assert_eq!(style.select(&Selection::from([("variant", "foo")])), "base f");
/// assert_eq!(style.select(&Selection::from([("variant", "qux")])), "base");
/// assert_eq!(style.call(None, Some("y")), "base y");
/// ```
pub fn create_style_function(spec: impl Into<Arc<StyleSpec>>) -> StyleFunction {
    StyleFunction::new(spec)
}

/// Creates a factory for multi-field style functions with the given fields.
///
/// Reserved (`base`, `variants`, `className`) and duplicate names are
/// dropped with a warning; use [`StyleFactory::try_new`] to reject them.
pub fn build_style_function_factory<I, S>(fields: I) -> StyleFactory
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    StyleFactory::new(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::VariantGroup;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_style_functions_are_send_sync() {
        assert_send_sync::<StyleFunction>();
        assert_send_sync::<MultiFieldStyleFunction>();
        assert_send_sync::<StyleFactory>();
    }

    #[test]
    fn test_style_function_base_only() {
        let style = create_style_function(StyleSpec::new().with_base("base-style"));
        assert_eq!(style.call(None, None), "base-style");
        assert_eq!(style.call(None, Some("test")), "base-style test");
        assert_eq!(
            style.call(Some(&Selection::new()), Some("test")),
            "base-style test"
        );
    }

    #[test]
    fn test_style_function_ignores_field_literals() {
        let spec = StyleSpec::new().with_base("b").with_field("item", "i");
        let style = create_style_function(spec);
        assert_eq!(style.call(None, None), "b");
    }

    #[test]
    fn test_style_function_shares_spec() {
        let spec = Arc::new(StyleSpec::new().with_base("shared"));
        let first = create_style_function(Arc::clone(&spec));
        let second = first.clone();
        assert!(std::ptr::eq(first.spec(), second.spec()));
        assert_eq!(Arc::strong_count(&spec), 3);
    }

    #[test]
    fn test_factory_drops_reserved_and_duplicates() {
        let factory = build_style_function_factory(["item", "base", "icon", "item", "className"]);
        assert_eq!(factory.fields(), ["item".to_string(), "icon".to_string()]);
    }

    #[test]
    fn test_factory_try_new_rejects_reserved() {
        let err = StyleFactory::try_new(["item", "variants"]).unwrap_err();
        assert_eq!(
            err,
            SpecError::ReservedField {
                name: "variants".to_string(),
            }
        );
        assert!(StyleFactory::try_new(["item", "item"]).is_ok());
    }

    #[test]
    fn test_multi_field_output_keys() {
        let style = build_style_function_factory(["item", "icon"]).create(
            StyleSpec::new()
                .with_base("base-style")
                .with_field("item", "base-item"),
        );
        let output = style.call(None, None);
        assert_eq!(output.class_name(), "base-style");
        assert_eq!(output.field("item"), Some("base-item"));
        assert_eq!(output.field("icon"), Some(""));
        assert_eq!(output.field("label"), None);
        assert_eq!(output.get("className"), Some("base-style"));
        let keys: Vec<&str> = output.fields().map(|(k, _)| k).collect();
        assert_eq!(keys, ["item", "icon"]);
    }

    #[test]
    fn test_multi_field_extra_class_only_on_class_name() {
        let style = build_style_function_factory(["item"]).create(
            StyleSpec::new()
                .with_base("b")
                .with_field("item", "i")
                .with_variant("v", VariantGroup::new().choice("x", "vx")),
        );
        let selection = Selection::from([("v", "x")]);
        let output = style.call(Some(&selection), Some("extra"));
        assert_eq!(output.class_name(), "b vx extra");
        assert_eq!(output.field("item"), Some("i"));
    }

    #[test]
    fn test_from_fn_style() {
        let upper = from_fn(|_, class_name: Option<&str>| {
            let text = class_name.unwrap_or_default();
            text.to_uppercase()
        });
        assert_eq!(upper.call(None, Some("abc")), "ABC");

        let boxed: Box<dyn StyleFn> = Box::new(upper);
        assert_eq!(boxed.call(None, Some("x")), "X");
    }
}
