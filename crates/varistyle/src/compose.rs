//! Composing independently defined style functions.
//!
//! Merging does not combine specs structurally. Every merged function
//! resolves its own variant groups against the shared selection, so groups
//! with the same name in different functions both fire, in merge order.

use std::fmt;
use std::sync::Arc;

use crate::flatten::{flatten, Fragment};
use crate::selection::Selection;
use crate::style_fn::StyleFn;

/// Several style functions called with one selection and flattened together.
///
/// # Example
///
/// ```rust
/// use varistyle::{create_style_function, MergedStyleFunction, Selection, StyleSpec, VariantGroup};
///
/// let layout = create_style_function(
///     StyleSpec::new()
///         .with_base("flex")
///         .with_variant("size", VariantGroup::new().choice("lg", "gap-4")),
/// );
/// let text = create_style_function(
///     StyleSpec::new()
///         .with_base("font-sans")
///         .with_variant("size", VariantGroup::new().choice("lg", "text-lg")),
/// );
///
/// let card = MergedStyleFunction::new().with(layout).with(text);
/// let selection = Selection::from([("size", "lg")]);
/// assert_eq!(
///     card.call(Some(&selection), Some("shadow")),
///     "flex gap-4 font-sans text-lg shadow"
/// );
/// ```
#[derive(Clone, Default)]
pub struct MergedStyleFunction {
    parts: Vec<Arc<dyn StyleFn>>,
}

impl fmt::Debug for MergedStyleFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergedStyleFunction")
            .field("parts", &self.parts.len())
            .finish()
    }
}

impl MergedStyleFunction {
    /// Creates an empty merge, which always yields just the extra class name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a function, returning the updated merge for chaining.
    pub fn with(mut self, style: impl StyleFn + 'static) -> Self {
        self.push(style);
        self
    }

    /// Appends a function.
    pub fn push(&mut self, style: impl StyleFn + 'static) {
        self.parts.push(Arc::new(style));
    }

    /// Calls every merged function with `selection` and no extra class, then
    /// flattens their outputs in order with `class_name` last.
    pub fn call(&self, selection: Option<&Selection>, class_name: Option<&str>) -> String {
        let outputs = self
            .parts
            .iter()
            .map(|part| Fragment::from(part.call(selection, None)));
        flatten(outputs.chain(std::iter::once(Fragment::from(class_name))))
    }

    /// Number of merged functions.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if nothing has been merged yet.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl StyleFn for MergedStyleFunction {
    fn call(&self, selection: Option<&Selection>, class_name: Option<&str>) -> String {
        MergedStyleFunction::call(self, selection, class_name)
    }
}

impl<S: StyleFn + 'static> FromIterator<S> for MergedStyleFunction {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut merged = MergedStyleFunction::new();
        for style in iter {
            merged.push(style);
        }
        merged
    }
}

/// Merges style functions into one, in the given order.
///
/// For mixed function types, box them (`Box<dyn StyleFn>`) or chain
/// [`MergedStyleFunction::with`].
pub fn merge_style_functions<I>(functions: I) -> MergedStyleFunction
where
    I: IntoIterator,
    I::Item: StyleFn + 'static,
{
    functions.into_iter().collect()
}
