//! Fragment trees and whitespace-normalizing flattening.
//!
//! Resolution produces nested lists of class name fragments. Literals are
//! often written as indented multi-line strings for readability, so the
//! flattener collapses every whitespace run (newlines included) to a single
//! space and trims the ends:
//!
//! ```rust
//! use varistyle::{flatten, fragments};
//!
//! assert_eq!(flatten(["a", "b", "c"]), "a b c");
//! assert_eq!(flatten(fragments!["a", ["b", ["c", "d"]]]), "a b c d");
//! assert_eq!(flatten(["\n    px-2\n    py-1\n  "]), "px-2 py-1");
//! ```

/// A node in a fragment tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Fragment {
    /// A literal class name string, kept verbatim until normalization.
    Literal(String),
    /// A nested list of fragments, flattened in order.
    Group(Vec<Fragment>),
    /// Contributes nothing.
    #[default]
    Empty,
}

impl Fragment {
    fn collect<'a>(&'a self, acc: &mut Vec<&'a str>) {
        match self {
            Fragment::Literal(s) => acc.push(s),
            Fragment::Group(items) => {
                for item in items {
                    item.collect(acc);
                }
            }
            Fragment::Empty => {}
        }
    }
}

impl From<&str> for Fragment {
    fn from(s: &str) -> Self {
        Fragment::Literal(s.to_string())
    }
}

impl From<String> for Fragment {
    fn from(s: String) -> Self {
        Fragment::Literal(s)
    }
}

impl From<&String> for Fragment {
    fn from(s: &String) -> Self {
        Fragment::Literal(s.clone())
    }
}

impl<T: Into<Fragment>> From<Option<T>> for Fragment {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Fragment::Empty)
    }
}

impl<T: Into<Fragment>> From<Vec<T>> for Fragment {
    fn from(items: Vec<T>) -> Self {
        Fragment::Group(items.into_iter().map(Into::into).collect())
    }
}

/// Builds a `Vec<Fragment>` from a heterogeneous, arbitrarily nested list.
///
/// Items are literals, identifiers, nested `[...]` lists, or parenthesized
/// expressions convertible into [`Fragment`].
///
/// ```rust
/// use varistyle::{flatten, fragments, Fragment};
///
/// let extra: Option<&str> = None;
/// let tree = fragments!["btn", ["btn-sm", (extra)], (Fragment::Empty)];
/// assert_eq!(flatten(tree), "btn btn-sm");
/// ```
#[macro_export]
macro_rules! fragments {
    (@one [$($inner:tt),* $(,)?]) => {
        $crate::Fragment::Group(vec![$($crate::fragments!(@one $inner)),*])
    };
    (@one $item:tt) => {
        $crate::Fragment::from($item)
    };
    ($($item:tt),* $(,)?) => {
        vec![$($crate::fragments!(@one $item)),*]
    };
}

/// Flattens fragments into a single whitespace-normalized string.
///
/// Fragments are visited depth-first in order. The collected literals are
/// joined with spaces, every whitespace run collapses to one space, and the
/// result is trimmed. Empty input yields `""`.
pub fn flatten<I>(fragments: I) -> String
where
    I: IntoIterator,
    I::Item: Into<Fragment>,
{
    let fragments: Vec<Fragment> = fragments.into_iter().map(Into::into).collect();
    flatten_refs(&fragments)
}

/// Flattens borrowed fragments without cloning them.
pub fn flatten_refs<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a Fragment>,
{
    let mut acc = Vec::new();
    for fragment in fragments {
        fragment.collect(&mut acc);
    }
    normalize(&acc.join(" "))
}

/// Collapses every whitespace run to a single space and trims the ends.
///
/// Whitespace is the ECMAScript `\s` set: Unicode `White_Space` except
/// U+0085 (NEL), plus U+FEFF (BOM).
pub fn normalize(raw: &str) -> String {
    let tokens: Vec<&str> = raw.split(is_space).filter(|t| !t.is_empty()).collect();
    tokens.join(" ")
}

fn is_space(c: char) -> bool {
    match c {
        '\u{85}' => false,
        '\u{feff}' => true,
        c => c.is_whitespace(),
    }
}
