//! # Varistyle - Variant-Driven Class Name Composition
//!
//! `varistyle` composes whitespace-normalized class name strings from
//! declarative style specs. A spec holds a base string plus named variant
//! groups; each group maps choice values to either a literal or a nested spec.
//! At call time a [`Selection`] says which choice is active per group, and the
//! engine resolves, recurses and flattens everything into one string.
//!
//! ## Core Concepts
//!
//! - [`StyleSpec`]: the spec tree (base literal, field literals, variant groups)
//! - [`VariantGroup`] / [`VariantEntry`]: choices and what they resolve to
//! - [`Selection`]: the active choice per group, shared by the whole tree
//! - [`StyleFunction`]: a spec behind `(selection?, class_name?) -> String`
//! - [`StyleFactory`]: builds [`MultiFieldStyleFunction`]s producing one string
//!   per declared field in addition to `className`
//! - [`MergedStyleFunction`]: several style functions called together
//! - [`flatten`]: the whitespace-normalizing flattener used throughout
//!
//! ## Quick Start
//!
//! ```rust
//! use varistyle::{create_style_function, Selection, StyleSpec, VariantGroup};
//!
//! let button = create_style_function(
//!     StyleSpec::new()
//!         .with_base(
//!             r#"
//!             inline-flex items-center
//!             rounded-md font-medium
//!             "#,
//!         )
//!         .with_variant(
//!             "intent",
//!             VariantGroup::new()
//!                 .choice("primary", "bg-blue-600 text-white")
//!                 .choice("ghost", "bg-transparent"),
//!         ),
//! );
//!
//! let selection = Selection::new().with("intent", "primary");
//! assert_eq!(
//!     button.call(Some(&selection), Some("w-full")),
//!     "inline-flex items-center rounded-md font-medium bg-blue-600 text-white w-full"
//! );
//! ```
//!
//! ## Nested Variants
//!
//! A choice can carry its own spec with further variant groups. It is resolved
//! against the same selection. A nested spec without variant groups is kept
//! but never resolved:
//!
//! ```rust
//! use varistyle::{create_style_function, Selection, StyleSpec};
//!
//! let style = create_style_function(StyleSpec::from_yaml(r#"
//! base: base-style
//! variants:
//!   a:
//!     aFoo: foo-style
//!     aBar:
//!       base: bar-style
//!       variants:
//!         b:
//!           bFoo: foo-style
//!           bBaz: baz-style
//! "#).unwrap());
//!
//! let selection = Selection::from([("a", "aBar"), ("b", "bBaz")]);
//! assert_eq!(style.select(&selection), "base-style bar-style baz-style");
//! ```
//!
//! ## Multiple Fields
//!
//! ```rust
//! use varistyle::{build_style_function_factory, Selection, StyleSpec};
//!
//! let menu = build_style_function_factory(["item"]).create(StyleSpec::from_yaml(r#"
//! base: menu
//! item: menu-item
//! variants:
//!   dense:
//!     true:
//!       item: py-0
//!       variants:
//!         size:
//!           sm: text-xs
//! "#).unwrap());
//!
//! let output = menu.call(Some(&Selection::new().with("dense", true).with("size", "sm")), Some("shadow"));
//! assert_eq!(output.class_name(), "menu text-xs shadow");
//! assert_eq!(output.field("item"), Some("menu-item py-0"));
//! ```
//!
//! ## Short Aliases
//!
//! [`fs`], [`cs`], [`bcs`] and [`ms`] are aliases of [`flatten`],
//! [`create_style_function`], [`build_style_function_factory`] and
//! [`merge_style_functions`].

mod compose;
mod error;
mod flatten;
mod resolve;
mod selection;
pub mod spec;
mod style_fn;

// Error type
pub use error::{Result, SpecError};

// Fragments and flattening
pub use flatten::{flatten, flatten_refs, normalize, Fragment};

// Spec tree
pub use spec::{StyleSpec, VariantEntry, VariantGroup, SPEC_EXTENSIONS};

// Selections
pub use selection::{Choice, Selection};

// Resolution
pub use resolve::{resolve, Resolved};

// Style functions
pub use style_fn::{
    build_style_function_factory, create_style_function, from_fn, FromFn, MultiFieldStyleFunction,
    StyleFactory, StyleFn, StyleFunction, StyleOutput, RESERVED_FIELDS,
};

// Composition
pub use compose::{merge_style_functions, MergedStyleFunction};

// Short aliases
pub use compose::merge_style_functions as ms;
pub use flatten::flatten as fs;
pub use style_fn::build_style_function_factory as bcs;
pub use style_fn::create_style_function as cs;
