//! Style spec trees: base literals, field literals and variant groups.
//!
//! A spec is built either programmatically with the `with_*` builders or
//! loaded from YAML/JSON (see [`StyleSpec::from_yaml`]). Variant entries are
//! classified when they are built, so resolution is a plain tree walk.

mod entry;
mod parse;
#[allow(clippy::module_inception)]
mod style_spec;

pub use entry::{VariantEntry, VariantGroup};
pub use parse::SPEC_EXTENSIONS;
pub use style_spec::StyleSpec;
