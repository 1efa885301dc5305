//! Loading style specs from YAML and JSON.
//!
//! # Format
//!
//! ```yaml
//! base: inline-flex items-center
//! # Any other string member is a named field literal
//! icon: h-4 w-4
//! variants:
//!   size:
//!     sm: h-8 px-2
//!     lg: h-12 px-6
//!   # Boolean groups: YAML `true`/`false` keys become "true"/"false"
//!   disabled:
//!     true: opacity-50
//!     false: null
//!   tone:
//!     # Nested spec, resolved against the same selection
//!     loud:
//!       base: font-bold
//!       variants:
//!         size:
//!           lg: tracking-wide
//! ```
//!
//! Parsing has two phases, like stylesheet loading: the text is parsed into a
//! generic [`serde_yaml::Value`], then each node is turned into typed
//! [`StyleSpec`] members. JSON input goes through the same value type, so
//! both formats share one set of shape rules.

use std::path::Path;

use serde::{de, Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};

use super::entry::{VariantEntry, VariantGroup};
use super::style_spec::StyleSpec;
use crate::error::{Result, SpecError};

/// Recognized spec file extensions.
pub const SPEC_EXTENSIONS: &[&str] = &[".yaml", ".yml", ".json"];

impl StyleSpec {
    /// Parses a spec from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Parse`] for invalid YAML or a non-mapping root,
    /// and [`SpecError::InvalidDefinition`] for wrongly shaped members.
    ///
    /// # Example
    ///
    /// ```rust
    /// use varistyle::StyleSpec;
    ///
    /// let spec = StyleSpec::from_yaml(r#"
    /// base: btn
    /// variants:
    ///   size:
    ///     sm: btn-sm
    /// "#).unwrap();
    /// assert_eq!(spec.base(), Some("btn"));
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(yaml).map_err(|e| SpecError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        Self::from_value(&root)
    }

    /// Parses a spec from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json).map_err(|e| SpecError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        Self::from_value(&root)
    }

    /// Loads a spec file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Load`] if the file cannot be read or has an
    /// unsupported extension, and parse errors carrying the file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default();

        if !SPEC_EXTENSIONS.contains(&extension.as_str()) {
            return Err(SpecError::Load {
                path: path.to_path_buf(),
                message: format!(
                    "unsupported extension, expected one of {}",
                    SPEC_EXTENSIONS.join(", ")
                ),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SpecError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let spec = if extension == ".json" {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
        .map_err(|e| e.with_path(path))?;

        log::debug!(
            "loaded style spec {} ({} variant groups)",
            path.display(),
            spec.variants().count()
        );
        Ok(spec)
    }

    /// Builds a spec from an already parsed YAML value.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Mapping(map) => parse_node(map, ""),
            Value::Null => Ok(StyleSpec::new()),
            _ => Err(SpecError::Parse {
                path: None,
                message: "style spec must be a mapping".to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for StyleSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        StyleSpec::from_value(&value).map_err(de::Error::custom)
    }
}

fn join(at: &str, key: &str) -> String {
    if at.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", at, key)
    }
}

fn invalid(at: &str, message: impl Into<String>) -> SpecError {
    let at = if at.is_empty() { "<root>" } else { at };
    SpecError::InvalidDefinition {
        at: at.to_string(),
        message: message.into(),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn unexpected(at: &str, expected: &str, value: &Value) -> SpecError {
    invalid(at, format!("{}, got {}", expected, describe(value)))
}

/// Spec member names must be strings.
fn member_name<'a>(key: &'a Value, at: &str) -> Result<&'a str> {
    match key {
        Value::String(name) => Ok(name.as_str()),
        other => Err(unexpected(at, "member names must be strings", other)),
    }
}

/// Choice values may be written as strings, booleans or numbers.
fn choice_name(key: &Value, at: &str) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(unexpected(at, "choice values must be scalars", other)),
    }
}

fn optional_literal(value: &Value, at: &str) -> Result<Option<String>> {
    match value {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Null => Ok(None),
        other => Err(unexpected(at, "expected a string", other)),
    }
}

fn parse_node(map: &Mapping, at: &str) -> Result<StyleSpec> {
    let mut spec = StyleSpec::new();

    for (key, value) in map {
        let name = member_name(key, at)?;
        let here = join(at, name);
        match name {
            "base" => spec.set_base(optional_literal(value, &here)?),
            "variants" => match value {
                Value::Mapping(groups) => parse_groups(&mut spec, groups, &here)?,
                Value::Null => {}
                other => {
                    let expected = "expected a mapping of variant groups";
                    return Err(unexpected(&here, expected, other));
                }
            },
            field => {
                if let Some(literal) = optional_literal(value, &here)? {
                    spec.set_field(field, literal);
                }
            }
        }
    }

    Ok(spec)
}

fn parse_groups(spec: &mut StyleSpec, groups: &Mapping, at: &str) -> Result<()> {
    for (key, value) in groups {
        let name = member_name(key, at)?;
        let here = join(at, name);
        let group = match value {
            Value::Mapping(choices) => parse_group(choices, &here)?,
            Value::Null => VariantGroup::new(),
            other => {
                let expected = "expected a mapping of choices";
                return Err(unexpected(&here, expected, other));
            }
        };
        spec.set_variant(name, group);
    }
    Ok(())
}

fn parse_group(choices: &Mapping, at: &str) -> Result<VariantGroup> {
    let mut group = VariantGroup::new();
    for (key, value) in choices {
        let choice = choice_name(key, at)?;
        let here = join(at, &choice);
        let entry = match value {
            Value::String(s) => VariantEntry::Literal(s.clone()),
            Value::Null => VariantEntry::Empty,
            Value::Mapping(nested) => VariantEntry::from(parse_node(nested, &here)?),
            other => {
                let expected = "expected a string or a nested spec";
                return Err(unexpected(&here, expected, other));
            }
        };
        group.insert(choice, entry);
    }
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_spec() {
        assert!(StyleSpec::from_yaml("{}").unwrap().is_empty());
        assert!(StyleSpec::from_yaml("~").unwrap().is_empty());
    }

    #[test]
    fn test_parse_base_and_fields() {
        let spec = StyleSpec::from_yaml(
            r#"
            base: base-style
            item: base-item
            label: null
            "#,
        )
        .unwrap();

        assert_eq!(spec.base(), Some("base-style"));
        assert_eq!(spec.field("item"), Some("base-item"));
        assert_eq!(spec.field("label"), None);
    }

    #[test]
    fn test_parse_groups_in_declaration_order() {
        let spec = StyleSpec::from_yaml(
            r#"
            variants:
              zeta:
                a: z
              alpha:
                a: a
            "#,
        )
        .unwrap();
        let names: Vec<&str> = spec.variants().map(|(n, _)| n).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn test_parse_boolean_and_numeric_choices() {
        let spec = StyleSpec::from_yaml(
            r#"
            variants:
              disabled:
                true: opacity-50
                false: null
              columns:
                2: grid-cols-2
            "#,
        )
        .unwrap();

        let disabled = spec.variant("disabled").unwrap();
        assert!(disabled.is_boolean());
        assert_eq!(
            disabled.get("true").and_then(VariantEntry::as_literal),
            Some("opacity-50")
        );
        assert_eq!(disabled.get("false"), Some(&VariantEntry::Empty));

        let columns = spec.variant("columns").unwrap();
        assert!(columns.get("2").is_some());
    }

    #[test]
    fn test_parse_nested_and_inert_entries() {
        let spec = StyleSpec::from_yaml(
            r#"
            variants:
              a:
                deep:
                  base: bar-style
                  variants:
                    b:
                      baz: baz-style
                shallow:
                  base: never-used
            "#,
        )
        .unwrap();

        let group = spec.variant("a").unwrap();
        assert!(group.get("deep").unwrap().is_nested());
        assert!(matches!(group.get("shallow"), Some(VariantEntry::Inert(_))));
    }

    #[test]
    fn test_parse_json() {
        let spec = StyleSpec::from_json(
            r#"{
                "base": "b",
                "variants": {"size": {"sm": "s", "lg": {"base": "l", "variants": {}}}}
            }"#,
        )
        .unwrap();

        assert_eq!(spec.base(), Some("b"));
        let size = spec.variant("size").unwrap();
        assert_eq!(size.get("sm").and_then(VariantEntry::as_literal), Some("s"));
        // An empty `variants` member does not make an entry recursive.
        assert!(matches!(size.get("lg"), Some(VariantEntry::Inert(_))));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = StyleSpec::from_yaml("base: [unclosed").unwrap_err();
        assert!(matches!(err, SpecError::Parse { .. }));
    }

    #[test]
    fn test_parse_non_mapping_root() {
        let err = StyleSpec::from_yaml("- a\n- b").unwrap_err();
        assert!(matches!(err, SpecError::Parse { .. }));
    }

    #[test]
    fn test_parse_rejects_non_string_base() {
        let err = StyleSpec::from_yaml("base: 3").unwrap_err();
        assert_eq!(
            err,
            SpecError::InvalidDefinition {
                at: "base".to_string(),
                message: "expected a string, got a number".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_reports_nested_path() {
        let err = StyleSpec::from_yaml(
            r#"
            variants:
              size:
                sm: [a, b]
            "#,
        )
        .unwrap_err();
        match err {
            SpecError::InvalidDefinition { at, .. } => assert_eq!(at, "variants.size.sm"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_group_that_is_not_a_mapping() {
        match StyleSpec::from_yaml("variants:\n  size: big").unwrap_err() {
            SpecError::InvalidDefinition { at, .. } => assert_eq!(at, "variants.size"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_embedded_spec() {
        #[derive(Deserialize)]
        struct Component {
            name: String,
            style: StyleSpec,
        }

        let component: Component = serde_json::from_str(
            r#"{
                "name": "badge",
                "style": {"base": "rounded", "variants": {"tone": {"info": "bg-blue"}}}
            }"#,
        )
        .unwrap();
        assert_eq!(component.name, "badge");
        assert_eq!(component.style.base(), Some("rounded"));
    }

    #[test]
    fn test_deserialize_reports_shape_errors() {
        let result: std::result::Result<StyleSpec, _> = serde_json::from_str(r#"{"base": 1}"#);
        assert!(result.is_err());
    }
}
