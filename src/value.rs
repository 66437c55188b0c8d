//! Typed option values and the resolved value mapping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// The type of an option, derived from the type of its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Bool,
    Int,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::String => write!(f, "string"),
            OptionKind::Bool => write!(f, "bool"),
            OptionKind::Int => write!(f, "int"),
        }
    }
}

/// A concrete option value.
///
/// Deserialized untagged, so a YAML `true` is a `Bool`, `3` is an `Int` and
/// anything quoted or textual is a `Str`. Floats and collections are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl OptionValue {
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::Str(_) => OptionKind::String,
            OptionValue::Bool(_) => OptionKind::Bool,
            OptionValue::Int(_) => OptionKind::Int,
        }
    }

    /// Whether the value is the zero value of its type (`""`, `false`, `0`).
    pub fn is_zero(&self) -> bool {
        match self {
            OptionValue::Str(s) => s.is_empty(),
            OptionValue::Bool(b) => !b,
            OptionValue::Int(i) => *i == 0,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Parses a user supplied literal into a value of the given kind.
    ///
    /// Booleans accept `1 t T TRUE true True 0 f F FALSE false False`,
    /// integers accept an optional sign followed by decimal digits.
    pub fn parse(kind: OptionKind, literal: &str) -> Result<Self> {
        let invalid = || Error::InvalidLiteral { expected: kind, literal: literal.to_string() };
        match kind {
            OptionKind::String => Ok(OptionValue::Str(literal.to_string())),
            OptionKind::Bool => match literal {
                "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(OptionValue::Bool(true)),
                "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(OptionValue::Bool(false)),
                _ => Err(invalid()),
            },
            OptionKind::Int => literal.parse::<i64>().map(OptionValue::Int).map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Str(s) => write!(f, "{s}"),
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Int(i) => write!(f, "{i}"),
        }
    }
}

impl From<&OptionValue> for serde_json::Value {
    fn from(value: &OptionValue) -> Self {
        match value {
            OptionValue::Str(s) => serde_json::Value::String(s.clone()),
            OptionValue::Bool(b) => serde_json::Value::Bool(*b),
            OptionValue::Int(i) => serde_json::Value::Number((*i).into()),
        }
    }
}

/// Resolved option values, split the same way as the schema: base options and
/// one map per extension category. Both levels keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionValues {
    #[serde(default)]
    pub base: IndexMap<String, OptionValue>,
    #[serde(default)]
    pub extensions: IndexMap<String, IndexMap<String, OptionValue>>,
}

impl OptionValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a value by option name across base and every category.
    /// Option names are unique across the schema, so the first hit is the only one.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.base
            .get(name)
            .or_else(|| self.extensions.values().find_map(|options| options.get(name)))
    }

    pub fn extension(&self, category: &str, name: &str) -> Option<&OptionValue> {
        self.extensions.get(category).and_then(|options| options.get(name))
    }

    /// Returns a required string value, failing when it is absent or mistyped.
    pub fn require_str(&self, name: &str) -> Result<&str> {
        match self.get(name) {
            Some(OptionValue::Str(s)) if !s.is_empty() => Ok(s),
            Some(OptionValue::Str(_)) | None => {
                Err(Error::ParameterNotSet { name: name.to_string() })
            }
            Some(other) => Err(Error::TypeMismatch {
                name: name.to_string(),
                expected: OptionKind::String,
                actual: other.kind(),
            }),
        }
    }

    /// Flattens all values into a single template context object.
    pub fn context(&self) -> serde_json::Value {
        let flat: serde_json::Map<String, serde_json::Value> = self
            .base
            .iter()
            .chain(self.extensions.values().flat_map(|options| options.iter()))
            .map(|(name, value)| (name.clone(), value.into()))
            .collect();
        serde_json::Value::Object(flat)
    }

    pub fn len(&self) -> usize {
        self.base.len() + self.extensions.values().map(IndexMap::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_bool_literals() {
        assert_eq!(OptionValue::parse(OptionKind::Bool, "T").unwrap(), OptionValue::Bool(true));
        assert_eq!(OptionValue::parse(OptionKind::Bool, "0").unwrap(), OptionValue::Bool(false));
        assert!(matches!(
            OptionValue::parse(OptionKind::Bool, "yes"),
            Err(Error::InvalidLiteral { expected: OptionKind::Bool, .. })
        ));
    }

    #[test]
    fn parse_int_literals() {
        assert_eq!(OptionValue::parse(OptionKind::Int, "-12").unwrap(), OptionValue::Int(-12));
        assert!(OptionValue::parse(OptionKind::Int, "4.5").is_err());
        assert!(OptionValue::parse(OptionKind::Int, "four").is_err());
    }

    #[test]
    fn parse_string_is_verbatim() {
        assert_eq!(
            OptionValue::parse(OptionKind::String, "true").unwrap(),
            OptionValue::Str("true".to_string())
        );
    }

    #[test]
    fn untagged_deserialization_keeps_types() {
        let values: OptionValues = serde_yaml::from_str(
            "base:\n  name: demo\n  port: 8080\n  enabled: false\n  version: \"1.22\"\n",
        )
        .unwrap();
        assert_eq!(values.base["name"], OptionValue::Str("demo".to_string()));
        assert_eq!(values.base["port"], OptionValue::Int(8080));
        assert_eq!(values.base["enabled"], OptionValue::Bool(false));
        assert_eq!(values.base["version"], OptionValue::Str("1.22".to_string()));
    }

    #[test]
    fn unknown_sections_are_rejected() {
        assert!(serde_yaml::from_str::<OptionValues>("other: {}\n").is_err());
    }

    #[test]
    fn lookup_and_context_span_categories() {
        let mut values = OptionValues::new();
        values.base.insert("projectSlug".to_string(), OptionValue::Str("demo".to_string()));
        values
            .extensions
            .entry("Container".to_string())
            .or_default()
            .insert("docker".to_string(), OptionValue::Bool(true));

        assert_eq!(values.get("docker"), Some(&OptionValue::Bool(true)));
        assert_eq!(values.len(), 2);
        assert_eq!(values.context(), json!({"projectSlug": "demo", "docker": true}));
    }

    #[test]
    fn require_str_reports_missing_and_mistyped() {
        let mut values = OptionValues::new();
        values.base.insert("flag".to_string(), OptionValue::Bool(true));

        assert!(matches!(values.require_str("absent"), Err(Error::ParameterNotSet { .. })));
        assert!(matches!(
            values.require_str("flag"),
            Err(Error::TypeMismatch { actual: OptionKind::Bool, .. })
        ));
    }
}
