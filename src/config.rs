//! Option schema handling for kiln templates.
//! The schema declares every configurable parameter of a template: its type
//! (taken from the default), its dependencies, the files it adds or removes and
//! how candidate values are validated.

use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::value::{OptionKind, OptionValue, OptionValues};
use log::debug;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Component, Path};

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] = ["kiln.yml", "kiln.yaml", "kiln.json"];

/// A predicate over a candidate value.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    /// String values must not be empty.
    NotEmpty,
    /// String values must match `pattern`; `description` explains the rule to the user.
    Regex {
        pattern: String,
        #[serde(default)]
        description: String,
    },
    /// Integer values must lie within `min..=max`.
    Range { min: i64, max: i64 },
}

impl Validator {
    /// Returns the reason a value is rejected, or `Ok` if it is accepted.
    pub fn check(&self, value: &OptionValue) -> std::result::Result<(), String> {
        match (self, value) {
            (Validator::NotEmpty, OptionValue::Str(s)) if s.trim().is_empty() => {
                Err("value must not be empty".to_string())
            }
            (Validator::NotEmpty, _) => Ok(()),
            (Validator::Regex { pattern, description }, OptionValue::Str(s)) => {
                let re = Regex::new(pattern).map_err(|e| e.to_string())?;
                if re.is_match(s) {
                    Ok(())
                } else if description.is_empty() {
                    Err(format!("value must match {pattern}"))
                } else {
                    Err(description.clone())
                }
            }
            (Validator::Range { min, max }, OptionValue::Int(i)) => {
                if (*min..=*max).contains(i) {
                    Ok(())
                } else {
                    Err(format!("value must be between {min} and {max}"))
                }
            }
            (Validator::Regex { .. }, other) | (Validator::Range { .. }, other) => {
                Err(format!("{} values cannot be checked by this rule", other.kind()))
            }
        }
    }
}

/// Generated files that belong to a boolean option.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Files {
    /// Files that only exist when the option is enabled.
    #[serde(default)]
    pub add: Vec<String>,
    /// Files that only exist when the option is disabled.
    #[serde(default)]
    pub remove: Vec<String>,
}

impl Files {
    /// Every listed path, added and removed.
    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.add.iter().chain(self.remove.iter())
    }
}

/// Whether `path` is a non-empty relative path that stays below the directory
/// it is joined to.
pub fn is_contained(path: &str) -> bool {
    let mut components = Path::new(path).components().peekable();
    components.peek().is_some()
        && components.all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// One configurable parameter.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Typed default. String defaults are templates over earlier values.
    pub default: OptionValue,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub files: Files,
    #[serde(default)]
    pub validate: Option<Validator>,
}

impl OptionDef {
    pub fn new<S: Into<String>>(name: S, default: OptionValue) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            default,
            depends_on: Vec::new(),
            files: Files::default(),
            validate: None,
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_depends_on<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_files<S: Into<String>>(mut self, add: Vec<S>, remove: Vec<S>) -> Self {
        self.files = Files {
            add: add.into_iter().map(Into::into).collect(),
            remove: remove.into_iter().map(Into::into).collect(),
        };
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validate = Some(validator);
        self
    }

    /// Declared type of the option.
    pub fn kind(&self) -> OptionKind {
        self.default.kind()
    }

    /// An option is displayable when every dependency already resolved to `true`.
    /// Dependencies holding a non-boolean value impose no constraint.
    pub fn should_display(&self, values: &OptionValues) -> bool {
        self.depends_on.iter().all(|dependency| match values.get(dependency) {
            Some(OptionValue::Bool(enabled)) => *enabled,
            Some(_) => true,
            None => false,
        })
    }

    /// Resolves the default against the values known so far.
    pub fn default_value(
        &self,
        engine: &dyn TemplateRenderer,
        values: &OptionValues,
    ) -> Result<OptionValue> {
        match &self.default {
            OptionValue::Str(template) => {
                Ok(OptionValue::Str(engine.render(template, &values.context())?))
            }
            other => Ok(other.clone()),
        }
    }

    pub fn check(&self, value: &OptionValue) -> std::result::Result<(), String> {
        match &self.validate {
            Some(validator) => validator.check(value),
            None => Ok(()),
        }
    }
}

/// A named group of extension options.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub options: Vec<OptionDef>,
}

/// The full, ordered option schema of a template.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    #[serde(default)]
    pub base: Vec<OptionDef>,
    #[serde(default)]
    pub extensions: Vec<Category>,
}

impl Schema {
    /// All options in declaration order: base first, then each category.
    pub fn options(&self) -> impl Iterator<Item = &OptionDef> {
        self.base
            .iter()
            .chain(self.extensions.iter().flat_map(|category| category.options.iter()))
    }

    /// Checks the invariants every later stage relies on.
    pub fn validate(&self) -> Result<()> {
        let mut declared = HashSet::new();
        for option in self.options() {
            for dependency in &option.depends_on {
                if !declared.contains(dependency.as_str()) {
                    return Err(Error::InvalidSchema(format!(
                        "option '{}' depends on '{}' which is not declared before it",
                        option.name, dependency
                    )));
                }
            }
            if !declared.insert(option.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "option '{}' is declared more than once",
                    option.name
                )));
            }
            let applies = match &option.validate {
                Some(Validator::Regex { pattern, .. }) => {
                    Regex::new(pattern).map_err(|e| {
                        Error::InvalidSchema(format!("option '{}': {}", option.name, e))
                    })?;
                    option.kind() == OptionKind::String
                }
                Some(Validator::Range { min, max }) => option.kind() == OptionKind::Int && min <= max,
                Some(Validator::NotEmpty) | None => true,
            };
            if !applies {
                return Err(Error::InvalidSchema(format!(
                    "option '{}': validator does not apply to {} values",
                    option.name,
                    option.kind()
                )));
            }
            if let Some(path) = option.files.paths().find(|path| !is_contained(path)) {
                return Err(Error::InvalidSchema(format!(
                    "option '{}': file '{}' must be relative to the project root",
                    option.name, path
                )));
            }
        }
        Ok(())
    }
}

/// Loads configuration from a template directory, trying multiple file formats.
///
/// # Errors
/// * `Error::ConfigError` if no config file exists
pub fn load_config<P: AsRef<Path>>(template_dir: P, config_files: &[&str]) -> Result<String> {
    let template_dir = template_dir.as_ref();
    for file in config_files {
        let config_path = template_dir.join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(std::fs::read_to_string(&config_path)?);
        }
    }

    Err(Error::ConfigError {
        template_dir: template_dir.display().to_string(),
        config_files: config_files.join(", "),
    })
}

/// Parses and validates an option schema. JSON is tried first, then YAML.
pub fn parse_config(content: &str) -> Result<Schema> {
    let schema: Schema = match serde_json::from_str(content) {
        Ok(schema) => schema,
        Err(_) => serde_yaml::from_str(content)?,
    };
    schema.validate()?;
    Ok(schema)
}
