//! File-sourced option resolution.
//! Reads a values document and checks it against the schema: required base
//! options, type coherence with the resolved default, validation rules and
//! dependency preconditions.

use crate::config::{OptionDef, Schema};
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::value::{OptionValue, OptionValues};
use log::{debug, warn};
use std::path::Path;

/// Loads option values from a YAML (or JSON) file and validates them.
pub fn load_values_from_file<P: AsRef<Path>>(
    path: P,
    schema: &Schema,
    engine: &dyn TemplateRenderer,
) -> Result<OptionValues> {
    let path = path.as_ref();
    debug!("Loading option values from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_values(&content, schema, engine)
}

/// Parses a values document and validates it against the schema.
///
/// Every base option must be present with a non-zero value. Extension options
/// are optional: supplied ones are validated, absent ones whose dependencies
/// are met receive their resolved default, the same value an empty answer
/// selects interactively. A complete document is returned unchanged.
pub fn parse_values(
    content: &str,
    schema: &Schema,
    engine: &dyn TemplateRenderer,
) -> Result<OptionValues> {
    let mut values: OptionValues = serde_yaml::from_str(content)?;

    for option in &schema.base {
        let value = values
            .base
            .get(&option.name)
            .filter(|value| !value.is_zero())
            .ok_or_else(|| Error::ParameterNotSet { name: option.name.clone() })?;

        validate_file_option(option, value, &values, engine)?;
    }

    for category in &schema.extensions {
        for option in &category.options {
            if let Some(value) = values.extension(&category.name, &option.name) {
                validate_file_option(option, value, &values, engine)?;
                continue;
            }
            if !option.should_display(&values) {
                continue;
            }

            let default = option.default_value(engine, &values)?;
            option
                .check(&default)
                .map_err(|reason| Error::MalformedInput { name: option.name.clone(), reason })?;
            debug!("Using default for {}: {}", option.name, default);
            values
                .extensions
                .entry(category.name.clone())
                .or_default()
                .insert(option.name.clone(), default);
        }
    }

    for name in unknown_names(schema, &values) {
        warn!("Ignoring value for unknown option '{name}'");
    }

    Ok(values)
}

fn validate_file_option(
    option: &OptionDef,
    value: &OptionValue,
    values: &OptionValues,
    engine: &dyn TemplateRenderer,
) -> Result<()> {
    let expected = option.default_value(engine, values)?.kind();
    if value.kind() != expected {
        return Err(Error::TypeMismatch {
            name: option.name.clone(),
            expected,
            actual: value.kind(),
        });
    }

    option
        .check(value)
        .map_err(|reason| Error::MalformedInput { name: option.name.clone(), reason })?;

    // Supplied although its preconditions are not met.
    if !option.should_display(values) {
        return Err(Error::ParameterSet { name: option.name.clone() });
    }

    Ok(())
}

fn unknown_names<'a>(schema: &Schema, values: &'a OptionValues) -> Vec<&'a str> {
    let in_base = values.base.keys();
    let in_categories = values.extensions.values().flat_map(|options| options.keys());
    in_base
        .chain(in_categories)
        .filter(|name| !schema.options().any(|option| &option.name == *name))
        .map(String::as_str)
        .collect()
}
