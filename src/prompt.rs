//! Interactive option resolution.
//! Walks the schema in declaration order, prompting for one line per
//! displayable option. Earlier answers feed later defaults and dependency
//! checks, so the accumulated values are threaded through every step.

use crate::config::{OptionDef, Schema};
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::value::{OptionValue, OptionValues};
use dialoguer::Confirm;
use indexmap::IndexMap;
use std::io::{BufRead, Write};

const BANNER: &str = r#"
  _    _ _
 | | _(_) |_ __
 | |/ / | | '_ \
 |   <| | | | | |
 |_|\_\_|_|_| |_|
"#;

/// Outcome of one prompt round for a single option.
enum Answer {
    Accepted(OptionValue),
    /// Rejected by parsing or validation; the option is asked again.
    Rejected(String),
}

/// Reads option values line by line from `input`, writing prompts to `out`.
pub struct Prompter<'a, R, W> {
    engine: &'a dyn TemplateRenderer,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Prompter<'a, R, W> {
    pub fn new(engine: &'a dyn TemplateRenderer, input: R, out: W) -> Self {
        Self { engine, input, out }
    }

    /// Resolves every displayable option of the schema.
    ///
    /// # Errors
    /// * `Error::IoError` if reading input or writing prompts fails
    /// * `Error::MinijinjaError` if a default fails to render
    /// * `Error::InputClosed` if input ends and the default is rejected
    pub fn resolve(&mut self, schema: &Schema) -> Result<OptionValues> {
        writeln!(self.out, "{BANNER}")?;
        let mut values = OptionValues::new();

        for option in &schema.base {
            if let Some(value) = self.resolve_option(option, &values)? {
                values.base.insert(option.name.clone(), value);
            }
        }

        if !schema.extensions.is_empty() {
            writeln!(
                self.out,
                "\nYou now have the option to enable additional extensions (organized in different categories)...\n"
            )?;
        }
        for category in &schema.extensions {
            writeln!(self.out, "{}:", category.name)?;
            values.extensions.insert(category.name.clone(), IndexMap::new());

            for option in &category.options {
                if let Some(value) = self.resolve_option(option, &values)? {
                    values
                        .extensions
                        .entry(category.name.clone())
                        .or_default()
                        .insert(option.name.clone(), value);
                }
            }
        }

        Ok(values)
    }

    /// Returns `None` for options whose dependencies are not met; those are
    /// never shown.
    fn resolve_option(
        &mut self,
        option: &OptionDef,
        values: &OptionValues,
    ) -> Result<Option<OptionValue>> {
        if !option.should_display(values) {
            return Ok(None);
        }

        loop {
            let default = option.default_value(self.engine, values)?;
            self.print_option(option, &default)?;
            let line = self.read_line()?;
            writeln!(self.out)?;

            let closed = line.is_none();
            match answer(option, default, line.as_deref().unwrap_or_default()) {
                Answer::Accepted(value) => return Ok(Some(value)),
                Answer::Rejected(_) if closed => {
                    return Err(Error::InputClosed { name: option.name.clone() })
                }
                Answer::Rejected(reason) => writeln!(self.out, "WARNING: {reason}")?,
            }
        }
    }

    fn print_option(&mut self, option: &OptionDef, default: &OptionValue) -> Result<()> {
        if !option.description.is_empty() {
            writeln!(self.out, "  {}", option.description)?;
        }
        write!(self.out, "  {}: ({}) ", option.name, default)?;
        self.out.flush()?;
        Ok(())
    }

    /// Reads one trimmed line; `None` once the input is exhausted.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Turns a line of input into a value: empty selects the default, anything
/// else is coerced to the option's type and validated.
fn answer(option: &OptionDef, default: OptionValue, line: &str) -> Answer {
    let value = if line.is_empty() {
        default
    } else {
        match OptionValue::parse(default.kind(), line) {
            Ok(value) => value,
            Err(e) => return Answer::Rejected(e.to_string()),
        }
    };

    match option.check(&value) {
        Ok(()) => Answer::Accepted(value),
        Err(reason) => Answer::Rejected(format!("Validation failed: {reason}")),
    }
}

/// Asks the user to confirm before writing anything.
pub fn confirm(skip: bool, prompt: String) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| Error::PromptError(e.to_string()))
}
