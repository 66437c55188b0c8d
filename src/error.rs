//! Error handling for kiln.
//! Defines the error taxonomy shared by option resolution, rendering,
//! materialization, pruning and bootstrap.

use std::process::ExitStatus;
use thiserror::Error;

use crate::value::OptionKind;

/// Custom error types for kiln operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration. Original error: {0}")]
    ConfigParseError(#[from] serde_yaml::Error),

    #[error("Failed to initialize repository. Original error: {0}")]
    Git2Error(#[from] git2::Error),

    /// Template parse and execution errors, surfaced verbatim.
    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Failed to parse ignore patterns. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("No configuration file found in '{template_dir}'. Tried: {config_files}.")]
    ConfigError { template_dir: String, config_files: String },

    /// The option schema violates one of its own invariants.
    #[error("Invalid option schema: {0}.")]
    InvalidSchema(String),

    #[error("Cannot proceed: {path} already exists.")]
    AlreadyExists { path: String },

    #[error("Parameter not set: {name}.")]
    ParameterNotSet { name: String },

    #[error("Type mismatch for {name}, got {actual}, expected {expected}.")]
    TypeMismatch { name: String, expected: OptionKind, actual: OptionKind },

    #[error("Malformed input: {name}: {reason}.")]
    MalformedInput { name: String, reason: String },

    #[error("Parameter set but preconditions are not met: {name}.")]
    ParameterSet { name: String },

    /// A typed literal could not be parsed. Recoverable in interactive mode.
    #[error("'{literal}' is not a valid {expected} value")]
    InvalidLiteral { expected: OptionKind, literal: String },

    #[error("Input closed while reading {name} and its default was rejected.")]
    InputClosed { name: String },

    #[error("Prompt error: {0}.")]
    PromptError(String),

    #[error("Cannot proceed: template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    #[error("Path '{path}' is outside the template root or contains invalid Unicode characters.")]
    InvalidPath { path: String },

    #[error("Cannot process the source path: '{source_path}'. Original error: {source}")]
    ProcessError {
        source_path: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Cannot remove '{path}'. Original error: {source}")]
    PruneError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{command}` failed with status: {status}")]
    BootstrapError { command: String, status: ExitStatus },
}

/// Convenience type alias for Results with kiln's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
