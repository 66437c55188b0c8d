//! kiln is a project scaffolding tool.
//! It resolves a declarative option schema into concrete values, renders a
//! template tree with them, prunes files of disabled extensions and
//! bootstraps the generated project.

/// Version control and module initialization of generated projects
pub mod bootstrap;

/// Command-line interface module for kiln
pub mod cli;

/// Option schema of a template
/// Supports YAML and JSON formats (kiln.yml, kiln.yaml, kiln.json)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling for kiln
pub mod error;

/// Materialization followed by pruning
pub mod generator;

/// Ignore patterns for local template directories
pub mod ignore;

/// Built-in and local template trees
pub mod loader;

/// Logger initialization
pub mod logger;

/// File-sourced option resolution
pub mod parser;

/// Rendering of the template tree into the target directory
pub mod processor;

/// Interactive option resolution
pub mod prompt;

/// Removal of files that belong to disabled options
pub mod pruner;

/// Template rendering functionality
pub mod renderer;

/// Typed option values
pub mod value;
