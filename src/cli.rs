//! Command-line interface implementation for kiln.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for kiln.
#[derive(Parser, Debug)]
#[command(author, version, about = "kiln: generate a new project from a template", long_about = None)]
pub struct Args {
    /// Directory in which the project directory will be created
    #[arg(value_name = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Read option values from a YAML file instead of prompting
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use a template directory instead of the built-in template
    #[arg(short, long, value_name = "DIR")]
    pub template: Option<PathBuf>,

    /// Do not ask for confirmation before generating
    #[arg(short, long)]
    pub yes: bool,

    /// Skip git and module initialization of the generated project
    #[arg(long)]
    pub skip_bootstrap: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// With clap's default error handling on invalid arguments
pub fn get_args() -> Args {
    Args::parse()
}
