//! Repository and module bootstrap of a generated project.

use crate::error::{Error, Result};
use log::debug;
use std::path::Path;
use std::process::Command;

/// Initializes version control and module metadata in a generated project.
pub trait Bootstrapper {
    fn bootstrap(&self, target_dir: &Path, module_name: &str) -> Result<()>;
}

/// Initializes an empty git repository in `target_dir`.
pub fn init_repository(target_dir: &Path) -> Result<()> {
    debug!("Initializing git repository in {}", target_dir.display());
    git2::Repository::init(target_dir)?;
    Ok(())
}

fn run_command(target_dir: &Path, program: &str, args: &[&str]) -> Result<()> {
    let command = std::iter::once(program).chain(args.iter().copied()).collect::<Vec<_>>().join(" ");
    debug!("Running `{}` in {}", command, target_dir.display());

    let status = Command::new(program).args(args).current_dir(target_dir).status()?;
    if !status.success() {
        return Err(Error::BootstrapError { command, status });
    }
    Ok(())
}

/// `git init` followed by `go mod init <module>` and `go mod tidy`.
pub struct GoModuleBootstrapper;

impl Bootstrapper for GoModuleBootstrapper {
    fn bootstrap(&self, target_dir: &Path, module_name: &str) -> Result<()> {
        init_repository(target_dir)?;
        run_command(target_dir, "go", &["mod", "init", module_name])?;
        run_command(target_dir, "go", &["mod", "tidy"])
    }
}
