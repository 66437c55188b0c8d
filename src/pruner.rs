//! Post-generation pruning.
//! Boolean options own generated files: `files.add` only survive when the
//! option is enabled, `files.remove` only when it is disabled.

use crate::config::{is_contained, Schema};
use crate::error::{Error, Result};
use crate::value::OptionValues;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Removes a file or directory. A missing path is not an error.
fn remove_path(path: &Path) -> std::io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Joins a listed file onto the project root, refusing anything that would
/// resolve outside of it.
fn resolve_listed_path(target_dir: &Path, file: &str) -> Result<PathBuf> {
    if !is_contained(file) {
        return Err(Error::InvalidPath { path: file.to_string() });
    }
    Ok(target_dir.join(file))
}

/// Deletes the files of disabled options and the counterparts of enabled ones.
///
/// Options without a value, and options with a non-boolean value, are skipped.
/// Listed paths must stay below `target_dir`. The first error aborts the
/// pass; nothing is restored.
pub fn prune<P: AsRef<Path>>(schema: &Schema, values: &OptionValues, target_dir: P) -> Result<()> {
    let target_dir = target_dir.as_ref();

    for option in schema.options() {
        let Some(enabled) = values.get(&option.name).and_then(|value| value.as_bool()) else {
            continue;
        };

        let obsolete = if enabled { &option.files.remove } else { &option.files.add };
        for file in obsolete {
            let path = resolve_listed_path(target_dir, file)?;
            debug!("Removing {} ({} = {})", path.display(), option.name, enabled);
            remove_path(&path)
                .map_err(|source| Error::PruneError { path: path.display().to_string(), source })?;
        }
    }

    Ok(())
}
