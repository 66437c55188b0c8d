//! Tree materialization.
//! Renders every template tree entry (path and content) and writes it below
//! the target directory. A failed walk leaves nothing behind.

use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    constants::ROOT_MARKER,
    error::{Error, Result},
    loader::{EntryKind, TemplateTree, TreeEntry},
    renderer::TemplateRenderer,
};

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(fs::write(path, content)?)
}

/// Maps a rendered entry path onto the target directory by replacing the
/// leading root marker.
pub fn resolve_target_path(rendered_path: &str, target_dir: &Path) -> Result<PathBuf> {
    let rest = rendered_path
        .strip_prefix(ROOT_MARKER)
        .filter(|rest| rest.is_empty() || rest.starts_with('/'))
        .ok_or_else(|| Error::InvalidPath { path: rendered_path.to_string() })?;

    let mut target = target_dir.to_path_buf();
    for segment in rest.split('/').filter(|segment| !segment.is_empty()) {
        if segment == ".." {
            return Err(Error::InvalidPath { path: rendered_path.to_string() });
        }
        target.push(segment);
    }
    Ok(target)
}

/// Removes a partially written target directory.
///
/// Cleanup is best effort: a failure here is logged and swallowed so the
/// error that triggered the rollback is the one reported.
pub fn rollback(target_dir: &Path) {
    if !target_dir.exists() {
        return;
    }
    debug!("Rolling back {}", target_dir.display());
    if let Err(e) = fs::remove_dir_all(target_dir) {
        warn!("Failed to remove '{}': {}", target_dir.display(), e);
    }
}

/// Writes a rendered template tree into a fresh target directory.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    target_dir: &'a Path,
    context: serde_json::Value,
}

impl<'a> Processor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        target_dir: &'a Path,
        context: serde_json::Value,
    ) -> Self {
        Self { engine, target_dir, context }
    }

    /// Materializes the whole tree.
    ///
    /// # Errors
    /// * `Error::AlreadyExists` if the target directory exists; nothing is touched
    /// * `Error::ProcessError` for any failing entry, after the target is removed
    pub fn materialize(&self, template: &dyn TemplateTree) -> Result<()> {
        if self.target_dir.exists() {
            return Err(Error::AlreadyExists { path: self.target_dir.display().to_string() });
        }

        let result = template
            .entries()
            .and_then(|entries| entries.iter().try_for_each(|entry| self.process(entry)));

        if result.is_err() {
            rollback(self.target_dir);
        }
        result
    }

    /// Processes a single entry.
    pub fn process(&self, entry: &TreeEntry) -> Result<()> {
        self.process_entry(entry).map_err(|e| Error::ProcessError {
            source_path: entry.path.clone(),
            source: Box::new(e),
        })
    }

    fn process_entry(&self, entry: &TreeEntry) -> Result<()> {
        let rendered_path = self.engine.render(&entry.path, &self.context)?;
        let target_path = resolve_target_path(&rendered_path, self.target_dir)?;

        match &entry.kind {
            EntryKind::Directory => {
                debug!("Creating directory: {}", target_path.display());
                fs::create_dir_all(&target_path)?;
            }
            EntryKind::File(content) => match std::str::from_utf8(content) {
                Ok(text) => {
                    debug!("Writing file: {}", target_path.display());
                    let rendered = self.engine.render(text, &self.context)?;
                    write_file(&target_path, rendered.as_bytes())?;
                }
                Err(_) => {
                    debug!("Copying binary file: {}", target_path.display());
                    write_file(&target_path, content)?;
                }
            },
        }
        Ok(())
    }
}
