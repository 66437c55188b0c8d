//! Project generation: materialization followed by pruning.

use crate::config::Schema;
use crate::constants::TARGET_DIR_OPTION;
use crate::error::Result;
use crate::loader::TemplateTree;
use crate::processor::Processor;
use crate::pruner::prune;
use crate::renderer::TemplateRenderer;
use crate::value::OptionValues;
use log::info;
use std::path::{Path, PathBuf};

/// Ties a template and its schema to a renderer.
pub struct Generator<'a> {
    engine: &'a dyn TemplateRenderer,
    template: &'a dyn TemplateTree,
    schema: &'a Schema,
}

impl<'a> Generator<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        template: &'a dyn TemplateTree,
        schema: &'a Schema,
    ) -> Self {
        Self { engine, template, schema }
    }

    /// The directory a project with these values is generated into.
    pub fn target_dir<P: AsRef<Path>>(output_dir: P, values: &OptionValues) -> Result<PathBuf> {
        Ok(output_dir.as_ref().join(values.require_str(TARGET_DIR_OPTION)?))
    }

    /// Generates the project below `output_dir` and returns its directory.
    ///
    /// # Errors
    /// * `Error::AlreadyExists` if the target directory is already present
    /// * any materialization error, after the target directory was removed
    /// * any pruning error; the generated tree is kept as it is
    pub fn generate<P: AsRef<Path>>(&self, values: &OptionValues, output_dir: P) -> Result<PathBuf> {
        let target_dir = Self::target_dir(output_dir, values)?;
        info!("Writing to {}", target_dir.display());

        Processor::new(self.engine, &target_dir, values.context()).materialize(self.template)?;

        info!("Removing obsolete files of unused extensions");
        prune(self.schema, values, &target_dir)?;

        Ok(target_dir)
    }
}
