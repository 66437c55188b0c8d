//! Common constants used throughout kiln.

/// Root marker of every template tree; replaced by the target directory.
pub const ROOT_MARKER: &str = "_template";

/// Option whose value names the generated project directory.
pub const TARGET_DIR_OPTION: &str = "projectSlug";

/// Option whose value is passed to module initialization.
pub const MODULE_NAME_OPTION: &str = "moduleName";
