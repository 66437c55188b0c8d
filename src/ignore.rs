//! File and directory ignore pattern handling for local templates.
//! This module processes .kilnignore files to exclude specific paths
//! from the template tree, similar to .gitignore functionality.

use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

/// Ignore file name, looked up next to the schema file.
pub const IGNORE_FILE: &str = ".kilnignore";

/// Patterns that are always ignored.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 3] = ["**/.git", "**/.git/**", "**/.DS_Store"];

/// Reads the ignore file (if any) and compiles it together with the defaults.
///
/// # Notes
/// - If the ignore file doesn't exist, only the defaults are used
/// - Each non-empty line that does not start with `#` is a glob pattern
/// - Patterns match paths relative to the template root marker
pub fn parse_ignore_file<P: AsRef<Path>>(ignore_path: P) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_IGNORE_PATTERNS {
        builder.add(Glob::new(pattern)?);
    }

    if let Ok(contents) = read_to_string(ignore_path.as_ref()) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            builder.add(Glob::new(line)?);
        }
    } else {
        debug!("{} does not exist", IGNORE_FILE)
    }

    Ok(builder.build()?)
}
