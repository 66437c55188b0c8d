//! Template sources for kiln.
//! A template is an option schema plus a read-only tree of (path, content)
//! entries below the root marker. The built-in template is compiled into the
//! binary; a template directory on disk can be used instead.
use crate::config::{load_config, CONFIG_FILES};
use crate::constants::ROOT_MARKER;
use crate::error::{Error, Result};
use crate::ignore::{parse_ignore_file, IGNORE_FILE};
use log::{debug, info};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const BUILTIN_CONFIG: &str = include_str!("../template/kiln.yml");

const BUILTIN_FILES: &[(&str, &str)] = &[
    ("_template/.dockerignore", include_str!("../template/_template/.dockerignore")),
    (
        "_template/.github/dependabot.yml",
        include_str!("../template/_template/.github/dependabot.yml"),
    ),
    (
        "_template/.github/workflows/main.yml",
        include_str!("../template/_template/.github/workflows/main.yml"),
    ),
    ("_template/.gitignore", include_str!("../template/_template/.gitignore")),
    ("_template/.gitlab-ci.yml", include_str!("../template/_template/.gitlab-ci.yml")),
    ("_template/.golangci.yml", include_str!("../template/_template/.golangci.yml")),
    ("_template/Dockerfile", include_str!("../template/_template/Dockerfile")),
    ("_template/Makefile", include_str!("../template/_template/Makefile")),
    ("_template/README.md", include_str!("../template/_template/README.md")),
    (
        "_template/cmd/{{ appName }}/main.go",
        include_str!("../template/_template/cmd/{{ appName }}/main.go"),
    ),
    ("_template/internal/log/log.go", include_str!("../template/_template/internal/log/log.go")),
    (
        "_template/internal/server/server.go",
        include_str!("../template/_template/internal/server/server.go"),
    ),
    (
        "_template/internal/worker/worker.go",
        include_str!("../template/_template/internal/worker/worker.go"),
    ),
];

/// What a tree entry is.
#[derive(Debug, Clone)]
pub enum EntryKind {
    Directory,
    File(Cow<'static, [u8]>),
}

/// One entry of a template tree. `path` starts with the root marker and uses
/// `/` as separator; it may contain template directives.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub path: String,
    pub kind: EntryKind,
}

/// A read-only template: its option schema and its file tree.
pub trait TemplateTree {
    /// Returns the raw option schema document.
    fn config(&self) -> Result<String>;

    /// Returns every entry below the root marker, the root included, parents
    /// before children and siblings in lexical order.
    fn entries(&self) -> Result<Vec<TreeEntry>>;
}

/// Sorts entries depth-first by path segment.
fn sort_entries(entries: &mut [TreeEntry]) {
    entries.sort_by(|a, b| a.path.split('/').cmp(b.path.split('/')));
}

/// Template compiled into the binary.
pub struct EmbeddedTemplate {
    config: &'static str,
    files: &'static [(&'static str, &'static str)],
}

impl EmbeddedTemplate {
    /// The built-in Go service template.
    pub fn new() -> Self {
        Self::from_parts(BUILTIN_CONFIG, BUILTIN_FILES)
    }

    pub fn from_parts(
        config: &'static str,
        files: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { config, files }
    }
}

impl Default for EmbeddedTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateTree for EmbeddedTemplate {
    fn config(&self) -> Result<String> {
        Ok(self.config.to_string())
    }

    fn entries(&self) -> Result<Vec<TreeEntry>> {
        let mut directories = BTreeSet::from([ROOT_MARKER.to_string()]);
        for (path, _) in self.files {
            let mut current = *path;
            while let Some((parent, _)) = current.rsplit_once('/') {
                directories.insert(parent.to_string());
                current = parent;
            }
        }

        let mut entries: Vec<TreeEntry> = directories
            .into_iter()
            .map(|path| TreeEntry { path, kind: EntryKind::Directory })
            .chain(self.files.iter().map(|(path, content)| TreeEntry {
                path: path.to_string(),
                kind: EntryKind::File(Cow::Borrowed(content.as_bytes())),
            }))
            .collect();
        sort_entries(&mut entries);
        Ok(entries)
    }
}

/// Template directory on disk: a schema file next to a `_template` directory.
pub struct LocalTemplate {
    dir: PathBuf,
}

impl LocalTemplate {
    /// # Errors
    /// * `Error::TemplateDoesNotExistsError` if the directory does not exist
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: dir.display().to_string(),
            });
        }
        Ok(Self { dir: dir.to_path_buf() })
    }
}

impl TemplateTree for LocalTemplate {
    fn config(&self) -> Result<String> {
        load_config(&self.dir, &CONFIG_FILES)
    }

    fn entries(&self) -> Result<Vec<TreeEntry>> {
        let root = self.dir.join(ROOT_MARKER);
        if !root.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: root.display().to_string(),
            });
        }
        let ignored = parse_ignore_file(self.dir.join(IGNORE_FILE))?;

        let relative = |path: &Path| -> Result<String> {
            let invalid = || Error::InvalidPath { path: path.display().to_string() };
            let rel = path.strip_prefix(&root).map_err(|_| invalid())?;
            rel.components()
                .map(|c| c.as_os_str().to_str().ok_or_else(invalid))
                .collect::<Result<Vec<_>>>()
                .map(|segments| segments.join("/"))
        };

        let mut entries = Vec::new();
        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| match relative(e.path()) {
                Ok(rel) => rel.is_empty() || !ignored.is_match(&rel),
                Err(_) => true,
            });
        for entry in walker {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            let rel = relative(entry.path())?;
            let path = if rel.is_empty() {
                ROOT_MARKER.to_string()
            } else {
                format!("{ROOT_MARKER}/{rel}")
            };
            debug!("Found template entry: {}", path);

            let kind = if entry.file_type().is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File(Cow::Owned(std::fs::read(entry.path())?))
            };
            entries.push(TreeEntry { path, kind });
        }

        sort_entries(&mut entries);
        Ok(entries)
    }
}

/// Represents the source location of a template.
#[derive(Debug)]
pub enum TemplateSource {
    /// Template compiled into the binary
    Embedded,
    /// Local filesystem template path
    FileSystem(PathBuf),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::Embedded => write!(f, "built-in template"),
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
        }
    }
}

/// Returns the template tree for the given source.
pub fn load_template(source: TemplateSource) -> Result<Box<dyn TemplateTree>> {
    info!("Using template from the {}", source);

    match source {
        TemplateSource::Embedded => Ok(Box::new(EmbeddedTemplate::new())),
        TemplateSource::FileSystem(path) => Ok(Box::new(LocalTemplate::new(path)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_source_display() {
        let fs_source = TemplateSource::FileSystem(PathBuf::from("/path/to/template"));
        assert_eq!(format!("{}", fs_source), "local path: '/path/to/template'");
        assert_eq!(format!("{}", TemplateSource::Embedded), "built-in template");
    }

    #[test]
    fn embedded_entries_are_ordered_parents_first() {
        static FILES: &[(&str, &str)] =
            &[("_template/b/z.txt", "z"), ("_template/a.txt", "a"), ("_template/b/c/d.txt", "d")];
        let tree = EmbeddedTemplate::from_parts("", FILES);
        let paths: Vec<String> = tree.entries().unwrap().into_iter().map(|e| e.path).collect();
        assert_eq!(
            paths,
            [
                "_template",
                "_template/a.txt",
                "_template/b",
                "_template/b/c",
                "_template/b/c/d.txt",
                "_template/b/z.txt",
            ]
        );
    }

    #[test]
    fn builtin_template_is_complete() {
        let tree = EmbeddedTemplate::new();
        let entries = tree.entries().unwrap();
        assert!(entries.iter().all(|e| e.path.starts_with(ROOT_MARKER)));
        assert!(crate::config::parse_config(&tree.config().unwrap()).is_ok());
    }
}
