use std::path::{Path, PathBuf};

use kiln::error::Error;
use kiln::loader::EmbeddedTemplate;
use kiln::processor::{resolve_target_path, rollback, Processor};
use kiln::renderer::MiniJinjaRenderer;
use serde_json::json;
use tempfile::TempDir;

static FILES: &[(&str, &str)] = &[
    ("_template/README.md", "# {{ name }}\n"),
    ("_template/src/{{ name }}.txt", "{{ name | upper }}"),
];

static BROKEN_FILES: &[(&str, &str)] = &[
    ("_template/a.txt", "fine"),
    ("_template/b/c.txt", "also fine"),
    ("_template/z.txt", "{% if %}"),
];

#[test]
fn test_resolve_target_path() {
    let target = Path::new("out/demo");
    assert_eq!(resolve_target_path("_template", target).unwrap(), PathBuf::from("out/demo"));
    assert_eq!(
        resolve_target_path("_template/cmd/app/main.go", target).unwrap(),
        PathBuf::from("out/demo/cmd/app/main.go")
    );
    assert!(matches!(resolve_target_path("other/file", target), Err(Error::InvalidPath { .. })));
    assert!(resolve_target_path("_templates/file", target).is_err());
    assert!(resolve_target_path("_template/../escape", target).is_err());
}

#[test]
fn test_materialize_renders_paths_and_contents() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("demo");
    let engine = MiniJinjaRenderer::new();

    Processor::new(&engine, &target, json!({ "name": "widget" }))
        .materialize(&EmbeddedTemplate::from_parts("", FILES))
        .unwrap();

    assert_eq!(std::fs::read_to_string(target.join("README.md")).unwrap(), "# widget\n");
    assert_eq!(std::fs::read_to_string(target.join("src/widget.txt")).unwrap(), "WIDGET");
}

#[test]
fn test_existing_target_is_left_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("demo");
    std::fs::create_dir_all(&target).unwrap();
    std::fs::write(target.join("keep.txt"), "mine").unwrap();
    let engine = MiniJinjaRenderer::new();

    let result = Processor::new(&engine, &target, json!({ "name": "widget" }))
        .materialize(&EmbeddedTemplate::from_parts("", FILES));

    assert!(matches!(result, Err(Error::AlreadyExists { .. })));
    assert_eq!(std::fs::read_to_string(target.join("keep.txt")).unwrap(), "mine");
    assert!(!target.join("README.md").exists());
}

#[test_log::test]
fn test_failure_removes_target() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("demo");
    let engine = MiniJinjaRenderer::new();

    let result = Processor::new(&engine, &target, json!({}))
        .materialize(&EmbeddedTemplate::from_parts("", BROKEN_FILES));

    match result {
        Err(Error::ProcessError { source_path, source }) => {
            assert_eq!(source_path, "_template/z.txt");
            assert!(matches!(*source, Error::MinijinjaError(_)));
        }
        other => panic!("Expected ProcessError, got {other:?}"),
    }
    assert!(!target.exists());
}

#[test]
fn test_rollback_of_missing_directory_is_silent() {
    let temp_dir = TempDir::new().unwrap();
    rollback(&temp_dir.path().join("never-created"));
    assert!(temp_dir.path().exists());
}
