use kiln::ignore::{parse_ignore_file, IGNORE_FILE};
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_parse_ignore_file() {
    let temp_dir = TempDir::new().unwrap();
    let ignore_path = temp_dir.path().join(IGNORE_FILE);

    // Test without .kilnignore
    let glob_set = parse_ignore_file(&ignore_path).unwrap();
    assert!(glob_set.is_match(".DS_Store"));
    assert!(glob_set.is_match("nested/.git"));
    assert!(!glob_set.is_match("file.pyc"));

    // Test with .kilnignore
    let mut file = File::create(&ignore_path).unwrap();
    writeln!(file, "# compiled\n*.pyc\n\n__pycache__").unwrap();

    let glob_set = parse_ignore_file(&ignore_path).unwrap();
    assert!(glob_set.is_match("file.pyc"));
    assert!(glob_set.is_match("__pycache__"));
    assert!(glob_set.is_match("a/.DS_Store")); // Default pattern still works
}

#[test]
fn test_invalid_pattern() {
    let temp_dir = TempDir::new().unwrap();
    let ignore_path = temp_dir.path().join(IGNORE_FILE);
    std::fs::write(&ignore_path, "a[\n").unwrap();

    assert!(parse_ignore_file(&ignore_path).is_err());
}
