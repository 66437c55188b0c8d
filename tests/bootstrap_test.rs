use kiln::bootstrap::init_repository;
use tempfile::TempDir;

#[test]
fn test_init_repository() {
    let temp_dir = TempDir::new().unwrap();
    init_repository(temp_dir.path()).unwrap();

    assert!(temp_dir.path().join(".git").is_dir());
    assert!(git2::Repository::open(temp_dir.path()).is_ok());
}
