use crate::{WriteOutcome, write_if_changed};
use tempfile::TempDir;

#[test]
fn test_second_identical_write_is_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("enum_gen.go");

    assert_eq!(write_if_changed(&path, b"package a\n").unwrap(), WriteOutcome::Written);
    let modified = std::fs::metadata(&path).unwrap().modified().unwrap();

    assert_eq!(write_if_changed(&path, b"package a\n").unwrap(), WriteOutcome::Unchanged);
    assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), modified);
}

#[test]
fn test_changed_contents_are_rewritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("enum_gen.go");
    std::fs::write(&path, "package old\n// much longer previous contents\n").unwrap();

    assert_eq!(write_if_changed(&path, b"package a\n").unwrap(), WriteOutcome::Written);
    assert_eq!(std::fs::read(&path).unwrap(), b"package a\n");
}

#[test]
fn test_unreadable_destination_is_an_error() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be read as a file.
    assert!(write_if_changed(dir.path(), b"package a\n").is_err());
}

#[cfg(unix)]
#[test]
fn test_new_file_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("enum_gen.go");
    write_if_changed(&path, b"package a\n").unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    // The process umask can only clear bits.
    assert_eq!(mode & !0o644, 0);
    assert_ne!(mode & 0o600, 0);
}
