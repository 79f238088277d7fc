use std::fs;

use tempfile::TempDir;
use tubewatch_engine::AtomicFileWriter;

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("config.json", "[]").unwrap();
    assert_eq!(first.file_name().unwrap(), "config.json");
    assert_eq!(fs::read_to_string(&first).unwrap(), "[]");

    let second = writer.write("config.json", "[{}]").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "[{}]");

    // Only the target is left behind; the temp file was renamed over it.
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn writer_for_target_uses_parent_directory() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("config.json");
    let writer = AtomicFileWriter::for_target(&target);
    let path = writer.write("config.json", "[]").unwrap();
    assert_eq!(path, target);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("config.json", "data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("config.json").exists());
}
