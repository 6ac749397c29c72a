use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::models::{FileInfo, Note};


/// Create a temporary notes directory
pub fn create_test_notes_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test note file, with any missing parent directories
pub fn create_test_file(notes_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = notes_dir.path().join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Parse `text` as if it had been loaded from `path`
pub fn note_at(path: &str, text: &str) -> Note {
    Note::parse(text, &FileInfo::from_path(Path::new(path))).unwrap()
}
