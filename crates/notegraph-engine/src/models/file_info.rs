use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Where a note was loaded from, split into path components.
///
/// Stored under `metadata.file` by the loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// `/` for absolute paths, empty otherwise.
    pub root: String,
    /// Containing directory.
    pub dir: String,
    /// File name with extension.
    pub base: String,
    /// Extension including the leading dot, empty if none.
    pub ext: String,
    /// File name without extension.
    pub name: String,
}

impl FileInfo {
    pub fn from_path(path: &Path) -> Self {
        let root = if path.has_root() { "/" } else { "" };
        let dir = path
            .parent()
            .map(|parent| parent.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            root: root.to_string(),
            dir,
            base,
            ext,
            name,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "root": self.root,
            "dir": self.dir,
            "base": self.base,
            "ext": self.ext,
            "name": self.name,
        })
    }
}

impl From<&Path> for FileInfo {
    fn from(path: &Path) -> Self {
        Self::from_path(path)
    }
}
