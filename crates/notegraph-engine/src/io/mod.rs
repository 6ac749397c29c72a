use std::borrow::Cow;
use std::fs;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid glob pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),
}

/// Read a note file and return its content
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write content to a file, creating parent directories as needed
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}

/// Expands `~` and environment variables, then drops `.` components.
///
/// Unknown variables leave the source as written.
pub fn expand_source(src: &str) -> PathBuf {
    let expanded = shellexpand::full(src).unwrap_or(Cow::Borrowed(src));

    let normalized: PathBuf = Path::new(expanded.as_ref())
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// True if `src` contains glob metacharacters.
pub fn is_glob(src: &str) -> bool {
    src.contains(['*', '?', '['])
}

/// Turns a load source into the sorted list of files it names.
///
/// An existing file names itself and an existing directory names the files
/// directly inside it. Anything else is treated as a glob pattern when it
/// has metacharacters.
pub fn resolve_sources(src: &str) -> Result<Vec<PathBuf>, IoError> {
    let path = expand_source(src);

    if path.is_file() {
        return Ok(vec![path]);
    }

    let mut files = if path.is_dir() {
        list_directory(&path)?
    } else {
        let pattern = path.to_string_lossy();
        if !is_glob(&pattern) {
            return Err(IoError::NotFound(path));
        }
        glob_files(&pattern)?
    };

    files.sort();
    Ok(files)
}

fn list_directory(dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(IoError::Io)? {
        let path = entry.map_err(IoError::Io)?.path();
        if path.is_file() {
            files.push(path);
        }
    }

    Ok(files)
}

fn glob_files(pattern: &str) -> Result<Vec<PathBuf>, IoError> {
    let paths = glob::glob(pattern).map_err(|source| IoError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for path in paths {
        let path = path?;
        if path.is_file() {
            files.push(path);
        }
    }

    Ok(files)
}
