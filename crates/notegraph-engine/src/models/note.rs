use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::backlinks::BacklinkError;
use crate::frontmatter::{
    self, FrontmatterError, FrontmatterFormat, FrontmatterSyntax, Metadata, compose::to_json_string,
};
use crate::io::{self, IoError};
use crate::links::{Link, extract_all_links};
use crate::models::FileInfo;
use crate::transform::{self, Transform};

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("Failed to read note {path}: {source}")]
    Read { path: PathBuf, source: IoError },
    #[error("Failed to parse frontmatter in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: FrontmatterError,
    },
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: IoError },
    #[error("Failed to load notes from {src}: {source}")]
    Source { src: String, source: IoError },
    #[error("No notes loaded")]
    EmptyCorpus,
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
    #[error("Failed to serialize note data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Backlinks(#[from] BacklinkError),
}

/// The plain `{body, metadata}` record of a note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteData {
    pub body: String,
    pub metadata: Metadata,
}

impl NoteData {
    pub fn new(body: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            body: body.into(),
            metadata,
        }
    }
}

/// A loaded note. Its data only changes through [`Note::transform`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Note {
    data: NoteData,
}

/// Controls what [`Note::render`] and [`Note::write`] produce.
pub struct WriteOptions<'a> {
    /// Include the body.
    pub body: bool,
    /// Include the frontmatter block.
    pub metadata: bool,
    pub format: FrontmatterFormat,
    /// Applied to a copy of the note before rendering.
    pub transform: Option<Transform<'a>>,
    /// Post-processes the final text.
    pub replace: Option<Box<dyn Fn(String) -> String + 'a>>,
}

impl Default for WriteOptions<'_> {
    fn default() -> Self {
        Self {
            body: true,
            metadata: true,
            format: FrontmatterFormat::default(),
            transform: None,
            replace: None,
        }
    }
}

/// Controls JSON export of notes.
#[derive(Default)]
pub struct ExportOptions<'a> {
    /// Pretty-print with this many spaces; compact when `None`.
    pub indent: Option<usize>,
    /// Applied to a copy of each note before export.
    pub transform: Option<Transform<'a>>,
}

impl Note {
    pub fn from_data(data: NoteData) -> Self {
        Self { data }
    }

    /// Builds a note from raw text, taking provenance from `file`.
    pub fn parse(text: &str, file: &FileInfo) -> Result<Self, FrontmatterError> {
        Self::parse_with(text, file, FrontmatterSyntax::Auto)
    }

    pub fn parse_with(
        text: &str,
        file: &FileInfo,
        syntax: FrontmatterSyntax,
    ) -> Result<Self, FrontmatterError> {
        let parts = frontmatter::split(text);
        let metadata = frontmatter::parse_frontmatter_as(parts.frontmatter, syntax)?;

        Ok(Self::from_data(NoteData {
            body: parts.body.to_string(),
            metadata: frontmatter::with_provenance(metadata, file),
        }))
    }

    pub fn load(path: &Path) -> Result<Self, NoteError> {
        Self::load_with(path, FrontmatterSyntax::Auto)
    }

    pub fn load_with(path: &Path, syntax: FrontmatterSyntax) -> Result<Self, NoteError> {
        let text = io::read_file(path).map_err(|source| NoteError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse_with(&text, &FileInfo::from_path(path), syntax).map_err(|source| {
            NoteError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    pub fn data(&self) -> &NoteData {
        &self.data
    }

    pub fn into_data(self) -> NoteData {
        self.data
    }

    pub fn body(&self) -> &str {
        &self.data.body
    }

    pub fn metadata(&self) -> &Metadata {
        &self.data.metadata
    }

    /// Forward links in the body, in document order.
    pub fn links(&self) -> Vec<Link> {
        extract_all_links(&self.data.body)
    }

    /// Replaces this note's data with the result of `transform`.
    pub fn transform(&mut self, transform: &Transform<'_>) -> &mut Self {
        self.data = transform::apply(&self.data, transform);
        self
    }

    /// Renders the note back to text.
    pub fn render(&self, options: &WriteOptions<'_>) -> Result<String, FrontmatterError> {
        let data = match &options.transform {
            Some(t) => Cow::Owned(transform::apply(&self.data, t)),
            None => Cow::Borrowed(&self.data),
        };

        let mut out = String::new();
        if options.metadata {
            out.push_str(&frontmatter::compose_frontmatter(
                &data.metadata,
                &options.format,
            )?);
        }
        if options.body {
            out.push_str(&data.body);
        }

        Ok(match &options.replace {
            Some(replace) => replace(out),
            None => out,
        })
    }

    pub fn write(&self, path: &Path, options: &WriteOptions<'_>) -> Result<(), NoteError> {
        let content = self.render(options)?;
        io::write_file(path, &content).map_err(|source| NoteError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_json(&self, options: &ExportOptions<'_>) -> Result<String, NoteError> {
        let data = match &options.transform {
            Some(t) => Cow::Owned(transform::apply(&self.data, t)),
            None => Cow::Borrowed(&self.data),
        };
        Ok(to_json_string(&*data, options.indent)?)
    }

    pub fn export_json(&self, path: &Path, options: &ExportOptions<'_>) -> Result<(), NoteError> {
        let json = self.to_json(options)?;
        io::write_file(path, &json).map_err(|source| NoteError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl From<NoteData> for Note {
    fn from(data: NoteData) -> Self {
        Self::from_data(data)
    }
}
