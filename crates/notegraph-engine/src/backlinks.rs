//! # Backlinks
//!
//! Reverse link index over a set of notes.
//!
//! Indexing runs in two passes. [`BacklinkIndex::build`] walks every body and
//! files a snapshot of the referring note's metadata under the key of each
//! link target. [`BacklinkIndex::apply`] then stores the list found under each
//! note's own key as `metadata.backlinks`. Both passes derive keys with the
//! same [`KeyFn`].

use relative_path::RelativePath;
use serde_json::Value;
use std::collections::HashMap;

use crate::frontmatter::{FILE_KEY, Metadata};
use crate::models::Note;
use crate::transform::{FieldTransform, Transform};

/// Metadata key the index writes to.
pub const BACKLINKS_KEY: &str = "backlinks";

const MARKDOWN_EXT: &str = ".md";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BacklinkError {
    #[error("Note {index} has no file.{field} provenance")]
    MissingProvenance { index: usize, field: &'static str },
}

/// Maps `(directory, name)` to an index key.
pub type KeyFn<'a> = Box<dyn Fn(&str, &str) -> String + 'a>;

pub struct BacklinkOptions<'a> {
    pub key_fn: KeyFn<'a>,
}

impl<'a> BacklinkOptions<'a> {
    pub fn with_key_fn(key_fn: impl Fn(&str, &str) -> String + 'a) -> Self {
        Self {
            key_fn: Box::new(key_fn),
        }
    }

    fn key(&self, dir: &str, name: &str) -> String {
        (self.key_fn)(dir, name)
    }
}

impl Default for BacklinkOptions<'_> {
    fn default() -> Self {
        Self::with_key_fn(default_key)
    }
}

/// Joins `name` onto `dir`, resolving `.` and `..`, and drops a trailing
/// `.md` so link targets and file names meet on the same key.
///
/// An absolute `dir` cannot be climbed above: `..` at the root stays at the
/// root. A relative `dir` keeps leading `..` components.
///
/// ```
/// use notegraph_engine::backlinks::default_key;
///
/// assert_eq!(default_key("/notes", "./Note2.md"), "/notes/Note2");
/// assert_eq!(default_key("/notes", "Note2"), "/notes/Note2");
/// ```
pub fn default_key(dir: &str, name: &str) -> String {
    let joined = RelativePath::new(dir).join_normalized(RelativePath::new(name));
    let key = joined.as_str();
    let key = key.strip_suffix(MARKDOWN_EXT).unwrap_or(key);

    if dir.starts_with('/') {
        let below_root: Vec<&str> = key.split('/').skip_while(|part| *part == "..").collect();
        format!("/{}", below_root.join("/"))
    } else {
        key.to_string()
    }
}

/// Referring metadata grouped by the key of the note they point at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BacklinkIndex {
    entries: HashMap<String, Vec<Metadata>>,
}

impl BacklinkIndex {
    /// First pass: files every link in every body under its target key.
    pub fn build(notes: &[Note], options: &BacklinkOptions<'_>) -> Result<Self, BacklinkError> {
        let mut entries: HashMap<String, Vec<Metadata>> = HashMap::new();

        for (index, note) in notes.iter().enumerate() {
            let dir = provenance(note, index, "dir")?;
            let links = note.links();
            if links.is_empty() {
                continue;
            }

            let snapshot = snapshot(note.metadata());
            for link in links {
                entries
                    .entry(options.key(dir, link.path()))
                    .or_default()
                    .push(snapshot.clone());
            }
        }

        log::debug!(
            "Indexed backlinks for {} targets across {} notes",
            entries.len(),
            notes.len()
        );
        Ok(Self { entries })
    }

    /// Referring metadata for `key`, in note order then link order.
    pub fn get(&self, key: &str) -> &[Metadata] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct link targets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Second pass: sets `metadata.backlinks` on every note.
    ///
    /// All notes are checked for provenance before any is changed.
    pub fn apply(
        &self,
        notes: &mut [Note],
        options: &BacklinkOptions<'_>,
    ) -> Result<(), BacklinkError> {
        let keys = notes
            .iter()
            .enumerate()
            .map(|(index, note)| {
                let dir = provenance(note, index, "dir")?;
                let base = provenance(note, index, "base")?;
                Ok(options.key(dir, base))
            })
            .collect::<Result<Vec<_>, BacklinkError>>()?;

        for (note, key) in notes.iter_mut().zip(keys) {
            let backlinks =
                Value::Array(self.get(&key).iter().cloned().map(Value::Object).collect());
            let transform: Transform = FieldTransform::new()
                .metadata_key(BACKLINKS_KEY, move |_| backlinks.clone())
                .into();
            note.transform(&transform);
        }

        Ok(())
    }
}

/// Builds the index over `notes` and writes `metadata.backlinks` on each.
pub fn build_backlinks(
    notes: &mut [Note],
    options: &BacklinkOptions<'_>,
) -> Result<(), BacklinkError> {
    BacklinkIndex::build(notes, options)?.apply(notes, options)
}

fn provenance<'n>(
    note: &'n Note,
    index: usize,
    field: &'static str,
) -> Result<&'n str, BacklinkError> {
    note.metadata()
        .get(FILE_KEY)
        .and_then(|file| file.get(field))
        .and_then(Value::as_str)
        .ok_or(BacklinkError::MissingProvenance { index, field })
}

/// Copy of `metadata` without backlinks from an earlier pass.
fn snapshot(metadata: &Metadata) -> Metadata {
    metadata
        .iter()
        .filter(|(key, _)| key.as_str() != BACKLINKS_KEY)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
