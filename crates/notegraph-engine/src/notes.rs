use std::path::{Path, PathBuf};

use crate::backlinks::{self, BacklinkError, BacklinkOptions};
use crate::frontmatter::{FrontmatterSyntax, compose::to_json_string};
use crate::io;
use crate::models::{ExportOptions, Note, NoteData, NoteError};
use crate::transform::{self, Transform};

type PathFilter<'a> = Box<dyn Fn(&Path) -> bool + 'a>;

/// Options for [`Notes::load`].
#[derive(Default)]
pub struct LoadOptions<'a> {
    /// Keeps only paths for which this returns true.
    pub filter: Option<PathFilter<'a>>,
    /// Clears the collection before loading.
    pub overwrite: bool,
    pub syntax: FrontmatterSyntax,
    /// Applied to each note as it is loaded.
    pub transform: Option<Transform<'a>>,
}

impl<'a> LoadOptions<'a> {
    pub fn filter(mut self, f: impl Fn(&Path) -> bool + 'a) -> Self {
        self.filter = Some(Box::new(f));
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn syntax(mut self, syntax: FrontmatterSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn transform(mut self, transform: impl Into<Transform<'a>>) -> Self {
        self.transform = Some(transform.into());
        self
    }
}

/// A file that could not be turned into a note.
#[derive(Debug)]
pub struct SkippedNote {
    pub path: PathBuf,
    pub error: NoteError,
}

/// Outcome of one [`Notes::load`] call.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<PathBuf>,
    pub skipped: Vec<SkippedNote>,
}

/// An ordered collection of notes loaded from one or more sources.
#[derive(Debug, Clone, Default)]
pub struct Notes {
    notes: Vec<Note>,
    sources: Vec<String>,
}

impl Notes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every file named by `src` and appends the resulting notes.
    ///
    /// `src` is a file, a directory (its direct files) or a glob pattern.
    /// Files that fail to read or parse are reported in
    /// [`LoadReport::skipped`] and do not stop the batch. A source that
    /// cannot be resolved leaves the collection untouched.
    pub fn load(&mut self, src: &str, options: &LoadOptions<'_>) -> Result<LoadReport, NoteError> {
        let paths = io::resolve_sources(src).map_err(|source| NoteError::Source {
            src: src.to_string(),
            source,
        })?;

        if options.overwrite {
            self.clear();
        }
        self.add_source(src);

        let mut report = LoadReport::default();
        for path in paths {
            if let Some(filter) = &options.filter
                && !filter(&path)
            {
                log::debug!("Filtered out {}", path.display());
                continue;
            }

            match Note::load_with(&path, options.syntax) {
                Ok(mut note) => {
                    if let Some(transform) = &options.transform {
                        note.transform(transform);
                    }
                    log::debug!("Loaded note {}", path.display());
                    self.notes.push(note);
                    report.loaded.push(path);
                }
                Err(error) => {
                    log::warn!("Skipping {}: {}", path.display(), error);
                    report.skipped.push(SkippedNote { path, error });
                }
            }
        }

        log::info!(
            "Loaded {} notes from {} ({} skipped)",
            report.loaded.len(),
            src,
            report.skipped.len()
        );
        Ok(report)
    }

    /// Sources passed to [`Notes::load`], first use first.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    fn add_source(&mut self, src: &str) {
        if !self.sources.iter().any(|s| s == src) {
            self.sources.push(src.to_string());
        }
    }

    /// Removes all notes and recorded sources.
    pub fn clear(&mut self) {
        self.notes.clear();
        self.sources.clear();
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Copies of every note's data, in load order.
    pub fn collect(&self) -> Vec<NoteData> {
        self.notes.iter().map(|note| note.data().clone()).collect()
    }

    pub fn map<T>(&self, mut f: impl FnMut(&NoteData, usize) -> T) -> Vec<T> {
        self.notes
            .iter()
            .enumerate()
            .map(|(index, note)| f(note.data(), index))
            .collect()
    }

    pub fn reduce<A>(&self, init: A, mut f: impl FnMut(A, &NoteData, usize) -> A) -> A {
        self.notes
            .iter()
            .enumerate()
            .fold(init, |acc, (index, note)| f(acc, note.data(), index))
    }

    /// Applies `transform` to every note in place.
    pub fn transform(&mut self, transform: &Transform<'_>) -> &mut Self {
        for note in &mut self.notes {
            note.transform(transform);
        }
        self
    }

    /// Sets `metadata.backlinks` on every note in the collection.
    pub fn build_backlinks(&mut self, options: &BacklinkOptions<'_>) -> Result<(), BacklinkError> {
        backlinks::build_backlinks(&mut self.notes, options)
    }

    /// The collection's data as a JSON array.
    pub fn to_json(&self, options: &ExportOptions<'_>) -> Result<String, NoteError> {
        if self.notes.is_empty() {
            return Err(NoteError::EmptyCorpus);
        }

        let data: Vec<NoteData> = match &options.transform {
            Some(t) => self
                .notes
                .iter()
                .map(|note| transform::apply(note.data(), t))
                .collect(),
            None => self.collect(),
        };
        Ok(to_json_string(&data, options.indent)?)
    }

    pub fn export_json(&self, path: &Path, options: &ExportOptions<'_>) -> Result<(), NoteError> {
        let json = self.to_json(options)?;
        io::write_file(path, &json).map_err(|source| NoteError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Exported {} notes to {}", self.notes.len(), path.display());
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Notes {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_file, create_test_notes_dir};
    use crate::transform::FieldTransform;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn two_note_dir() -> TempDir {
        let dir = create_test_notes_dir();
        create_test_file(&dir, "a.md", "---\ntitle: A\n---\nSee [[b]]\n");
        create_test_file(&dir, "b.md", "---\ntitle: B\n---\nPlain\n");
        dir
    }

    fn titles(notes: &Notes) -> Vec<String> {
        notes.map(|data, _| data.metadata["title"].as_str().unwrap_or_default().to_string())
    }

    #[test]
    fn load_directory_in_sorted_order() {
        let dir = two_note_dir();
        let src = dir.path().to_str().unwrap();
        let mut notes = Notes::new();

        let report = notes.load(src, &LoadOptions::default()).unwrap();

        assert_eq!(report.loaded.len(), 2);
        assert!(report.skipped.is_empty());
        assert_eq!(titles(&notes), vec!["A", "B"]);
        assert_eq!(notes.sources(), [src.to_string()]);
    }

    #[test]
    fn load_appends_and_overwrite_clears() {
        let dir = two_note_dir();
        let src = dir.path().to_str().unwrap();
        let mut notes = Notes::new();

        notes.load(src, &LoadOptions::default()).unwrap();
        notes.load(src, &LoadOptions::default()).unwrap();
        assert_eq!(notes.len(), 4);
        assert_eq!(notes.sources().len(), 1);

        notes.load(src, &LoadOptions::default().overwrite(true)).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes.sources(), [src.to_string()]);
    }

    #[test]
    fn filter_limits_paths() {
        let dir = two_note_dir();
        create_test_file(&dir, "c.txt", "not a note");
        let mut notes = Notes::new();
        let options = LoadOptions::default()
            .filter(|path| path.extension().is_some_and(|ext| ext == "md"));

        notes.load(dir.path().to_str().unwrap(), &options).unwrap();

        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn bad_note_is_skipped_not_fatal() {
        let dir = two_note_dir();
        create_test_file(&dir, "broken.md", "---\n[unclosed\n---\nbody");
        let mut notes = Notes::new();

        let report = notes
            .load(dir.path().to_str().unwrap(), &LoadOptions::default())
            .unwrap();

        assert_eq!(notes.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].path.ends_with("broken.md"));
        assert!(matches!(report.skipped[0].error, NoteError::Parse { .. }));
    }

    #[test]
    fn missing_source_is_an_error() {
        let mut notes = Notes::new();
        let err = notes
            .load("/no/such/notes/dir", &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, NoteError::Source { .. }));
        assert!(notes.sources().is_empty());
    }

    #[test]
    fn overwrite_from_missing_source_keeps_collection() {
        let dir = two_note_dir();
        let src = dir.path().to_str().unwrap();
        let mut notes = Notes::new();
        notes.load(src, &LoadOptions::default()).unwrap();

        let err = notes
            .load("/no/such/notes/dir", &LoadOptions::default().overwrite(true))
            .unwrap_err();

        assert!(matches!(err, NoteError::Source { .. }));
        assert_eq!(titles(&notes), vec!["A", "B"]);
        assert_eq!(notes.sources(), [src.to_string()]);
    }

    #[test]
    fn load_transform_runs_on_each_note() {
        let dir = two_note_dir();
        let mut notes = Notes::new();
        let options = LoadOptions::default()
            .transform(FieldTransform::new().body(|body| body.trim_end().to_string()));

        notes.load(dir.path().to_str().unwrap(), &options).unwrap();

        assert_eq!(notes.map(|data, _| data.body.clone()), vec!["See [[b]]", "Plain"]);
    }

    #[test]
    fn yaml_only_syntax_reads_flow_mapping() {
        let dir = create_test_notes_dir();
        create_test_file(&dir, "j.md", "---\n{\"title\": \"J\"}\n---\n");
        let mut notes = Notes::new();

        notes
            .load(
                dir.path().to_str().unwrap(),
                &LoadOptions::default().syntax(FrontmatterSyntax::Yaml),
            )
            .unwrap();

        assert_eq!(titles(&notes), vec!["J"]);
    }

    #[test]
    fn reduce_and_collect() {
        let dir = two_note_dir();
        let mut notes = Notes::new();
        notes
            .load(dir.path().to_str().unwrap(), &LoadOptions::default())
            .unwrap();

        let total_len = notes.reduce(0, |acc, data, _| acc + data.body.len());
        let collected = notes.collect();

        assert_eq!(total_len, collected.iter().map(|d| d.body.len()).sum::<usize>());
        assert_eq!(collected.len(), notes.iter().count());
    }

    #[test]
    fn transform_applies_to_every_note() {
        let dir = two_note_dir();
        let mut notes = Notes::new();
        notes
            .load(dir.path().to_str().unwrap(), &LoadOptions::default())
            .unwrap();

        let transform: Transform = FieldTransform::new()
            .metadata_key("project", |_| json!("p"))
            .into();
        notes.transform(&transform);

        assert!(notes.iter().all(|n| n.metadata()["project"] == json!("p")));
    }

    #[test]
    fn build_backlinks_on_loaded_corpus() {
        let dir = two_note_dir();
        let mut notes = Notes::new();
        notes
            .load(dir.path().to_str().unwrap(), &LoadOptions::default())
            .unwrap();

        notes.build_backlinks(&BacklinkOptions::default()).unwrap();

        let counts = notes.map(|data, _| data.metadata["backlinks"].as_array().map_or(0, Vec::len));
        assert_eq!(counts, vec![0, 1]);
    }

    #[test]
    fn export_empty_corpus_fails() {
        let notes = Notes::new();
        let err = notes.to_json(&ExportOptions::default()).unwrap_err();
        assert!(matches!(err, NoteError::EmptyCorpus));
    }

    #[test]
    fn export_json_with_transform_and_indent() {
        let dir = two_note_dir();
        let mut notes = Notes::new();
        notes
            .load(dir.path().to_str().unwrap(), &LoadOptions::default())
            .unwrap();
        let out = dir.path().join("export").join("notes.json");

        notes
            .export_json(
                &out,
                &ExportOptions {
                    indent: Some(2),
                    transform: Some(FieldTransform::new().body(|_| "x".to_string()).into()),
                },
            )
            .unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("[\n  {\n    \"body\": \"x\""));
        let exported: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(exported[1]["metadata"]["title"], json!("B"));
        assert_eq!(notes.iter().next().unwrap().body(), "See [[b]]\n");
    }
}
