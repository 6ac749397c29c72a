//! # Transforms
//!
//! Caller-supplied edits to a note's `{body, metadata}` record.
//!
//! A [`Transform`] is either a whole-record function or a [`FieldTransform`]
//! holding an optional body function and an optional metadata function or
//! per-key function map. Every function in one application sees the
//! pre-transform record; results are committed together afterwards.

use serde_json::Value;

use crate::frontmatter::Metadata;
use crate::models::NoteData;

pub type RecordFn<'a> = Box<dyn Fn(&NoteData) -> NoteData + 'a>;
pub type BodyFn<'a> = Box<dyn Fn(&str) -> String + 'a>;
pub type MetadataFn<'a> = Box<dyn Fn(&Metadata) -> Metadata + 'a>;
pub type KeyValueFn<'a> = Box<dyn Fn(&Metadata) -> Value + 'a>;

pub enum Transform<'a> {
    /// Replaces the whole record. An empty body or empty metadata in the
    /// result keeps the previous value for that field.
    Record(RecordFn<'a>),
    Fields(FieldTransform<'a>),
}

pub enum MetadataTransform<'a> {
    /// Replaces metadata wholesale.
    Whole(MetadataFn<'a>),
    /// Each function receives the full metadata and its result is stored
    /// under its key. Keys not listed are left untouched.
    Keys(Vec<(String, KeyValueFn<'a>)>),
}

#[derive(Default)]
pub struct FieldTransform<'a> {
    pub body: Option<BodyFn<'a>>,
    pub metadata: Option<MetadataTransform<'a>>,
}

impl<'a> Transform<'a> {
    pub fn record(f: impl Fn(&NoteData) -> NoteData + 'a) -> Self {
        Transform::Record(Box::new(f))
    }
}

impl<'a> FieldTransform<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, f: impl Fn(&str) -> String + 'a) -> Self {
        self.body = Some(Box::new(f));
        self
    }

    /// Replaces metadata wholesale, discarding any per-key functions.
    pub fn metadata(mut self, f: impl Fn(&Metadata) -> Metadata + 'a) -> Self {
        self.metadata = Some(MetadataTransform::Whole(Box::new(f)));
        self
    }

    /// Adds a per-key metadata function. Replaces a wholesale metadata function.
    pub fn metadata_key(
        mut self,
        key: impl Into<String>,
        f: impl Fn(&Metadata) -> Value + 'a,
    ) -> Self {
        let entry = (key.into(), Box::new(f) as KeyValueFn<'a>);
        match &mut self.metadata {
            Some(MetadataTransform::Keys(fns)) => fns.push(entry),
            _ => self.metadata = Some(MetadataTransform::Keys(vec![entry])),
        }
        self
    }
}

impl<'a> From<FieldTransform<'a>> for Transform<'a> {
    fn from(fields: FieldTransform<'a>) -> Self {
        Transform::Fields(fields)
    }
}

/// Computes the record that results from applying `transform` to `data`.
pub fn apply(data: &NoteData, transform: &Transform<'_>) -> NoteData {
    match transform {
        Transform::Record(f) => {
            let next = f(data);
            NoteData {
                body: if next.body.is_empty() {
                    data.body.clone()
                } else {
                    next.body
                },
                metadata: if next.metadata.is_empty() {
                    data.metadata.clone()
                } else {
                    next.metadata
                },
            }
        }
        Transform::Fields(fields) => {
            let body = match &fields.body {
                Some(f) => f(&data.body),
                None => data.body.clone(),
            };
            let metadata = match &fields.metadata {
                Some(MetadataTransform::Whole(f)) => f(&data.metadata),
                Some(MetadataTransform::Keys(fns)) => {
                    let updates: Vec<(String, Value)> = fns
                        .iter()
                        .map(|(key, f)| (key.clone(), f(&data.metadata)))
                        .collect();
                    let mut metadata = data.metadata.clone();
                    metadata.extend(updates);
                    metadata
                }
                None => data.metadata.clone(),
            };
            NoteData { body, metadata }
        }
    }
}
