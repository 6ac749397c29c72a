use serde::Serialize;

use super::scanner::{LinkMatch, find_first};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    Markdown,
    Wiki,
}

impl LinkStyle {
    /// Classifies a link occurrence: `Wiki` if it contains a well-formed
    /// `[[...]]`, otherwise `Markdown`.
    ///
    /// Stateless; each call scans with a fresh cursor.
    pub fn detect(text: &str) -> Self {
        if find_first(text, LinkStyle::Wiki).is_some() {
            LinkStyle::Wiki
        } else {
            LinkStyle::Markdown
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("Not a {style:?} link: {text:?}")]
    Malformed { style: LinkStyle, text: String },
}

/// A single extracted cross-reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    style: LinkStyle,
    path: String,
    inner_text: String,
}

impl Link {
    /// Builds a link from the text of one occurrence, e.g. `[see](./Note2.md)`
    /// or `[[Note2]]`.
    ///
    /// The occurrence must start the text; anything after it is ignored.
    pub fn parse(occurrence: &str) -> Result<Self, LinkError> {
        let style = LinkStyle::detect(occurrence);
        match find_first(occurrence, style) {
            Some(m) if m.full.start == 0 => Ok(Self::from_match(occurrence, &m)),
            _ => Err(LinkError::Malformed {
                style,
                text: occurrence.to_string(),
            }),
        }
    }

    /// Builds a link from a match located by the scanner in `text`.
    pub fn from_match(text: &str, m: &LinkMatch) -> Self {
        Self {
            style: m.style,
            path: m.target.slice(text).to_string(),
            inner_text: m.label.slice(text).to_string(),
        }
    }

    pub fn style(&self) -> LinkStyle {
        self.style
    }

    /// The link target. For wiki links this is the bracketed text.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn inner_text(&self) -> &str {
        &self.inner_text
    }
}

impl std::str::FromStr for Link {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
