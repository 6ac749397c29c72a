//! # Frontmatter
//!
//! Splitting a note into its `---` delimited metadata block and body, decoding
//! the block into [`Metadata`], and composing it back for writing.
//!
//! ## Modules
//!
//! - **`split`**: locates the delimiter lines, never fails
//! - **`parse`**: JSON-then-YAML decoding and provenance merging
//! - **`compose`**: renders metadata back into a delimited block

pub mod compose;
pub mod parse;
pub mod split;

pub use compose::{FrontmatterFormat, OutputFormat, compose_frontmatter};
pub use parse::{
    FrontmatterSyntax, Metadata, parse_frontmatter, parse_frontmatter_as, with_provenance,
};
pub use split::{DELIMITER, Split, split};

/// Key under which the loader stores file provenance.
pub const FILE_KEY: &str = "file";

#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Could not parse frontmatter as JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("Could not parse frontmatter as YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),
    #[error("Frontmatter must be a mapping, found {0}")]
    NotAMapping(&'static str),
    #[error("Could not serialize frontmatter as JSON: {0}")]
    SerializeJson(#[source] serde_json::Error),
    #[error("Could not serialize frontmatter as YAML: {0}")]
    SerializeYaml(#[source] serde_yaml::Error),
}

impl FrontmatterError {
    /// True for decoding failures, false for failures while writing.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            FrontmatterError::Json(_) | FrontmatterError::Yaml(_) | FrontmatterError::NotAMapping(_)
        )
    }
}
