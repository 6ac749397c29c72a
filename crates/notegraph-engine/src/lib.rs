//! # notegraph-engine
//!
//! Loads Markdown notes with JSON or YAML frontmatter, extracts their
//! markdown and wiki links, and builds a backlink index across a corpus.

pub mod backlinks;
pub mod frontmatter;
pub mod io;
pub mod links;
pub mod models;
pub mod notes;
pub mod transform;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use backlinks::{BacklinkError, BacklinkIndex, BacklinkOptions, build_backlinks, default_key};
pub use frontmatter::{
    FrontmatterError, FrontmatterFormat, FrontmatterSyntax, Metadata, OutputFormat,
    compose_frontmatter, parse_frontmatter, split,
};
pub use io::IoError;
pub use links::{Link, LinkError, LinkStyle, extract_all_links};
pub use models::*;
pub use notes::{LoadOptions, LoadReport, Notes, SkippedNote};
pub use transform::{FieldTransform, MetadataTransform, Transform};
