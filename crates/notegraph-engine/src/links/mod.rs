//! # Links
//!
//! Cursor-based extraction of cross-references from note bodies.
//!
//! ## Syntaxes
//!
//! - **Markdown**: `[label](target)`, label and target differ
//! - **Wiki**: `[[target]]`, the bracketed text is both label and target
//!
//! Both are single-line and non-nested. At any position the two shapes are
//! mutually exclusive (a markdown label cannot start with `[`), so a
//! left-to-right scan trying each shape in turn yields the same result as a
//! longest-match rule.
//!
//! ## Modules
//!
//! - **`kinds`**: delimiter constants owned by each link kind
//! - **`cursor`**: `Cursor` for byte-by-byte scanning with position tracking
//! - **`scanner`**: `scan_links()` / `extract_all_links()` entry points
//! - **`link`**: the `Link` model and style detection
//! - **`html`**: rewriting links of one style into anchor tags
//!
//! Every scan builds its own `Cursor`; no match state outlives a call.

pub mod cursor;
pub mod html;
pub mod kinds;
pub mod link;
pub mod scanner;
pub mod span;

pub use html::{HtmlLinkOptions, links_to_html, markdown_links_to_html, wiki_links_to_html};
pub use link::{Link, LinkError, LinkStyle};
pub use scanner::{LinkMatch, extract_all_links, scan_links};
pub use span::Span;
