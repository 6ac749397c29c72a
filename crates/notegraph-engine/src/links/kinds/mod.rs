//! # Link Kinds
//!
//! Each link kind owns its delimiters. The scanner calls these constants; it
//! never hardcodes `[[` or `](`.
//!
//! - **`WikiLink`**: `OPEN = b"[["`, `CLOSE = b"]]"`
//! - **`MarkdownLink`**: `LABEL_OPEN = b'['`, `LABEL_CLOSE = b']'`,
//!   `TARGET_OPEN = b'('`, `TARGET_CLOSE = b')'`

pub mod markdown_link;
pub mod wikilink;

pub use markdown_link::MarkdownLink;
pub use wikilink::WikiLink;

/// Bytes that end a link's inner text without closing it.
pub const LINE_END: u8 = b'\n';
