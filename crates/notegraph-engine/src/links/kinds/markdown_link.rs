pub struct MarkdownLink;

impl MarkdownLink {
    pub const LABEL_OPEN: u8 = b'[';
    pub const LABEL_CLOSE: u8 = b']';
    pub const TARGET_OPEN: u8 = b'(';
    pub const TARGET_CLOSE: u8 = b')';

    /// Bytes that may not appear inside `[...]`.
    pub fn is_forbidden_in_label(b: u8) -> bool {
        matches!(b, Self::LABEL_OPEN | Self::LABEL_CLOSE | super::LINE_END)
    }

    /// Bytes that may not appear inside `(...)`.
    pub fn is_forbidden_in_target(b: u8) -> bool {
        matches!(b, Self::TARGET_OPEN | Self::TARGET_CLOSE | super::LINE_END)
    }
}
