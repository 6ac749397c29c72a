pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";

    /// Bytes that may not appear between `[[` and `]]`.
    pub fn is_forbidden(b: u8) -> bool {
        matches!(b, b'[' | b']' | super::LINE_END)
    }
}
