/// The line that opens and closes a frontmatter block.
pub const DELIMITER: &str = "---";

/// A note's text divided into frontmatter and body, borrowed from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Text strictly between the delimiter lines, without their line endings.
    pub frontmatter: &'a str,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
    /// Whether a complete delimited block was found.
    pub delimited: bool,
}

/// Splits `text` into frontmatter and body.
///
/// The opening delimiter must be the very first line; the first delimiter
/// line after it closes the block. Without a complete block the whole text
/// is the body and the frontmatter is empty.
pub fn split(text: &str) -> Split<'_> {
    let undelimited = Split {
        frontmatter: "",
        body: text,
        delimited: false,
    };

    let Some((first, block_start)) = next_line(text, 0) else {
        return undelimited;
    };
    if !is_delimiter(first) {
        return undelimited;
    }

    let mut line_start = block_start;
    while let Some((line, next)) = next_line(text, line_start) {
        if is_delimiter(line) {
            let inner = &text[block_start..line_start];
            let inner = inner.strip_suffix('\n').unwrap_or(inner);
            let inner = inner.strip_suffix('\r').unwrap_or(inner);
            return Split {
                frontmatter: inner,
                body: &text[next..],
                delimited: true,
            };
        }
        line_start = next;
    }

    undelimited
}

/// Returns the line starting at `from` (without its `\n`) and the offset of
/// the following line.
fn next_line(text: &str, from: usize) -> Option<(&str, usize)> {
    if from >= text.len() {
        return None;
    }
    let rest = &text[from..];
    match rest.find('\n') {
        Some(i) => Some((&rest[..i], from + i + 1)),
        None => Some((rest, text.len())),
    }
}

fn is_delimiter(line: &str) -> bool {
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.trim_end_matches([' ', '\t']) == DELIMITER
}
