use super::{
    cursor::Cursor,
    kinds::{MarkdownLink, WikiLink},
    link::{Link, LinkStyle},
    span::Span,
};

/// One link occurrence located in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkMatch {
    pub style: LinkStyle,
    /// Full span including delimiters.
    pub full: Span,
    /// Span of the label: inside `[...]` or `[[...]]`.
    pub label: Span,
    /// Span of the target: inside `(...)`, or the label for wiki links.
    pub target: Span,
}

/// Finds every link occurrence in `s`, left to right, without overlaps.
pub fn scan_links(s: &str) -> Vec<LinkMatch> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];

    while !cur.eof() {
        if let Some(m) = try_parse_wikilink(&mut cur) {
            out.push(m);
            continue;
        }
        if let Some(m) = try_parse_markdown_link(&mut cur) {
            out.push(m);
            continue;
        }
        cur.bump();
    }

    out
}

/// Extracts one [`Link`] per occurrence in `body`, in document order.
pub fn extract_all_links(body: &str) -> Vec<Link> {
    scan_links(body)
        .into_iter()
        .map(|m| Link::from_match(body, &m))
        .collect()
}

/// Returns the first occurrence of the given style in `s`.
pub(crate) fn find_first(s: &str, style: LinkStyle) -> Option<LinkMatch> {
    let mut cur = Cursor::new(s);

    while !cur.eof() {
        let found = match style {
            LinkStyle::Wiki => try_parse_wikilink(&mut cur),
            LinkStyle::Markdown => try_parse_markdown_link(&mut cur),
        };
        if found.is_some() {
            return found;
        }
        cur.bump();
    }

    None
}

/// Attempts to parse `[[text]]` at the current position.
///
/// On failure the cursor is restored.
fn try_parse_wikilink(cur: &mut Cursor<'_>) -> Option<LinkMatch> {
    if !cur.starts_with(WikiLink::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(WikiLink::OPEN.len());
    let inner_start = cur.pos();
    let inner_end = cur.eat_until(WikiLink::is_forbidden);

    if !cur.starts_with(WikiLink::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump_n(WikiLink::CLOSE.len());

    let inner = Span::new(inner_start, inner_end);
    Some(LinkMatch {
        style: LinkStyle::Wiki,
        full: Span::new(start, cur.pos()),
        label: inner,
        target: inner,
    })
}

/// Attempts to parse `[label](target)` at the current position.
///
/// On failure the cursor is restored.
fn try_parse_markdown_link(cur: &mut Cursor<'_>) -> Option<LinkMatch> {
    if cur.peek() != Some(MarkdownLink::LABEL_OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump();

    let label_start = cur.pos();
    let label_end = cur.eat_until(MarkdownLink::is_forbidden_in_label);
    if !cur.eat(MarkdownLink::LABEL_CLOSE) || !cur.eat(MarkdownLink::TARGET_OPEN) {
        *cur = saved;
        return None;
    }

    let target_start = cur.pos();
    let target_end = cur.eat_until(MarkdownLink::is_forbidden_in_target);
    if !cur.eat(MarkdownLink::TARGET_CLOSE) {
        *cur = saved;
        return None;
    }

    Some(LinkMatch {
        style: LinkStyle::Markdown,
        full: Span::new(start, cur.pos()),
        label: Span::new(label_start, label_end),
        target: Span::new(target_start, target_end),
    })
}
