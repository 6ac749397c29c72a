use super::{
    link::{Link, LinkStyle},
    scanner::scan_links,
};

type TextFn<'a> = Box<dyn Fn(&str) -> String + 'a>;

/// Options for rendering links as `<a>` tags.
#[derive(Default)]
pub struct HtmlLinkOptions<'a> {
    /// Literal attribute text appended inside the tag after `href`.
    pub attributes: Option<String>,
    /// Maps a link path to the emitted href. Identity when unset.
    pub transform_path: Option<TextFn<'a>>,
    /// Maps a link's inner text to the anchor text. Identity when unset.
    pub transform_inner_text: Option<TextFn<'a>>,
}

impl<'a> HtmlLinkOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = Some(attributes.into());
        self
    }

    pub fn transform_path(mut self, f: impl Fn(&str) -> String + 'a) -> Self {
        self.transform_path = Some(Box::new(f));
        self
    }

    pub fn transform_inner_text(mut self, f: impl Fn(&str) -> String + 'a) -> Self {
        self.transform_inner_text = Some(Box::new(f));
        self
    }

    fn href(&self, path: &str) -> String {
        match &self.transform_path {
            Some(f) => f(path),
            None => path.to_string(),
        }
    }

    fn text(&self, inner_text: &str) -> String {
        match &self.transform_inner_text {
            Some(f) => f(inner_text),
            None => inner_text.to_string(),
        }
    }

    fn extra_attributes(&self) -> Option<&str> {
        self.attributes.as_deref().filter(|a| !a.trim().is_empty())
    }
}

/// Rewrites every link of `style` in `content` into an anchor tag, leaving
/// all other text untouched.
pub fn links_to_html(content: &str, style: LinkStyle, options: &HtmlLinkOptions<'_>) -> String {
    let mut out = String::with_capacity(content.len());
    let mut last = 0;

    for m in scan_links(content).iter().filter(|m| m.style == style) {
        out.push_str(&content[last..m.full.start]);
        out.push_str(&render_anchor(&Link::from_match(content, m), options));
        last = m.full.end;
    }

    out.push_str(&content[last..]);
    out
}

pub fn markdown_links_to_html(content: &str, options: &HtmlLinkOptions<'_>) -> String {
    links_to_html(content, LinkStyle::Markdown, options)
}

pub fn wiki_links_to_html(content: &str, options: &HtmlLinkOptions<'_>) -> String {
    links_to_html(content, LinkStyle::Wiki, options)
}

fn render_anchor(link: &Link, options: &HtmlLinkOptions<'_>) -> String {
    let extra = options.extra_attributes();

    // A wiki link has no target of its own, so a caller-supplied href wins.
    let attributes = match extra {
        Some(attrs) if link.style() == LinkStyle::Wiki && has_href(attrs) => attrs.to_string(),
        _ => {
            let href = options.href(link.path());
            let href = format!(
                "href=\"{}\"",
                html_escape::encode_double_quoted_attribute(&href)
            );
            match extra {
                Some(attrs) => format!("{href} {attrs}"),
                None => href,
            }
        }
    };

    format!("<a {attributes}>{}</a>", options.text(link.inner_text()))
}

fn has_href(attributes: &str) -> bool {
    attributes
        .split_whitespace()
        .any(|attr| attr.starts_with("href="))
}
