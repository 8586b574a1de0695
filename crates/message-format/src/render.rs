//! Markdown → Telegram HTML rendering.
//!
//! Telegram's HTML parse mode knows `<b>`, `<i>`, `<a>` and `<pre>` but no headings, so the
//! renderer maps the small Markdown subset agents use in chat replies onto those tags.
//! [`PIPELINE`] lists the stages in the order they must run: escaping comes first so that tags
//! inserted later are never escaped, and bold runs before italic so `**` is consumed before
//! single `*` is looked at. Unmatched markers are left as escaped literal text. The emphasis
//! stages treat tags inserted earlier as opaque, so a `*` inside an `href` is never rewritten.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A pure text transform over the whole chunk.
pub type Stage = fn(&str) -> String;

/// Rendering stages, applied in order by [`render`].
pub const PIPELINE: [(&str, Stage); 6] = [
    ("escape", escape_html),
    ("tables", wrap_tables),
    ("headers", bold_headers),
    ("links", convert_links),
    ("bold", convert_bold),
    ("italic", convert_italic),
];

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\|.+\|\n\|[-:\s|]+\|\n(?:\|.*\|\n?)*)").expect("table regex is valid")
});

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}[ \t]+(.+)$").expect("header regex is valid"));

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").expect("link regex is valid")
});

// Group 1 matches a whole tag so it is skipped; group 2 is the emphasized span, which may
// contain whole tags but never part of one.
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(<[^>]*>)|\*\*((?:<[^>]*>|[^<\n])+?)\*\*").expect("bold regex is valid")
});

static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(<[^>]*>)|\*((?:<[^>]*>|[^<\n])+?)\*").expect("italic regex is valid")
});

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a href="([^"]*)">(.*?)</a>"#).expect("anchor regex is valid")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex is valid"));

/// Renders one Markdown chunk into Telegram HTML. Never fails.
pub fn render(chunk: &str) -> String {
    PIPELINE
        .iter()
        .fold(chunk.to_string(), |text, (_, stage)| stage(&text))
}

/// Escapes `&`, `<`, `>`, `"` and `'`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps a Markdown table (header row, separator row, body rows) in `<pre>` verbatim.
pub fn wrap_tables(text: &str) -> String {
    TABLE_RE.replace_all(text, "<pre>${1}</pre>").into_owned()
}

/// `# Title` .. `###### Title` → `<b>Title</b>`.
pub fn bold_headers(text: &str) -> String {
    HEADER_RE.replace_all(text, "<b>${1}</b>").into_owned()
}

/// `[label](https://…)` → `<a href="https://…">label</a>`; other schemes stay literal.
pub fn convert_links(text: &str) -> String {
    LINK_RE
        .replace_all(text, r#"<a href="${2}">${1}</a>"#)
        .into_owned()
}

pub fn convert_bold(text: &str) -> String {
    wrap_outside_tags(&BOLD_RE, text, "b")
}

pub fn convert_italic(text: &str) -> String {
    wrap_outside_tags(&ITALIC_RE, text, "i")
}

fn wrap_outside_tags(re: &Regex, text: &str, tag: &str) -> String {
    re.replace_all(text, |caps: &Captures| match caps.get(2) {
        Some(inner) => format!("<{tag}>{}</{tag}>", inner.as_str()),
        None => caps[0].to_string(),
    })
    .into_owned()
}

/// Turns rendered HTML back into readable plain text: links become `label (url)`, other tags
/// are dropped and entities are unescaped. Used when Telegram rejects the HTML.
pub fn to_plain_text(html: &str) -> String {
    let text = ANCHOR_RE.replace_all(html, "${2} (${1})");
    let text = TAG_RE.replace_all(&text, "");
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
