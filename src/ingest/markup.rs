//! # Markup Helpers
//!
//! Regex-based HTML reduction shared by the court adapters: text
//! extraction, link discovery, and URL resolution. Court sites serve
//! inconsistent, often invalid markup, so this is deliberately a lossy
//! text-level reduction rather than a DOM parser.

use crate::normalize::clean_text;
use once_cell::sync::Lazy;
use regex::Regex;

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static STYLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>").unwrap());
static ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*href\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a>"#).unwrap()
});

/// A hyperlink lifted out of markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub text: String,
}

/// Reduce an HTML document to visible text: comments, scripts, and styles
/// removed, tags replaced by spaces, common entities decoded, whitespace
/// collapsed.
pub fn html_to_text(html: &str) -> String {
    let without_comments = COMMENT_RE.replace_all(html, " ");
    let without_scripts = SCRIPT_RE.replace_all(&without_comments, " ");
    let without_styles = STYLE_RE.replace_all(&without_scripts, " ");
    let without_tags = TAG_RE.replace_all(&without_styles, " ");
    clean_text(&decode_entities(&without_tags))
}

/// Decode the handful of entities court pages actually use.
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
}

/// All anchors in the markup, with their visible text reduced to plain text.
pub fn links(html: &str) -> Vec<Link> {
    ANCHOR_RE
        .captures_iter(html)
        .map(|captures| Link {
            href: captures[1].trim().to_string(),
            text: html_to_text(&captures[2]),
        })
        .collect()
}

/// Resolve a possibly-relative href against a base URL.
pub fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if let Some(stripped) = href.strip_prefix('/') {
        format!("{}/{}", base_url.trim_end_matches('/'), stripped)
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), href)
    }
}

/// Inner text of the first match of `pattern` (capture group 1) in `html`,
/// reduced to plain text. Empty results are treated as misses.
pub fn first_capture_text(html: &str, pattern: &Regex) -> Option<String> {
    for captures in pattern.captures_iter(html) {
        if let Some(inner) = captures.get(1) {
            let text = html_to_text(inner.as_str());
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}
