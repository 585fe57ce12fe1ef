//! # Court Sources Module
//!
//! ## Purpose
//! Defines the common adapter interface for court websites and shared
//! extraction helpers. An adapter maps already-fetched, site-specific
//! markup into the uniform [`RawDocument`] the core consumes; it is the
//! only per-source code in the system.
//!
//! ## Architecture
//! - `CourtAdapter` trait: common interface for all court sites
//! - `sc.rs`: Supreme Court of India implementation
//! - `bhc.rs`: Bombay High Court implementation
//! - Future courts are added by implementing the trait
//!
//! Adapters never fetch anything. The external fetch layer retrieves the
//! listing page, each judgment page, and the judgment PDF text, then hands
//! the strings to the adapter.

pub mod bhc;
pub mod sc;

use crate::errors::Result;
use crate::ingest::markup;
use crate::{RawDocument, SourceCourt};
use once_cell::sync::Lazy;
use regex::Regex;

/// Adapter from one court site's markup to raw documents
pub trait CourtAdapter: Send + Sync {
    /// Which court this adapter understands
    fn court(&self) -> SourceCourt;

    /// Candidate judgment page URLs found on a listing page, resolved to
    /// absolute URLs and deduplicated in order of appearance
    fn judgment_links(&self, listing_html: &str) -> Vec<String>;

    /// The judgment PDF URL on a judgment page, if one is discoverable
    fn pdf_url(&self, page_html: &str) -> Option<String>;

    /// Map a judgment page plus its externally extracted PDF text into a
    /// [`RawDocument`]. `body_text` may be empty when the PDF could not be
    /// decoded; the core degrades gracefully downstream.
    fn parse_judgment(
        &self,
        page_html: &str,
        body_text: &str,
        source_url: Option<&str>,
    ) -> Result<RawDocument>;
}

static HEADING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)<h1[^>]*>(.*?)</h1>",
        r"(?is)<h2[^>]*>(.*?)</h2>",
        r"(?is)<h3[^>]*>(.*?)</h3>",
        r#"(?is)<(?:div|span|p)[^>]*class\s*=\s*["'][^"']*title[^"']*["'][^>]*>(.*?)</(?:div|span|p)>"#,
        r"(?is)<title[^>]*>(.*?)</title>",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static NUMERIC_DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\d{1,2}[/-]\d{1,2}[/-]\d{4}",
        r"\d{4}[/-]\d{1,2}[/-]\d{1,2}",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static WORDY_DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\d{1,2}\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{4}",
        r"(?i)(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{1,2},?\s+\d{4}",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Case title from a judgment page: headings first, then elements with a
/// title-ish class, then the page `<title>`.
pub(crate) fn extract_title(page_html: &str) -> Option<String> {
    for pattern in HEADING_PATTERNS.iter() {
        if let Some(title) = markup::first_capture_text(page_html, pattern) {
            return Some(title);
        }
    }
    None
}

/// First date-looking string in the page text, numeric patterns first.
/// Returns `None` rather than the current date so parsing stays a pure
/// function of its input.
pub(crate) fn extract_date(page_text: &str, include_wordy: bool) -> Option<String> {
    for pattern in NUMERIC_DATE_PATTERNS.iter() {
        if let Some(m) = pattern.find(page_text) {
            return Some(m.as_str().to_string());
        }
    }
    if include_wordy {
        for pattern in WORDY_DATE_PATTERNS.iter() {
            if let Some(m) = pattern.find(page_text) {
                return Some(m.as_str().to_string());
            }
        }
    }
    None
}

/// PDF link discovery shared by the adapters: direct `.pdf` hrefs first,
/// then anchors whose visible text suggests a judgment download.
pub(crate) fn find_pdf_link(page_html: &str, base_url: &str) -> Option<String> {
    static PDF_HREF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.pdf$").unwrap());
    static DOWNLOAD_TEXT_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)download|pdf|judgment").unwrap());

    let all = markup::links(page_html);

    if let Some(link) = all.iter().find(|l| PDF_HREF_RE.is_match(&l.href)) {
        return Some(markup::absolute_url(base_url, &link.href));
    }
    all.iter()
        .find(|l| DOWNLOAD_TEXT_RE.is_match(&l.text))
        .map(|l| markup::absolute_url(base_url, &l.href))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_prefers_headings() {
        let html = "<title>site chrome</title><h1>Arnesh Kumar vs State of Bihar</h1>";
        assert_eq!(
            extract_title(html).as_deref(),
            Some("Arnesh Kumar vs State of Bihar")
        );
    }

    #[test]
    fn test_title_falls_back_to_title_tag() {
        let html = "<html><head><title>State vs Sharma | Judgments</title></head><body></body></html>";
        assert_eq!(
            extract_title(html).as_deref(),
            Some("State vs Sharma | Judgments")
        );
    }

    #[test]
    fn test_date_priority_and_purity() {
        assert_eq!(
            extract_date("decided on 02-07-2014 and reported later", false).as_deref(),
            Some("02-07-2014")
        );
        assert_eq!(
            extract_date("pronounced on 2 July 2014", true).as_deref(),
            Some("2 July 2014")
        );
        // No fabricated fallback date
        assert_eq!(extract_date("no date here", true), None);
    }

    #[test]
    fn test_pdf_link_discovery() {
        let html = r#"<a href="/about.html">About</a>
                      <a href="/judgments/jud_2014.pdf">Judgment</a>"#;
        assert_eq!(
            find_pdf_link(html, "https://court.gov.in").as_deref(),
            Some("https://court.gov.in/judgments/jud_2014.pdf")
        );

        let html = r#"<a href="/serve?id=42">Download Judgment</a>"#;
        assert_eq!(
            find_pdf_link(html, "https://court.gov.in").as_deref(),
            Some("https://court.gov.in/serve?id=42")
        );
    }
}
