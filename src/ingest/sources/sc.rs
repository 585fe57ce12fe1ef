//! # Supreme Court of India Adapter
//!
//! Maps pages from the Supreme Court judgments site into [`RawDocument`]s.
//! Judgment pages carry the case title in a heading, a decision date
//! somewhere in the page text, the bench in `Justice ...` honorific forms,
//! and a link to the judgment PDF.

use super::{extract_date, extract_title, find_pdf_link, CourtAdapter};
use crate::errors::{PipelineError, Result};
use crate::ingest::markup;
use crate::{metadata, RawDocument, SourceCourt};
use once_cell::sync::Lazy;
use regex::Regex;

const DEFAULT_BASE_URL: &str = "https://main.sci.gov.in";
const FALLBACK_TITLE: &str = "Unknown Case Title";

static JUDGMENT_HREF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/judgments/.+").unwrap());

/// Supreme Court of India markup adapter
pub struct ScAdapter {
    base_url: String,
}

impl ScAdapter {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Use a different base URL (mirrors, archived snapshots)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for ScAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl CourtAdapter for ScAdapter {
    fn court(&self) -> SourceCourt {
        SourceCourt::SupremeCourt
    }

    fn judgment_links(&self, listing_html: &str) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        markup::links(listing_html)
            .into_iter()
            .filter(|link| JUDGMENT_HREF_RE.is_match(&link.href))
            .map(|link| markup::absolute_url(&self.base_url, &link.href))
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }

    fn pdf_url(&self, page_html: &str) -> Option<String> {
        find_pdf_link(page_html, &self.base_url)
    }

    fn parse_judgment(
        &self,
        page_html: &str,
        body_text: &str,
        source_url: Option<&str>,
    ) -> Result<RawDocument> {
        if page_html.trim().is_empty() {
            return Err(PipelineError::Markup {
                source_name: self.court().name().to_string(),
                details: "Empty judgment page".to_string(),
            });
        }

        let title = extract_title(page_html).unwrap_or_else(|| FALLBACK_TITLE.to_string());
        let page_text = markup::html_to_text(page_html);
        let date = extract_date(&page_text, false).unwrap_or_default();
        let judges: Vec<String> = metadata::extract_judges(&page_text).into_iter().collect();
        let pdf_url = self.pdf_url(page_html);

        tracing::debug!(title = %title, date = %date, judges = judges.len(), "parsed SC judgment page");

        Ok(RawDocument {
            title,
            date,
            judges,
            body_text: body_text.to_string(),
            markup: Some(page_html.to_string()),
            source_court: SourceCourt::SupremeCourt,
            pdf_url,
            source_url: source_url.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head><title>Supreme Court of India</title></head><body>
        <h1>Arnesh Kumar vs State of Bihar</h1>
        <div class="meta">Decided on 02-07-2014 by Hon'ble Mr. Justice Prasad and Justice Ghose</div>
        <a href="/judgments/arnesh_kumar_2014.pdf">Download Judgment</a>
        </body></html>"#;

    #[test]
    fn test_parse_judgment_page() {
        let adapter = ScAdapter::new();
        let doc = adapter
            .parse_judgment(PAGE, "The appeal was allowed.", Some("https://main.sci.gov.in/judgments/1"))
            .unwrap();

        assert_eq!(doc.title, "Arnesh Kumar vs State of Bihar");
        assert_eq!(doc.date, "02-07-2014");
        assert_eq!(doc.judges.len(), 2);
        assert!(doc.judges.contains(&"Prasad".to_string()));
        assert_eq!(
            doc.pdf_url.as_deref(),
            Some("https://main.sci.gov.in/judgments/arnesh_kumar_2014.pdf")
        );
        assert_eq!(doc.source_court, SourceCourt::SupremeCourt);
    }

    #[test]
    fn test_listing_links_filtered_and_deduplicated() {
        let listing = r#"
            <a href="/judgments/one">One</a>
            <a href="/judgments/one">One again</a>
            <a href="/about">About</a>
            <a href="https://main.sci.gov.in/judgments/two">Two</a>"#;
        let links = ScAdapter::new().judgment_links(listing);
        assert_eq!(
            links,
            vec![
                "https://main.sci.gov.in/judgments/one".to_string(),
                "https://main.sci.gov.in/judgments/two".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_page_is_an_error() {
        assert!(ScAdapter::new().parse_judgment("  ", "", None).is_err());
    }

    #[test]
    fn test_missing_title_uses_fallback() {
        let doc = ScAdapter::new()
            .parse_judgment("<body><p>nothing useful</p></body>", "", None)
            .unwrap();
        assert_eq!(doc.title, FALLBACK_TITLE);
        assert_eq!(doc.date, "");
    }
}
