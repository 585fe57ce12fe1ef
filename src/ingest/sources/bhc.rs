//! # Bombay High Court Adapter
//!
//! Maps pages from the Bombay High Court site into [`RawDocument`]s. The
//! site mixes judgments and orders on one listing page, uses both numeric
//! and written-out dates, and does not always link a PDF, so this adapter
//! is more permissive than the Supreme Court one.

use super::{extract_date, extract_title, find_pdf_link, CourtAdapter};
use crate::errors::{PipelineError, Result};
use crate::ingest::markup;
use crate::{metadata, RawDocument, SourceCourt};
use once_cell::sync::Lazy;
use regex::Regex;

const DEFAULT_BASE_URL: &str = "https://bombayhighcourt.nic.in";
const FALLBACK_TITLE: &str = "Bombay High Court Judgment";

static JUDGMENT_HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)judgments?|order").unwrap());

/// Bombay High Court markup adapter
pub struct BhcAdapter {
    base_url: String,
}

impl BhcAdapter {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for BhcAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl CourtAdapter for BhcAdapter {
    fn court(&self) -> SourceCourt {
        SourceCourt::BombayHighCourt
    }

    fn judgment_links(&self, listing_html: &str) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        markup::links(listing_html)
            .into_iter()
            .filter(|link| {
                JUDGMENT_HREF_RE.is_match(&link.href) || JUDGMENT_HREF_RE.is_match(&link.text)
            })
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

        // Listing anchor text is often the only usable title on this site,
        // so the fallback is a generic label rather than an error
        let title = extract_title(page_html).unwrap_or_else(|| FALLBACK_TITLE.to_string());
        let page_text = markup::html_to_text(page_html);
        let date = extract_date(&page_text, true).unwrap_or_default();
        let judges: Vec<String> = metadata::extract_judges(&page_text).into_iter().collect();
        let pdf_url = self.pdf_url(page_html);

        tracing::debug!(title = %title, date = %date, "parsed BHC judgment page");

        Ok(RawDocument {
            title,
            date,
            judges,
            body_text: body_text.to_string(),
            markup: Some(page_html.to_string()),
            source_court: SourceCourt::BombayHighCourt,
            pdf_url,
            source_url: source_url.map(str::to_string),
        })
    }
}
