//! # Metadata Extraction Module
//!
//! ## Purpose
//! Pulls judge names, the primary citation, referenced statutory sections,
//! and topical tags out of judgment text via pattern heuristics.
//!
//! ## Input/Output Specification
//! - **Input**: Case title and body text (markup already reduced to text)
//! - **Output**: [`LegalMetadata`] with deduplicated, deterministic sets
//! - **Guarantees**: Idempotent, no hidden state, no network or storage
//!
//! Extraction misses are represented as explicit values, never as errors:
//! an empty citation string, empty section/tag sets, and the
//! [`UNKNOWN_JUDGE`] sentinel when judge extraction ran and found nothing.
//! The section patterns are intentionally broad and will over-match; that
//! is accepted heuristic noise.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sentinel distinguishing "extraction found nothing" from "not attempted"
pub const UNKNOWN_JUDGE: &str = "Unknown Judge";

/// Topical tag vocabulary; matched terms are kept verbatim
pub const TAG_VOCABULARY: &[&str] = &[
    "bail",
    "anticipatory",
    "constitutional",
    "criminal",
    "civil",
    "writ",
    "petition",
    "appeal",
    "revision",
    "review",
    "498A",
    "IPC",
    "CrPC",
    "CPC",
    "Constitution",
];

static JUDGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Hon'ble Mr. Justice A B, Hon'ble Justice A B
        r"Hon'?ble\s+(?:Mr\.?\s+|Ms\.?\s+|Mrs\.?\s+)?Justice\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
        // Justice A B (also catches the tail of Mr. Justice forms)
        r"Justice\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
        // Coram: Hon'ble Mr. Justice A B
        r"Coram\s*:\s*(?:Hon'?ble\s+)?(?:Mr\.?\s+|Ms\.?\s+|Mrs\.?\s+)?(?:Justice\s+)?([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static CITATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // (2014) 8 SCC 273
        r"\(\d{4}\)\s+\d+\s+[A-Z]+\s+\d+",
        // WP 1234/2019
        r"[A-Z]+\s+\d+/\d+",
        // (2014) 8 SCC
        r"\(\d{4}\)\s+\d+\s+[A-Z]+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static SECTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Section 438 of the Code, Section 34 of IPC
        r"(?i)section\s+\d+[a-z]*\s+of\s+(?:the\s+)?[a-z]+",
        // Article 21, Article 226A
        r"(?i)article\s+\d+[a-z]*",
        // Bare abbreviation + number: IPC 302, CrPC 438. Requires at least
        // two capitals in the abbreviation so ordinary words stay out
        r"\b(?:[A-Z]+[a-z]*){2,}\s+\d+[A-Z]*\b",
        // Section 438
        r"(?i)section\s+\d+[a-z]*",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Extracted metadata for one judgment
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegalMetadata {
    /// Deduplicated judge names; contains [`UNKNOWN_JUDGE`] when none found
    pub judges: BTreeSet<String>,
    /// First citation match in priority order, empty when none matched
    pub citation: String,
    /// Union of statutory-reference matches
    pub referenced_sections: BTreeSet<String>,
    /// Matched tag vocabulary terms, verbatim
    pub tags: BTreeSet<String>,
}

impl LegalMetadata {
    /// Whether judge extraction found a real name rather than the sentinel
    pub fn judges_known(&self) -> bool {
        !self.judges.contains(UNKNOWN_JUDGE)
    }
}

/// Extract metadata from a judgment's title and body text.
///
/// Pure and idempotent: identical input always yields identical metadata.
pub fn extract(title: &str, body: &str) -> LegalMetadata {
    let combined = format!("{}\n{}", title, body);

    let mut judges = extract_judges(&combined);
    if judges.is_empty() {
        judges.insert(UNKNOWN_JUDGE.to_string());
    }

    LegalMetadata {
        judges,
        citation: extract_citation(&combined),
        referenced_sections: extract_sections(&combined),
        tags: extract_tags(title, body),
    }
}

/// Judge names matched by the honorific pattern families. The captured name
/// is stored without the honorific so different forms of the same name
/// deduplicate.
pub fn extract_judges(text: &str) -> BTreeSet<String> {
    let mut judges = BTreeSet::new();
    for pattern in JUDGE_PATTERNS.iter() {
        for captures in pattern.captures_iter(text) {
            if let Some(name) = captures.get(1) {
                judges.insert(name.as_str().to_string());
            }
        }
    }
    judges
}

/// First citation match, trying the patterns in priority order.
pub fn extract_citation(text: &str) -> String {
    for pattern in CITATION_PATTERNS.iter() {
        if let Some(m) = pattern.find(text) {
            return m.as_str().to_string();
        }
    }
    String::new()
}

/// Union of all statutory-reference matches across the pattern set.
pub fn extract_sections(text: &str) -> BTreeSet<String> {
    let mut sections = BTreeSet::new();
    for pattern in SECTION_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            sections.insert(m.as_str().to_string());
        }
    }
    sections
}

/// Tags from substring matches of the vocabulary against the lowercased
/// title and body.
pub fn extract_tags(title: &str, body: &str) -> BTreeSet<String> {
    let combined = format!("{} {}", title, body).to_lowercase();
    TAG_VOCABULARY
        .iter()
        .filter(|term| combined.contains(&term.to_lowercase()))
        .map(|term| term.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judges_deduplicated_across_forms() {
        let text = "Coram: Hon'ble Mr. Justice Prasad and Justice Ghose. \
                    Justice Prasad delivered the opinion of the bench.";
        let judges = extract_judges(text);
        assert_eq!(judges.len(), 2);
        assert!(judges.contains("Prasad"));
        assert!(judges.contains("Ghose"));
    }

    #[test]
    fn test_unknown_judge_sentinel() {
        let metadata = extract("Some title", "No names of note appear here at all.");
        assert_eq!(metadata.judges.len(), 1);
        assert!(metadata.judges.contains(UNKNOWN_JUDGE));
        assert!(!metadata.judges_known());
    }

    #[test]
    fn test_citation_priority_order() {
        // The full reporter form wins over the writ-petition form
        let text = "In WP 4125/2013, reported as (2014) 8 SCC 273, the court held.";
        assert_eq!(extract_citation(text), "(2014) 8 SCC 273");

        let text = "Arising out of WP 4125/2013 before this court.";
        assert_eq!(extract_citation(text), "WP 4125/2013");

        assert_eq!(extract_citation("no citation here"), "");
    }

    #[test]
    fn test_section_extraction() {
        let text = "Charged under Section 498A of IPC read with Article 21. See also CrPC 438.";
        let sections = extract_sections(text);
        assert!(sections.contains("Section 498A of IPC"));
        assert!(sections.contains("Article 21"));
        assert!(sections.contains("CrPC 438"));
        assert!(sections.contains("Section 498A"));
    }

    #[test]
    fn test_tags_matched_verbatim() {
        let metadata = extract(
            "Anticipatory bail application",
            "Petition under Section 438 CrPC for anticipatory bail in a criminal matter.",
        );
        assert!(metadata.tags.contains("bail"));
        assert!(metadata.tags.contains("anticipatory"));
        assert!(metadata.tags.contains("criminal"));
        assert!(metadata.tags.contains("CrPC"));
        assert!(metadata.tags.contains("petition"));
    }

    #[test]
    fn test_idempotent() {
        let title = "Arnesh Kumar vs State of Bihar";
        let body = "Justice Chandramauli delivered the judgment on 02-07-2014 under Section 438.";
        assert_eq!(extract(title, body), extract(title, body));
    }
}
