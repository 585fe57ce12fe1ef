//! # Keyword Heuristic Scoring Module
//!
//! ## Purpose
//! Assigns an additive importance score to each sentence of a judgment using
//! fixed legal keyword vocabularies and pattern matches. This is the primary
//! signal for the hybrid summary composer.
//!
//! ## Scoring Rules (case-insensitive substring/regex matching)
//! - +3 per distinct verdict/disposition keyword matched
//! - +2 per distinct court/institution keyword matched
//! - +2 per distinct statutory-reference keyword matched
//! - +3 for a reporter citation such as `(2014) 8 SCC 273`
//! - +2 for a party separator (`vs`, `versus`, `v.`)
//! - +2 for a judge-name pattern (`Justice <Name>`)
//! - +1 for a numeric date pattern
//! - +1 for sentences longer than 100 characters
//!
//! Zero-scoring sentences remain candidates; exclusion happens only at
//! selection time, with ties broken by original document order.

use crate::{ScoredSentence, Sentence};
use once_cell::sync::Lazy;
use regex::Regex;

/// Verdict and disposition keywords that mark operative sentences
pub const VERDICT_KEYWORDS: &[&str] = &[
    "held",
    "directed",
    "guidelines",
    "ordered",
    "ruled",
    "decided",
    "concluded",
    "determined",
    "found",
    "established",
    "declared",
    "maintained",
    "observed",
    "noted",
    "emphasized",
    "highlighted",
    "clarified",
    "interpreted",
    "construed",
    "applied",
    "followed",
    "overruled",
    "distinguished",
    "approved",
    "disapproved",
    "rejected",
    "allowed",
    "dismissed",
    "quashed",
    "set aside",
    "remanded",
    "affirmed",
    "reversed",
    "modified",
    "varied",
    "substituted",
];

/// Court and institution keywords
pub const COURT_KEYWORDS: &[&str] = &[
    "supreme court",
    "high court",
    "district court",
    "tribunal",
    "commission",
    "authority",
    "board",
    "council",
];

/// Statutory-reference keywords
pub const SECTION_KEYWORDS: &[&str] = &[
    "section",
    "article",
    "clause",
    "sub-section",
    "proviso",
    "schedule",
    "act",
    "code",
    "regulation",
    "rule",
];

static CITATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\d{4}\)\s+\d+\s+[A-Z]+\s+\d+").unwrap());
static PARTY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(vs|versus|v\.)\b").unwrap());
static JUDGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Justice\s+[A-Z]").unwrap());
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,2}[-/]\d{1,2}[-/]\d{4}").unwrap());

/// Score a single sentence. Always succeeds; unmatched sentences score 0.
pub fn score(sentence: &str) -> u32 {
    let mut total = 0u32;
    let lower = sentence.to_lowercase();

    for keyword in VERDICT_KEYWORDS {
        if lower.contains(keyword) {
            total += 3;
        }
    }

    for keyword in COURT_KEYWORDS {
        if lower.contains(keyword) {
            total += 2;
        }
    }

    for keyword in SECTION_KEYWORDS {
        if lower.contains(keyword) {
            total += 2;
        }
    }

    if CITATION_RE.is_match(sentence) {
        total += 3;
    }

    if PARTY_RE.is_match(sentence) {
        total += 2;
    }

    if JUDGE_RE.is_match(sentence) {
        total += 2;
    }

    if DATE_RE.is_match(sentence) {
        total += 1;
    }

    // Longer sentences tend to carry the operative reasoning
    if sentence.chars().count() > 100 {
        total += 1;
    }

    total
}

/// Score a sentence sequence and return it ordered by score descending,
/// breaking ties by original document position. An empty input yields an
/// empty result.
pub fn score_sentences<I>(sentences: I) -> Vec<ScoredSentence>
where
    I: IntoIterator<Item = Sentence>,
{
    let mut scored: Vec<ScoredSentence> = sentences
        .into_iter()
        .map(|sentence| {
            let heuristic_score = score(&sentence.text);
            ScoredSentence {
                sentence,
                heuristic_score,
                statistical_rank: None,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.heuristic_score
            .cmp(&a.heuristic_score)
            .then(a.sentence.position.cmp(&b.sentence.position))
    });

    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_and_section_keywords() {
        let s = "The court held that the appellant is entitled to anticipatory bail under Section 438.";
        // "held" (+3) and "section" (+2)
        assert_eq!(score(s), 5);
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        assert_eq!(score("held and held and held again"), 3);
    }

    #[test]
    fn test_citation_pattern() {
        assert_eq!(score("Reported in (2014) 8 SCC 273 accordingly"), 3);
    }

    #[test]
    fn test_party_separator_and_judge() {
        // "vs" (+2) and "Justice N" (+2)
        assert_eq!(score("Kumar vs State, per Justice Nariman"), 4);
    }

    #[test]
    fn test_length_bonus() {
        let long = "x".repeat(101);
        assert_eq!(score(&long), 1);
        let short = "x".repeat(100);
        assert_eq!(score(&short), 0);
    }

    #[test]
    fn test_zero_score_sentences_are_retained() {
        let sentences = vec![
            Sentence {
                text: "Nothing legal about this line".to_string(),
                position: 0,
            },
            Sentence {
                text: "The appeal is dismissed".to_string(),
                position: 1,
            },
        ];
        let scored = score_sentences(sentences);
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].sentence.position, 1);
        assert_eq!(scored[1].heuristic_score, 0);
    }

    #[test]
    fn test_ties_keep_document_order() {
        let sentences = vec![
            Sentence {
                text: "The petition was dismissed by the bench".to_string(),
                position: 3,
            },
            Sentence {
                text: "The petition was allowed by the bench".to_string(),
                position: 1,
            },
        ];
        let scored = score_sentences(sentences);
        assert_eq!(scored[0].heuristic_score, scored[1].heuristic_score);
        assert_eq!(scored[0].sentence.position, 1);
        assert_eq!(scored[1].sentence.position, 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(score_sentences(Vec::new()).is_empty());
    }
}
