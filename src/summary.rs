//! # Hybrid Summary Composition Module
//!
//! ## Purpose
//! Produces the final extractive summary for a judgment by merging the
//! keyword-heuristic ranking with the statistical ranking and applying a
//! deterministic fallback chain that guarantees some output for any text
//! containing at least one usable sentence.
//!
//! ## Stage Chain
//! 1. Keyword-heuristic scoring over sentences above the heuristic minimum
//!    length; take the top `target_length`
//! 2. If under-supplied, append statistical ranking results, skipping
//!    duplicates (exact match after trim)
//! 3. If still short, append plain leading sentences above the summary
//!    minimum length
//! 4. If nothing at all was collected, take leading sentences above the
//!    last-resort minimum length
//!
//! Each stage only runs when the prior stage under-supplied. The composed
//! output is deterministic for identical input and configuration.

use crate::config::SummaryConfig;
use crate::errors::Result;
use crate::segment::segment;
use crate::{ranking, scoring};
use serde::{Deserialize, Serialize};

/// Minimum text length for the heuristic stage to engage
const MIN_HEURISTIC_TEXT_LEN: usize = 100;

/// Which summarization path produced a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryMethod {
    /// Keyword-heuristic scoring alone supplied every sentence
    Heuristic,
    /// Statistical ranking alone supplied every sentence
    Statistical,
    /// More than one stage contributed
    Hybrid,
    /// Only the leading-sentence fallback contributed
    FallbackTruncation,
}

/// Result of summary composition.
///
/// `sentences` is ordered by selection (not document order); `method` is
/// `None` exactly when no sentence could be extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub sentences: Vec<String>,
    pub method: Option<SummaryMethod>,
}

impl SummaryResult {
    /// An empty result, used for degenerate input
    pub fn empty() -> Self {
        Self {
            sentences: Vec::new(),
            method: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Join the selected sentences with `". "`, ensure the result ends with
    /// a single terminal period, and prepend `"{title}: "` when a title is
    /// supplied. Empty results render as an empty string; the caller is
    /// responsible for any placeholder policy.
    pub fn join_with_title(&self, title: Option<&str>) -> String {
        if self.sentences.is_empty() {
            return String::new();
        }
        let mut joined = self.sentences.join(". ");
        if !joined.ends_with('.') {
            joined.push('.');
        }
        match title {
            Some(title) if !title.trim().is_empty() => format!("{}: {}", title.trim(), joined),
            _ => joined,
        }
    }
}

/// Hybrid summary composer. Holds an immutable configuration; a single
/// instance can be shared across threads and documents.
#[derive(Debug, Clone)]
pub struct Summarizer {
    config: SummaryConfig,
}

impl Summarizer {
    /// Create a summarizer, rejecting invalid configuration eagerly.
    pub fn new(config: SummaryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Run the stage chain and return the selected sentences.
    ///
    /// Degenerate input (empty or whitespace-only text) yields an empty
    /// result; this never fails.
    pub fn compose(&self, text: &str) -> SummaryResult {
        let target = self.config.target_length;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SummaryResult::empty();
        }

        let mut selected: Vec<String> = Vec::new();
        let mut from_heuristic = 0usize;
        let mut from_statistical = 0usize;
        let mut from_fallback = 0usize;

        // Stage 1: keyword heuristics
        if trimmed.chars().count() >= MIN_HEURISTIC_TEXT_LEN {
            let sentences = segment(trimmed, self.config.min_heuristic_sentence_len);
            for scored in scoring::score_sentences(sentences).into_iter().take(target) {
                if push_unique(&mut selected, scored.sentence.text) {
                    from_heuristic += 1;
                }
            }
        }

        // Stage 2: statistical ranking
        if selected.len() < target {
            let ranked = ranking::rank_text(
                trimmed,
                target,
                self.config.statistical_method,
                &self.config,
            );
            for sentence in ranked {
                if selected.len() >= target {
                    break;
                }
                if push_unique(&mut selected, sentence.text) {
                    from_statistical += 1;
                }
            }
        }

        // Stage 3: plain leading sentences
        if selected.len() < target {
            for sentence in segment(trimmed, self.config.min_summary_sentence_len) {
                if selected.len() >= target {
                    break;
                }
                if push_unique(&mut selected, sentence.text) {
                    from_fallback += 1;
                }
            }
        }

        // Stage 4: last resort at the lowest threshold, only when the chain
        // produced nothing at all
        if selected.is_empty() {
            for sentence in
                segment(trimmed, self.config.min_fallback_sentence_len).take(target)
            {
                selected.push(sentence.text);
                from_fallback += 1;
            }
        }

        let method = match (
            from_heuristic > 0,
            from_statistical > 0,
            from_fallback > 0,
        ) {
            (false, false, false) => None,
            (true, false, false) => Some(SummaryMethod::Heuristic),
            (false, true, false) => Some(SummaryMethod::Statistical),
            (false, false, true) => Some(SummaryMethod::FallbackTruncation),
            _ => Some(SummaryMethod::Hybrid),
        };

        if from_fallback > 0 {
            tracing::debug!(
                heuristic = from_heuristic,
                statistical = from_statistical,
                fallback = from_fallback,
                "summary degraded to fallback sentences"
            );
        }

        SummaryResult {
            sentences: selected,
            method,
        }
    }

    /// Compose and render in one step: the joined summary string with the
    /// optional title prefix.
    pub fn summarize(&self, text: &str, title: Option<&str>) -> String {
        self.compose(text).join_with_title(title)
    }
}

fn push_unique(selected: &mut Vec<String>, candidate: String) -> bool {
    let candidate = candidate.trim().to_string();
    if candidate.is_empty() || selected.contains(&candidate) {
        return false;
    }
    selected.push(candidate);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summarizer() -> Summarizer {
        Summarizer::new(SummaryConfig::default()).unwrap()
    }

    fn judgment_text() -> String {
        "The appellant was arrested under Section 498A of the Indian Penal Code. \
         The court held that arrest is not mandatory merely because an offence is non-bailable. \
         Police officers were directed to satisfy themselves about the necessity of arrest under Section 41. \
         The magistrate shall record satisfaction before authorising further detention of the accused. \
         The appeal was allowed and the interim order was made absolute in these terms. \
         There was also a discussion of unrelated procedural history spanning several hearing dates."
            .to_string()
    }

    #[test]
    fn test_empty_input_returns_empty_result() {
        let result = summarizer().compose("");
        assert!(result.is_empty());
        assert_eq!(result.method, None);
        assert_eq!(result.join_with_title(Some("Title")), "");
    }

    #[test]
    fn test_nonempty_text_ends_with_single_period() {
        let result = summarizer().compose(&judgment_text());
        let joined = result.join_with_title(None);
        assert!(!joined.is_empty());
        assert!(joined.ends_with('.'));
        assert!(!joined.ends_with(".."));
    }

    #[test]
    fn test_heuristic_path_fills_target() {
        let result = summarizer().compose(&judgment_text());
        assert_eq!(result.sentences.len(), 4);
        assert_eq!(result.method, Some(SummaryMethod::Heuristic));
        // The top-scored operative sentence must be selected first
        assert!(result.sentences[0].contains("directed"));
    }

    #[test]
    fn test_short_text_uses_fallback() {
        // Below the 100-character heuristic floor and the 200-character
        // statistical floor, but with one sentence above the fallback bar
        let text = "This judgment text is short but it still has one sentence.";
        let result = summarizer().compose(text);
        assert_eq!(result.method, Some(SummaryMethod::FallbackTruncation));
        assert_eq!(result.sentences.len(), 1);
    }

    #[test]
    fn test_no_fabricated_sentences() {
        let text = judgment_text();
        let result = summarizer().compose(&text);
        for sentence in &result.sentences {
            assert!(text.contains(sentence), "fabricated: {}", sentence);
        }
    }

    #[test]
    fn test_deterministic() {
        let text = judgment_text();
        let s = summarizer();
        assert_eq!(s.compose(&text), s.compose(&text));
    }

    #[test]
    fn test_title_prefix() {
        let s = summarizer();
        let rendered = s.summarize(&judgment_text(), Some("Arnesh Kumar vs State of Bihar"));
        assert!(rendered.starts_with("Arnesh Kumar vs State of Bihar: "));
    }

    #[test]
    fn test_duplicate_sentences_selected_once() {
        let sentence = "The court held that the detention order must be quashed forthwith";
        let text = format!("{s}. {s}. {s}. {s}. {s}.", s = sentence);
        let result = summarizer().compose(&text);
        assert_eq!(result.sentences.len(), 1);
        assert_eq!(result.sentences[0], sentence);
    }

    #[test]
    fn test_zero_target_rejected_at_construction() {
        let mut config = SummaryConfig::default();
        config.target_length = 0;
        assert!(Summarizer::new(config).is_err());
    }
}
