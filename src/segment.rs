//! # Sentence Segmentation Module
//!
//! ## Purpose
//! Splits raw judgment text into candidate sentences on runs of terminal
//! punctuation, discarding fragments below a per-stage minimum length.
//!
//! This is a punctuation-boundary heuristic. It will mis-segment
//! abbreviations and citations, which is acceptable because downstream
//! scoring is itself heuristic.

use crate::Sentence;

/// Lazy, restartable iterator over the sentences of a text.
///
/// The iterator is `Clone`, so a caller can restart segmentation from the
/// beginning at any point without re-allocating. Degenerate input (empty
/// text, punctuation only) yields an empty sequence rather than an error.
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    rest: &'a str,
    min_len: usize,
    position: usize,
}

/// Segment `text` into sentences, keeping only fragments whose trimmed
/// length exceeds `min_len` characters.
///
/// `position` on each emitted [`Sentence`] counts every raw fragment in
/// order of appearance, including discarded ones, so positions are
/// comparable across calls with different thresholds.
pub fn segment(text: &str, min_len: usize) -> Sentences<'_> {
    Sentences {
        rest: text,
        min_len,
        position: 0,
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

impl<'a> Iterator for Sentences<'a> {
    type Item = Sentence;

    fn next(&mut self) -> Option<Sentence> {
        while !self.rest.is_empty() {
            let (fragment, remainder) = match self.rest.find(is_terminal) {
                Some(idx) => {
                    let after = &self.rest[idx..];
                    // Consume the whole punctuation run ("...", "?!")
                    let run_end = after
                        .char_indices()
                        .find(|(_, c)| !is_terminal(*c))
                        .map(|(i, _)| i)
                        .unwrap_or(after.len());
                    (&self.rest[..idx], &after[run_end..])
                }
                None => (self.rest, ""),
            };
            self.rest = remainder;

            let position = self.position;
            self.position += 1;

            let trimmed = fragment.trim();
            if trimmed.chars().count() > self.min_len {
                return Some(Sentence {
                    text: trimmed.to_string(),
                    position,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discards_short_fragments() {
        let sentences: Vec<_> =
            segment("A. B. This is a proper sentence of reasonable length.", 20).collect();
        assert_eq!(sentences.len(), 1);
        assert_eq!(
            sentences[0].text,
            "This is a proper sentence of reasonable length"
        );
    }

    #[test]
    fn test_empty_input_yields_empty_sequence() {
        assert_eq!(segment("", 20).count(), 0);
        assert_eq!(segment("   ", 20).count(), 0);
        assert_eq!(segment("...!!!???", 20).count(), 0);
    }

    #[test]
    fn test_punctuation_runs_are_one_boundary() {
        let sentences: Vec<_> = segment(
            "Is this the first proper sentence?! It certainly looks like one to me...",
            10,
        )
        .collect();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Is this the first proper sentence");
        assert_eq!(sentences[1].text, "It certainly looks like one to me");
    }

    #[test]
    fn test_trailing_text_without_terminator() {
        let sentences: Vec<_> = segment("The appeal was allowed with costs", 10).collect();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].position, 0);
    }

    #[test]
    fn test_positions_count_discarded_fragments() {
        let sentences: Vec<_> = segment("Ok. This sentence easily clears the bar. No.", 10).collect();
        // Fragment 0 ("Ok") and fragment 2 ("No") are discarded
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].position, 1);
    }

    #[test]
    fn test_restartable() {
        let iter = segment("One decent sentence here. Another decent sentence there.", 10);
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
