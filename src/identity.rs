//! # Identity & Dedup Key Module
//!
//! Derives the stable identity key the external store uses to detect that
//! two ingested documents represent the same underlying case. The key is a
//! pure function of its inputs: no clock, no randomness, so re-ingesting
//! the same source document always yields the same key.

use crate::DocumentKey;

/// Build a dedup key from a court prefix, a case title, and a free-form
/// date string.
///
/// The title is stripped of non-alphanumeric characters (whitespace kept),
/// reduced to its first three whitespace-delimited tokens, lowercased, and
/// joined with `_`. The date is reduced to its first eight digits. The key
/// is `"{court_prefix}_{title_tokens}_{date_digits}"`.
///
/// Titles with fewer than three tokens and dates with fewer than eight
/// digits use as many as exist; such keys collide more easily across
/// distinct documents, which is an accepted limitation of the scheme.
pub fn make_key(court_prefix: &str, title: &str, date: &str) -> DocumentKey {
    let cleaned: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    let title_part = cleaned
        .split_whitespace()
        .take(3)
        .map(|token| token.to_lowercase())
        .collect::<Vec<_>>()
        .join("_");

    let date_part: String = date.chars().filter(|c| c.is_ascii_digit()).take(8).collect();

    DocumentKey(format!("{}_{}_{}", court_prefix, title_part, date_part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key() {
        let key = make_key("sc", "Arnesh Kumar vs State of Bihar", "2014-07-02");
        assert_eq!(key.as_str(), "sc_arnesh_kumar_vs_20140702");
    }

    #[test]
    fn test_pure_function() {
        let a = make_key("dhc", "State vs Sharma", "12/03/2021");
        let b = make_key("dhc", "State vs Sharma", "12/03/2021");
        assert_eq!(a, b);
    }

    #[test]
    fn test_differing_titles_differ() {
        let a = make_key("sc", "Arnesh Kumar vs State of Bihar", "2014-07-02");
        let b = make_key("sc", "Joseph Shine vs Union of India", "2014-07-02");
        assert_ne!(a, b);
    }

    #[test]
    fn test_punctuation_stripped_before_tokenizing() {
        let key = make_key("bhc", "M/s. A.B.C. Ltd. vs State", "01-01-2020");
        // "M/s." collapses to "Ms", "A.B.C." to "ABC"
        assert_eq!(key.as_str(), "bhc_ms_abc_ltd_01012020");
    }

    #[test]
    fn test_short_title_and_date() {
        let key = make_key("sc", "In Re", "7/2");
        assert_eq!(key.as_str(), "sc_in_re_72");

        let key = make_key("sc", "", "");
        assert_eq!(key.as_str(), "sc__");
    }

    #[test]
    fn test_date_digits_truncated_to_eight() {
        let key = make_key("sc", "One Two Three Four", "2014-07-02T10:30:00");
        assert_eq!(key.as_str(), "sc_one_two_three_20140702");
    }
}
