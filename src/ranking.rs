//! # Statistical Sentence Ranking Module
//!
//! ## Purpose
//! Ranks sentences by corpus-level importance, independently of the keyword
//! heuristics, using one of three deterministic methods over a
//! term-frequency representation of the sentence set:
//!
//! - `topic-projection`: power iteration on the sentence Gram matrix,
//!   scoring sentences by their projection onto the dominant topic direction
//! - `lexical-graph-centrality`: damped stationary distribution over a
//!   thresholded cosine-similarity graph of TF-IDF sentence vectors
//! - `cooccurrence-graph-rank`: damped stationary distribution over a
//!   normalized shared-term overlap graph
//!
//! ## Contract
//! Deterministic for identical input and configuration. Documents shorter
//! than 200 characters rank to an empty result. Internal numerical
//! degeneracy (empty vocabulary, zero norms, non-finite scores) degrades to
//! an empty result and is never propagated as an error; this ranking is a
//! best-effort secondary signal.

use crate::config::{Language, StatisticalMethod, SummaryConfig};
use crate::segment::segment;
use crate::Sentence;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Minimum body-text length for statistical ranking to engage
pub const MIN_RANK_TEXT_LEN: usize = 200;

const DAMPING: f64 = 0.85;
const ITERATIONS: usize = 50;
const COSINE_THRESHOLD: f64 = 0.1;

static ENGLISH_STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
        "it", "its", "of", "on", "that", "the", "to", "was", "will", "with", "this", "but",
        "they", "have", "had", "what", "said", "each", "which", "she", "do", "how", "their",
        "if", "up", "out", "many", "then", "them", "these", "so", "some", "her", "would",
        "make", "like", "into", "him", "time", "two", "more", "go", "no", "way", "could", "my",
        "than", "first", "been", "call", "who", "now", "find", "down", "day", "did", "get",
        "come", "made", "may", "part", "shall", "such", "any", "not", "or", "there", "where",
        "upon", "under", "also", "being", "before", "after",
    ]
    .into_iter()
    .collect()
});

fn stop_words(language: Language) -> &'static HashSet<&'static str> {
    match language {
        Language::English => &ENGLISH_STOP_WORDS,
    }
}

/// Strip common English suffixes. Deliberately crude; it only needs to fold
/// inflected forms onto a shared stem for term matching.
fn stem(word: &str) -> String {
    const SUFFIXES: &[(&str, &str)] = &[
        ("ations", "ate"),
        ("ation", "ate"),
        ("ities", "ity"),
        ("ness", ""),
        ("ment", "ment"),
        ("ingly", ""),
        ("ings", ""),
        ("ing", ""),
        ("ied", "y"),
        ("ies", "y"),
        ("edly", ""),
        ("ed", ""),
        ("ers", "er"),
        ("ly", ""),
        ("es", "e"),
        ("s", ""),
    ];

    if word.len() <= 3 {
        return word.to_string();
    }
    for (suffix, replacement) in SUFFIXES {
        if let Some(base) = word.strip_suffix(suffix) {
            if base.len() + replacement.len() >= 3 {
                return format!("{}{}", base, replacement);
            }
        }
    }
    word.to_string()
}

/// Tokenize a sentence into normalized terms according to the configuration.
fn terms(sentence: &str, config: &SummaryConfig) -> Vec<String> {
    let stops = stop_words(config.language);
    sentence
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 2)
        .map(|w| w.to_lowercase())
        .filter(|w| !config.remove_stopwords || !stops.contains(w.as_str()))
        .map(|w| {
            if config.enable_stemming {
                stem(&w)
            } else {
                w
            }
        })
        .collect()
}

/// Sparse term-frequency vector, sorted by term id so that dot products are
/// evaluated in a fixed order (floating-point determinism).
type SparseVec = Vec<(u32, f64)>;

struct TermMatrix {
    /// One sparse vector per usable sentence
    vectors: Vec<SparseVec>,
    /// Document frequency per term id
    document_frequency: HashMap<u32, usize>,
    /// Token count per usable sentence (pre-dedup)
    token_counts: Vec<usize>,
}

fn build_term_matrix(
    sentences: &[&Sentence],
    config: &SummaryConfig,
) -> Option<TermMatrix> {
    let mut vocabulary: HashMap<String, u32> = HashMap::new();
    let mut vectors = Vec::with_capacity(sentences.len());
    let mut token_counts = Vec::with_capacity(sentences.len());
    let mut document_frequency: HashMap<u32, usize> = HashMap::new();

    for sentence in sentences {
        let tokens = terms(&sentence.text, config);
        token_counts.push(tokens.len());

        let mut counts: HashMap<u32, f64> = HashMap::new();
        for token in tokens {
            let next_id = vocabulary.len() as u32;
            let id = *vocabulary.entry(token).or_insert(next_id);
            *counts.entry(id).or_insert(0.0) += 1.0;
        }

        for &id in counts.keys() {
            *document_frequency.entry(id).or_insert(0) += 1;
        }

        let mut vector: SparseVec = counts.into_iter().collect();
        vector.sort_by_key(|&(id, _)| id);
        vectors.push(vector);
    }

    if vocabulary.is_empty() {
        return None;
    }

    Some(TermMatrix {
        vectors,
        document_frequency,
        token_counts,
    })
}

fn dot(a: &SparseVec, b: &SparseVec) -> f64 {
    let mut total = 0.0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                total += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    total
}

fn norm(a: &SparseVec) -> f64 {
    a.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt()
}

/// Rank the sentences of `text`, returning up to `target_count` sentences in
/// order of importance (most important first).
///
/// Unlike the heuristic path, ranking applies no minimum sentence length of
/// its own; usability is decided by whether a sentence tokenizes to any
/// terms. Texts below [`MIN_RANK_TEXT_LEN`] characters return empty.
pub fn rank_text(
    text: &str,
    target_count: usize,
    method: StatisticalMethod,
    config: &SummaryConfig,
) -> Vec<Sentence> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_RANK_TEXT_LEN {
        return Vec::new();
    }
    let sentences: Vec<Sentence> = segment(trimmed, 0).collect();
    rank_sentences(&sentences, target_count, method, config)
}

/// Rank an already-segmented sentence set.
///
/// Returns fewer than `target_count` sentences only when the input contains
/// fewer usable sentences. Any internal numerical failure yields an empty
/// result rather than an error.
pub fn rank_sentences(
    sentences: &[Sentence],
    target_count: usize,
    method: StatisticalMethod,
    config: &SummaryConfig,
) -> Vec<Sentence> {
    if sentences.is_empty() || target_count == 0 {
        return Vec::new();
    }

    // Sentences that tokenize to nothing cannot participate in any method
    let usable: Vec<&Sentence> = sentences
        .iter()
        .filter(|s| !terms(&s.text, config).is_empty())
        .collect();
    if usable.is_empty() {
        return Vec::new();
    }

    let matrix = match build_term_matrix(&usable, config) {
        Some(m) => m,
        None => return Vec::new(),
    };

    let scores = match method {
        StatisticalMethod::TopicProjection => topic_projection_scores(&matrix),
        StatisticalMethod::LexicalGraphCentrality => lexical_centrality_scores(&matrix),
        StatisticalMethod::CooccurrenceGraphRank => cooccurrence_scores(&matrix),
    };

    let scores = match scores {
        Some(s) if s.iter().all(|v| v.is_finite()) => s,
        _ => {
            tracing::debug!(method = %method, "statistical ranking degenerated, returning empty");
            return Vec::new();
        }
    };

    let mut order: Vec<usize> = (0..usable.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .total_cmp(&scores[a])
            .then(usable[a].position.cmp(&usable[b].position))
    });

    order
        .into_iter()
        .take(target_count)
        .map(|i| usable[i].clone())
        .collect()
}

/// Score sentences by their component in the dominant eigenvector of the
/// Gram matrix of raw term-frequency vectors. This is the projection onto
/// the leading topic direction of the sentence-term matrix.
fn topic_projection_scores(matrix: &TermMatrix) -> Option<Vec<f64>> {
    let n = matrix.vectors.len();
    let mut gram = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let value = dot(&matrix.vectors[i], &matrix.vectors[j]);
            gram[i][j] = value;
            gram[j][i] = value;
        }
    }

    let mut v = vec![1.0 / n as f64; n];
    for _ in 0..ITERATIONS {
        let mut next = vec![0.0; n];
        for i in 0..n {
            for j in 0..n {
                next[i] += gram[i][j] * v[j];
            }
        }
        let length = next.iter().map(|x| x * x).sum::<f64>().sqrt();
        if length == 0.0 || !length.is_finite() {
            return None;
        }
        for value in next.iter_mut() {
            *value /= length;
        }
        v = next;
    }

    Some(v.into_iter().map(f64::abs).collect())
}

/// LexRank-style centrality: cosine similarity over TF-IDF vectors,
/// thresholded, then a damped power-iteration stationary distribution.
fn lexical_centrality_scores(matrix: &TermMatrix) -> Option<Vec<f64>> {
    let n = matrix.vectors.len();
    let weighted: Vec<SparseVec> = matrix
        .vectors
        .iter()
        .map(|vector| {
            vector
                .iter()
                .map(|&(id, tf)| {
                    let df = matrix.document_frequency.get(&id).copied().unwrap_or(1);
                    let idf = (n as f64 / df as f64).ln().max(0.0) + 1.0;
                    (id, tf * idf)
                })
                .collect()
        })
        .collect();

    let norms: Vec<f64> = weighted.iter().map(norm).collect();
    if norms.iter().any(|&x| x == 0.0) {
        return None;
    }

    let mut adjacency = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let similarity = dot(&weighted[i], &weighted[j]) / (norms[i] * norms[j]);
            if similarity > COSINE_THRESHOLD {
                adjacency[i][j] = similarity;
                adjacency[j][i] = similarity;
            }
        }
    }

    Some(stationary_distribution(&adjacency))
}

/// TextRank-style ranking: edge weight is the number of shared distinct
/// terms normalized by the log token lengths of the two sentences.
fn cooccurrence_scores(matrix: &TermMatrix) -> Option<Vec<f64>> {
    let n = matrix.vectors.len();
    let mut adjacency = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let shared = shared_term_count(&matrix.vectors[i], &matrix.vectors[j]);
            if shared == 0 {
                continue;
            }
            let denominator = (matrix.token_counts[i].max(2) as f64).ln()
                + (matrix.token_counts[j].max(2) as f64).ln();
            let weight = shared as f64 / denominator;
            adjacency[i][j] = weight;
            adjacency[j][i] = weight;
        }
    }

    Some(stationary_distribution(&adjacency))
}

fn shared_term_count(a: &SparseVec, b: &SparseVec) -> usize {
    let mut shared = 0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                shared += 1;
                i += 1;
                j += 1;
            }
        }
    }
    shared
}

/// Damped power iteration over a weighted undirected graph. Rows with no
/// outgoing weight distribute uniformly, so the iteration always converges
/// to a proper distribution.
fn stationary_distribution(adjacency: &[Vec<f64>]) -> Vec<f64> {
    let n = adjacency.len();
    let row_sums: Vec<f64> = adjacency.iter().map(|row| row.iter().sum()).collect();

    let mut p = vec![1.0 / n as f64; n];
    for _ in 0..ITERATIONS {
        let mut next = vec![(1.0 - DAMPING) / n as f64; n];
        for i in 0..n {
            if row_sums[i] > 0.0 {
                for j in 0..n {
                    if adjacency[i][j] > 0.0 {
                        next[j] += DAMPING * p[i] * adjacency[i][j] / row_sums[i];
                    }
                }
            } else {
                for value in next.iter_mut() {
                    *value += DAMPING * p[i] / n as f64;
                }
            }
        }
        p = next;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    const METHODS: [StatisticalMethod; 3] = [
        StatisticalMethod::TopicProjection,
        StatisticalMethod::LexicalGraphCentrality,
        StatisticalMethod::CooccurrenceGraphRank,
    ];

    fn sample_text() -> String {
        "The appellant challenged the order of detention passed by the state government. \
         The detention order was founded on stale grounds unconnected to public order. \
         Counsel for the state defended the detention order as a preventive measure. \
         Preventive detention cannot rest on grounds that have no live link to the present. \
         The court quashed the detention order and directed release of the appellant. \
         Costs were not awarded to either party in the present proceedings."
            .to_string()
    }

    #[test]
    fn test_short_text_returns_empty() {
        let config = SummaryConfig::default();
        for method in METHODS {
            assert!(rank_text("Too short to rank.", 4, method, &config).is_empty());
        }
    }

    #[test]
    fn test_returns_at_most_target_count() {
        let config = SummaryConfig::default();
        let text = sample_text();
        for method in METHODS {
            let ranked = rank_text(&text, 3, method, &config);
            assert!(ranked.len() <= 3, "method {} overflowed", method);
            assert!(!ranked.is_empty(), "method {} returned nothing", method);
        }
    }

    #[test]
    fn test_deterministic_across_calls() {
        let config = SummaryConfig::default();
        let text = sample_text();
        for method in METHODS {
            let first = rank_text(&text, 4, method, &config);
            let second = rank_text(&text, 4, method, &config);
            assert_eq!(first, second, "method {} was not deterministic", method);
        }
    }

    #[test]
    fn test_recurrent_topic_outranks_outlier() {
        let config = SummaryConfig::default();
        let text = sample_text();
        // Every method should prefer a detention-topic sentence over the
        // costs sentence, which shares almost no vocabulary with the rest.
        for method in METHODS {
            let ranked = rank_text(&text, 1, method, &config);
            assert_eq!(ranked.len(), 1);
            assert!(
                ranked[0].text.to_lowercase().contains("detention"),
                "method {} picked: {}",
                method,
                ranked[0].text
            );
        }
    }

    #[test]
    fn test_degenerate_sentences_yield_empty() {
        let config = SummaryConfig::default();
        // Long enough to clear the text-length floor, but the only fragment
        // below the summary threshold, so no usable sentences remain.
        let text = format!("{} .", "1 2 3 4 5 ".repeat(30));
        let sentences: Vec<Sentence> = Vec::new();
        for method in METHODS {
            assert!(rank_sentences(&sentences, 4, method, &config).is_empty());
            // Single-character tokens are filtered out, so nothing is usable
            assert!(rank_text(&text, 4, method, &config).is_empty());
        }
    }

    #[test]
    fn test_stemmer_folds_inflections() {
        assert_eq!(stem("dismissed"), "dismiss");
        assert_eq!(stem("sections"), "section");
        assert_eq!(stem("parties"), "party");
        // Short words pass through untouched
        assert_eq!(stem("act"), "act");
    }

    #[test]
    fn test_stopword_removal_respects_config() {
        let mut config = SummaryConfig::default();
        config.remove_stopwords = true;
        assert!(terms("the of and", &config).is_empty());
        config.remove_stopwords = false;
        assert_eq!(terms("the of and", &config).len(), 3);
    }
}
