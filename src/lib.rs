//! # Judgment Normalization & Summarization Pipeline
//!
//! ## Overview
//! This library turns raw legal judgment documents scraped from Indian court
//! websites into normalized, deduplicated records carrying an extractive
//! summary, referenced statutory sections, and topical tags.
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `segment`: Sentence segmentation over noisy judgment text
//! - `scoring`: Keyword-heuristic sentence importance scoring
//! - `ranking`: Statistical sentence ranking (topic projection, graph centrality)
//! - `summary`: Hybrid summary composition with a deterministic fallback chain
//! - `metadata`: Judge / citation / section / tag extraction
//! - `identity`: Stable dedup key derivation
//! - `normalize`: Per-document orchestration into a `NormalizedRecord`
//! - `ingest`: Court markup adapters and the batch ingestion pipeline
//! - `store`: Narrow interface to the external document store
//! - `config`: Configuration management and settings
//! - `errors`: Centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: Raw judgment documents (title, date, judges, body text, markup)
//! - **Output**: Normalized records ready for storage and search indexing
//! - **Guarantees**: Deterministic output for identical input and configuration
//!
//! ## Usage
//! ```rust,no_run
//! use judgment_pipeline::{config::SummaryConfig, normalize::Normalizer, RawDocument, SourceCourt};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let normalizer = Normalizer::new(SummaryConfig::default())?;
//!     let doc = RawDocument::new(
//!         SourceCourt::SupremeCourt,
//!         "Arnesh Kumar vs State of Bihar",
//!         "2014-07-02",
//!         "judgment text ...",
//!     );
//!     let record = normalizer.normalize(&doc);
//!     println!("{} -> {}", record.key, record.summary);
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod errors;
pub mod identity;
pub mod ingest;
pub mod metadata;
pub mod normalize;
pub mod ranking;
pub mod scoring;
pub mod segment;
pub mod store;
pub mod summary;

// Re-exports for convenience
pub use config::{Config, StatisticalMethod, SummaryConfig};
pub use errors::{PipelineError, Result};
pub use identity::make_key;
pub use metadata::LegalMetadata;
pub use normalize::Normalizer;
pub use summary::{SummaryMethod, SummaryResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Court a raw document was scraped from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCourt {
    SupremeCourt,
    DelhiHighCourt,
    BombayHighCourt,
}

impl SourceCourt {
    /// Short prefix used in dedup keys
    pub fn prefix(&self) -> &'static str {
        match self {
            SourceCourt::SupremeCourt => "sc",
            SourceCourt::DelhiHighCourt => "dhc",
            SourceCourt::BombayHighCourt => "bhc",
        }
    }

    /// Human-readable court name
    pub fn name(&self) -> &'static str {
        match self {
            SourceCourt::SupremeCourt => "Supreme Court of India",
            SourceCourt::DelhiHighCourt => "Delhi High Court",
            SourceCourt::BombayHighCourt => "Bombay High Court",
        }
    }
}

impl std::fmt::Display for SourceCourt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw judgment document as delivered by the external fetch layer.
///
/// `body_text` may be empty, may be non-legal boilerplate, and may contain
/// OCR or PDF-extraction artifacts. Immutable once handed to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    /// Case title as scraped
    pub title: String,
    /// Judgment date in whatever format the source used
    pub date: String,
    /// Judge names supplied by the source page, possibly empty
    #[serde(default)]
    pub judges: Vec<String>,
    /// Full judgment text (typically PDF-extracted)
    pub body_text: String,
    /// Original page markup, when the adapter retained it
    #[serde(default)]
    pub markup: Option<String>,
    /// Court this document came from
    pub source_court: SourceCourt,
    /// URL of the judgment PDF, if discovered
    #[serde(default)]
    pub pdf_url: Option<String>,
    /// URL of the judgment page itself
    #[serde(default)]
    pub source_url: Option<String>,
}

impl RawDocument {
    /// Convenience constructor for the common title/date/text case
    pub fn new(
        source_court: SourceCourt,
        title: impl Into<String>,
        date: impl Into<String>,
        body_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            judges: Vec::new(),
            body_text: body_text.into(),
            markup: None,
            source_court,
            pdf_url: None,
            source_url: None,
        }
    }
}

/// A candidate sentence produced by the segmenter.
///
/// `position` is the 0-based order of appearance in the source text. It is a
/// tie-break attribute for stable ordering, never a ranking signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub position: usize,
}

/// A sentence with its importance signals attached. Ephemeral, recomputed per
/// document, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSentence {
    pub sentence: Sentence,
    /// Additive keyword-heuristic score
    pub heuristic_score: u32,
    /// 1-based statistical rank (1 = most important), when computed
    pub statistical_rank: Option<usize>,
}

/// Stable identity key for a document, used by the external store as its
/// uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentKey(pub String);

impl DocumentKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The final output of the pipeline: everything the external store and search
/// index need for one judgment. Created once per ingested document and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Dedup key (`{court_prefix}_{title_tokens}_{date_digits}`)
    pub key: DocumentKey,
    pub case_title: String,
    pub court: SourceCourt,
    pub judges: Vec<String>,
    pub date: String,
    /// First-matching citation, empty when none was found
    pub citation: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
    /// Cleaned body text
    pub text: String,
    /// Joined extractive summary
    pub summary: String,
    /// Which summarization path produced the summary, absent for placeholders
    #[serde(default)]
    pub summary_method: Option<SummaryMethod>,
    pub referenced_sections: std::collections::BTreeSet<String>,
    pub tags: std::collections::BTreeSet<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    pub scraped_at: DateTime<Utc>,
}
