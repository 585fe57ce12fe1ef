//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the judgment pipeline, loaded from TOML
//! files with environment variable overrides and eager validation.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration files (TOML), environment variables
//! - **Output**: Validated configuration structs with defaults and overrides
//! - **Validation**: Type checking, range validation at load time
//!
//! ## Key Features
//! - Typed configuration with serde defaults
//! - Environment overrides under the `JUDGMENT_PIPELINE_` prefix
//! - Eager rejection of invalid values (zero summary length, bad log level)
//!
//! The summary configuration is an immutable value threaded into every core
//! call. Nothing in this module is process-wide mutable state, so documents
//! in different languages can be processed concurrently with different
//! configurations.

use crate::errors::{PipelineError, Result};
use crate::store::DedupPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure containing all system settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Summarization and extraction behavior
    pub summary: SummaryConfig,
    /// Batch ingestion settings
    pub ingestion: IngestionConfig,
    /// Document store settings
    pub storage: StorageConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Statistical ranking algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatisticalMethod {
    /// Reduced-rank projection of sentences onto dominant topic directions
    TopicProjection,
    /// Stationary distribution over a cosine-similarity sentence graph
    LexicalGraphCentrality,
    /// Stationary distribution over a shared-term co-occurrence graph
    CooccurrenceGraphRank,
}

impl std::str::FromStr for StatisticalMethod {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "topic-projection" => Ok(StatisticalMethod::TopicProjection),
            "lexical-graph-centrality" => Ok(StatisticalMethod::LexicalGraphCentrality),
            "cooccurrence-graph-rank" => Ok(StatisticalMethod::CooccurrenceGraphRank),
            other => Err(PipelineError::ValidationFailed {
                field: "statistical_method".to_string(),
                reason: format!("Unknown statistical method: {}", other),
            }),
        }
    }
}

impl std::fmt::Display for StatisticalMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatisticalMethod::TopicProjection => "topic-projection",
            StatisticalMethod::LexicalGraphCentrality => "lexical-graph-centrality",
            StatisticalMethod::CooccurrenceGraphRank => "cooccurrence-graph-rank",
        };
        f.write_str(name)
    }
}

/// Language selection for stop-word removal and stemming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

/// Summarization and extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Number of sentences the composed summary targets
    pub target_length: usize,
    /// Stop-word / stemmer vocabulary
    pub language: Language,
    /// Statistical ranking algorithm used by the hybrid composer
    pub statistical_method: StatisticalMethod,
    /// Minimum sentence length for heuristic scoring input
    pub min_heuristic_sentence_len: usize,
    /// Minimum sentence length for summary-input contexts
    pub min_summary_sentence_len: usize,
    /// Minimum sentence length for the last-resort fallback
    pub min_fallback_sentence_len: usize,
    /// Remove stop words before building term vectors
    pub remove_stopwords: bool,
    /// Apply suffix-stripping stemming before building term vectors
    pub enable_stemming: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            target_length: 4,
            language: Language::English,
            statistical_method: StatisticalMethod::TopicProjection,
            min_heuristic_sentence_len: 20,
            min_summary_sentence_len: 50,
            min_fallback_sentence_len: 30,
            remove_stopwords: true,
            enable_stemming: true,
        }
    }
}

/// Batch ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Documents normalized per progress-logged batch
    pub batch_size: usize,
    /// Parallelism width for CPU-bound normalization
    pub max_concurrent_jobs: usize,
    /// What the store should do when the dedup key already exists
    pub dedup_policy: DedupPolicy,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            max_concurrent_jobs: num_cpus::get(),
            dedup_policy: DedupPolicy::Skip,
        }
    }
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path
    pub db_path: PathBuf,
    /// Compress serialized records before writing
    pub enable_compression: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/judgments.db"),
            enable_compression: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable structured JSON logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }

    /// Load configuration from a specific file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| PipelineError::Config {
                message: format!("Failed to read config file {:?}: {}", path, e),
            })?;
            toml::from_str(&content).map_err(|e| PipelineError::Config {
                message: format!("Failed to parse config file {:?}: {}", path, e),
            })?
        } else {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(db_path) = std::env::var("JUDGMENT_PIPELINE_DB_PATH") {
            self.storage.db_path = PathBuf::from(db_path);
        }
        if let Ok(level) = std::env::var("JUDGMENT_PIPELINE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(target) = std::env::var("JUDGMENT_PIPELINE_SUMMARY_LENGTH") {
            self.summary.target_length =
                target.parse().map_err(|_| PipelineError::Config {
                    message: "Invalid value in JUDGMENT_PIPELINE_SUMMARY_LENGTH".to_string(),
                })?;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.summary.validate()?;

        if self.ingestion.batch_size == 0 {
            return Err(PipelineError::ValidationFailed {
                field: "ingestion.batch_size".to_string(),
                reason: "Batch size cannot be zero".to_string(),
            });
        }

        if self.ingestion.max_concurrent_jobs == 0 {
            return Err(PipelineError::ValidationFailed {
                field: "ingestion.max_concurrent_jobs".to_string(),
                reason: "Concurrency width cannot be zero".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(PipelineError::ValidationFailed {
                field: "logging.level".to_string(),
                reason: format!("Unknown log level: {}", self.logging.level),
            });
        }

        Ok(())
    }
}

impl SummaryConfig {
    /// Validate the summarization parameters.
    ///
    /// A zero target length is a caller mistake, not a degenerate document,
    /// so it is rejected here rather than silently producing empty summaries.
    pub fn validate(&self) -> Result<()> {
        if self.target_length == 0 {
            return Err(PipelineError::ValidationFailed {
                field: "summary.target_length".to_string(),
                reason: "Target summary length must be at least one sentence".to_string(),
            });
        }
        Ok(())
    }
}
