//! # Batch Ingestion Pipeline
//!
//! ## Purpose
//! Orchestrates the batch workflow from raw documents to stored records:
//! normalize (CPU-parallel) then write through the store interface with
//! the configured dedup policy.
//!
//! ## Input/Output Specification
//! - **Input**: Raw documents produced by court adapters or the fetch layer
//! - **Output**: Stored normalized records plus per-run statistics
//! - **Workflow**: Normalize (rayon) -> Store (async) -> Stats
//!
//! Normalization is pure and shares no state between documents, so batches
//! are processed on a dedicated rayon pool while writes go through the
//! async store. A store failure on one record never aborts the run; it is
//! counted and logged.

use crate::config::Config;
use crate::errors::Result;
use crate::normalize::Normalizer;
use crate::store::{DedupPolicy, JudgmentStore, StoreOutcome};
use crate::{NormalizedRecord, RawDocument};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Pipeline execution statistics for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Unique identifier for this run
    pub run_id: Uuid,
    /// Total documents processed
    pub total_processed: usize,
    /// Newly inserted records
    pub stored: usize,
    /// Records replaced under the upsert policy
    pub updated: usize,
    /// Duplicate documents skipped
    pub duplicates_skipped: usize,
    /// Documents that failed at the storage step
    pub failed: usize,
    /// Run start time
    pub start_time: Option<DateTime<Utc>>,
    /// Run end time
    pub end_time: Option<DateTime<Utc>>,
    /// Processing rate (documents per second)
    pub processing_rate: f64,
}

impl PipelineStats {
    fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            total_processed: 0,
            stored: 0,
            updated: 0,
            duplicates_skipped: 0,
            failed: 0,
            start_time: None,
            end_time: None,
            processing_rate: 0.0,
        }
    }
}

/// Batch orchestrator from raw documents to stored records
pub struct IngestionPipeline {
    batch_size: usize,
    dedup_policy: DedupPolicy,
    normalizer: Normalizer,
    pool: Arc<rayon::ThreadPool>,
    store: Arc<dyn JudgmentStore>,
    stats: Arc<RwLock<PipelineStats>>,
}

impl IngestionPipeline {
    /// Create a pipeline over the given store.
    pub fn new(config: &Config, store: Arc<dyn JudgmentStore>) -> Result<Self> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.ingestion.max_concurrent_jobs)
            .build()
            .map_err(|e| crate::errors::PipelineError::Internal {
                message: format!("Failed to build worker pool: {}", e),
            })?;

        Ok(Self {
            batch_size: config.ingestion.batch_size,
            dedup_policy: config.ingestion.dedup_policy,
            normalizer: Normalizer::new(config.summary.clone())?,
            pool: Arc::new(pool),
            store,
            stats: Arc::new(RwLock::new(PipelineStats::new())),
        })
    }

    /// Normalize and store a set of documents, returning the run statistics.
    pub async fn run(&self, documents: Vec<RawDocument>) -> Result<PipelineStats> {
        {
            let mut stats = self.stats.write();
            *stats = PipelineStats::new();
            stats.start_time = Some(Utc::now());
        }

        let run_start = std::time::Instant::now();
        let total = documents.len();
        let total_batches = (total + self.batch_size - 1) / self.batch_size;
        tracing::info!(
            documents = total,
            batches = total_batches,
            policy = ?self.dedup_policy,
            "starting ingestion run"
        );

        let mut remaining = documents;
        let mut batch_id = 0usize;
        while !remaining.is_empty() {
            let split = remaining.len().min(self.batch_size);
            let batch: Vec<RawDocument> = remaining.drain(..split).collect();
            let records = self.normalize_batch(batch).await?;
            let batch_len = records.len();

            for record in records {
                let key = record.key.clone();
                match self.store.put(record, self.dedup_policy).await {
                    Ok(StoreOutcome::Inserted) => self.stats.write().stored += 1,
                    Ok(StoreOutcome::Updated) => self.stats.write().updated += 1,
                    Ok(StoreOutcome::Skipped) => self.stats.write().duplicates_skipped += 1,
                    Err(e) => {
                        self.stats.write().failed += 1;
                        tracing::error!(key = %key, error = %e, "failed to store record");
                    }
                }
            }

            {
                let mut stats = self.stats.write();
                stats.total_processed += batch_len;
            }
            tracing::debug!(batch = batch_id, size = batch_len, "batch completed");
            batch_id += 1;
        }

        self.store.flush().await?;

        let final_stats = {
            let mut stats = self.stats.write();
            stats.end_time = Some(Utc::now());
            let elapsed = run_start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                stats.processing_rate = stats.total_processed as f64 / elapsed;
            }
            stats.clone()
        };

        tracing::info!(
            processed = final_stats.total_processed,
            stored = final_stats.stored,
            updated = final_stats.updated,
            skipped = final_stats.duplicates_skipped,
            failed = final_stats.failed,
            rate = format!("{:.1}", final_stats.processing_rate),
            "ingestion run completed"
        );

        Ok(final_stats)
    }

    /// Normalize one batch on the worker pool without blocking the runtime.
    async fn normalize_batch(&self, batch: Vec<RawDocument>) -> Result<Vec<NormalizedRecord>> {
        let normalizer = self.normalizer.clone();
        let pool = self.pool.clone();
        let records = tokio::task::spawn_blocking(move || {
            pool.install(|| {
                batch
                    .par_iter()
                    .map(|doc| normalizer.normalize(doc))
                    .collect::<Vec<_>>()
            })
        })
        .await
        .map_err(|e| crate::errors::PipelineError::Internal {
            message: format!("Normalization task panicked: {}", e),
        })?;
        Ok(records)
    }

    /// Snapshot of the current statistics
    pub fn stats(&self) -> PipelineStats {
        self.stats.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::SourceCourt;

    fn docs() -> Vec<RawDocument> {
        vec![
            RawDocument::new(
                SourceCourt::SupremeCourt,
                "Arnesh Kumar vs State of Bihar",
                "2014-07-02",
                "The court held that arrest is not mandatory under Section 498A. The appeal was allowed.",
            ),
            RawDocument::new(
                SourceCourt::BombayHighCourt,
                "Deshmukh vs State of Maharashtra",
                "14-02-2023",
                "The writ petition was dismissed. Costs were awarded against the petitioner in full.",
            ),
            // Same case as the first, scraped again
            RawDocument::new(
                SourceCourt::SupremeCourt,
                "Arnesh Kumar vs State of Bihar",
                "2014-07-02",
                "A re-scrape of the same judgment with slightly different text extraction.",
            ),
        ]
    }

    #[tokio::test]
    async fn test_run_with_skip_policy() {
        let store = Arc::new(MemoryStore::new());
        let pipeline = IngestionPipeline::new(&Config::default(), store.clone()).unwrap();

        let stats = pipeline.run(docs()).await.unwrap();
        assert_eq!(stats.total_processed, 3);
        assert_eq!(stats.stored, 2);
        assert_eq!(stats.duplicates_skipped, 1);
        assert_eq!(stats.failed, 0);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_run_with_upsert_policy() {
        let store = Arc::new(MemoryStore::new());
        let mut config = Config::default();
        config.ingestion.dedup_policy = DedupPolicy::Upsert;
        let pipeline = IngestionPipeline::new(&config, store.clone()).unwrap();

        let stats = pipeline.run(docs()).await.unwrap();
        assert_eq!(stats.stored, 2);
        assert_eq!(stats.updated, 1);
        assert_eq!(store.count().await.unwrap(), 2);

        // The re-scrape won
        let key = crate::make_key("sc", "Arnesh Kumar vs State of Bihar", "2014-07-02");
        let record = store.get(&key).await.unwrap().unwrap();
        assert!(record.text.starts_with("A re-scrape"));
    }

    #[tokio::test]
    async fn test_small_batches_cover_all_documents() {
        let store = Arc::new(MemoryStore::new());
        let mut config = Config::default();
        config.ingestion.batch_size = 1;
        let pipeline = IngestionPipeline::new(&config, store.clone()).unwrap();

        let stats = pipeline.run(docs()).await.unwrap();
        assert_eq!(stats.total_processed, 3);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_run() {
        let store = Arc::new(MemoryStore::new());
        let pipeline = IngestionPipeline::new(&Config::default(), store).unwrap();
        let stats = pipeline.run(Vec::new()).await.unwrap();
        assert_eq!(stats.total_processed, 0);
        assert_eq!(stats.stored, 0);
    }
}
