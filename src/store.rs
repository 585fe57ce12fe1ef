//! # Judgment Store Module
//!
//! ## Purpose
//! The narrow interface through which the external document store is
//! consumed. The core only *computes* dedup keys; existence checking and
//! conflict resolution live behind this trait.
//!
//! ## Input/Output Specification
//! - **Input**: Normalized records keyed by their [`DocumentKey`]
//! - **Output**: Store outcomes (inserted / updated / skipped)
//! - **Storage**: Sled embedded database, or in-memory for tests and demos
//!
//! ## Dedup Policy
//! The source system disagreed with itself about what to do when a key
//! already exists (one path skipped, another overwrote). Here the policy is
//! an explicit argument: [`DedupPolicy::Skip`] leaves the stored record
//! untouched, [`DedupPolicy::Upsert`] replaces it.

use crate::config::StorageConfig;
use crate::errors::{PipelineError, Result};
use crate::{DocumentKey, NormalizedRecord};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// What the store should do when the dedup key already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupPolicy {
    /// Keep the existing record and report [`StoreOutcome::Skipped`]
    Skip,
    /// Replace the existing record and report [`StoreOutcome::Updated`]
    Upsert,
}

impl Default for DedupPolicy {
    fn default() -> Self {
        DedupPolicy::Skip
    }
}

/// Result of a single `put`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreOutcome {
    Inserted,
    Updated,
    Skipped,
}

/// Narrow interface to the external document store
#[async_trait]
pub trait JudgmentStore: Send + Sync {
    /// Whether a record with this key exists
    async fn contains(&self, key: &DocumentKey) -> Result<bool>;

    /// Fetch a record by key
    async fn get(&self, key: &DocumentKey) -> Result<Option<NormalizedRecord>>;

    /// Write a record, resolving key conflicts with the given policy
    async fn put(&self, record: NormalizedRecord, policy: DedupPolicy) -> Result<StoreOutcome>;

    /// Number of stored records
    async fn count(&self) -> Result<usize>;

    /// Flush pending writes to durable storage
    async fn flush(&self) -> Result<()>;
}

/// Sled-backed store with optional gzip compression of the serialized
/// record. Thin by design; everything interesting happens before `put`.
pub struct SledStore {
    config: StorageConfig,
    db: sled::Db,
    tree: sled::Tree,
}

impl SledStore {
    /// Open (or create) the database at the configured path.
    pub fn open(config: StorageConfig) -> Result<Self> {
        if let Some(parent) = config.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = sled::open(&config.db_path).map_err(|e| PipelineError::Storage {
            message: format!("Failed to open database {:?}: {}", config.db_path, e),
        })?;
        let tree = db.open_tree("judgments")?;

        tracing::info!(
            path = %config.db_path.display(),
            records = tree.len(),
            "judgment store opened"
        );

        Ok(Self { config, db, tree })
    }

    fn encode(&self, record: &NormalizedRecord) -> Result<Vec<u8>> {
        let serialized = bincode::serialize(record)?;
        if self.config.enable_compression {
            use std::io::Write;
            let mut encoder =
                flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(&serialized)?;
            Ok(encoder.finish()?)
        } else {
            Ok(serialized)
        }
    }

    fn decode(&self, data: &[u8]) -> Result<NormalizedRecord> {
        if self.config.enable_compression {
            use std::io::Read;
            let mut decoder = flate2::read::GzDecoder::new(data);
            let mut decompressed = Vec::new();
            decoder.read_to_end(&mut decompressed)?;
            Ok(bincode::deserialize(&decompressed)?)
        } else {
            Ok(bincode::deserialize(data)?)
        }
    }
}

#[async_trait]
impl JudgmentStore for SledStore {
    async fn contains(&self, key: &DocumentKey) -> Result<bool> {
        Ok(self.tree.contains_key(key.as_str().as_bytes())?)
    }

    async fn get(&self, key: &DocumentKey) -> Result<Option<NormalizedRecord>> {
        match self.tree.get(key.as_str().as_bytes())? {
            Some(data) => Ok(Some(self.decode(&data)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, record: NormalizedRecord, policy: DedupPolicy) -> Result<StoreOutcome> {
        let key_bytes = record.key.as_str().as_bytes().to_vec();
        let exists = self.tree.contains_key(&key_bytes)?;

        if exists && policy == DedupPolicy::Skip {
            tracing::debug!(key = %record.key, "record exists, skipping");
            return Ok(StoreOutcome::Skipped);
        }

        let encoded = self.encode(&record)?;
        self.tree.insert(key_bytes, encoded)?;

        Ok(if exists {
            StoreOutcome::Updated
        } else {
            StoreOutcome::Inserted
        })
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.tree.len())
    }

    async fn flush(&self) -> Result<()> {
        self.db.flush_async().await.map_err(|e| PipelineError::Storage {
            message: format!("Failed to flush database: {}", e),
        })?;
        Ok(())
    }
}

/// In-memory store used by tests and demos
#[derive(Default)]
pub struct MemoryStore {
    records: DashMap<String, NormalizedRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JudgmentStore for MemoryStore {
    async fn contains(&self, key: &DocumentKey) -> Result<bool> {
        Ok(self.records.contains_key(key.as_str()))
    }

    async fn get(&self, key: &DocumentKey) -> Result<Option<NormalizedRecord>> {
        Ok(self.records.get(key.as_str()).map(|r| r.value().clone()))
    }

    async fn put(&self, record: NormalizedRecord, policy: DedupPolicy) -> Result<StoreOutcome> {
        let key = record.key.as_str().to_string();
        if self.records.contains_key(&key) {
            if policy == DedupPolicy::Skip {
                return Ok(StoreOutcome::Skipped);
            }
            self.records.insert(key, record);
            return Ok(StoreOutcome::Updated);
        }
        self.records.insert(key, record);
        Ok(StoreOutcome::Inserted)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.len())
    }

    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}
