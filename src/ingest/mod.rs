//! # Ingestion Module
//!
//! ## Purpose
//! Everything between externally fetched court pages and stored records:
//! per-court markup adapters that map site-specific HTML into
//! [`RawDocument`](crate::RawDocument)s, and the batch pipeline that
//! normalizes documents and writes them through the store interface.
//!
//! ## Architecture
//! - `markup`: HTML-to-text and link helpers shared by the adapters
//! - `sources/`: the `CourtAdapter` trait and per-court implementations;
//!   an adapter is the only per-source code in the system
//! - `pipeline`: batch normalization and storage with run statistics
//!
//! No code in this module performs network I/O. Fetching pages and PDF
//! byte decoding belong to the external fetch layer; adapters consume
//! markup and body text that were already retrieved.

pub mod markup;
pub mod pipeline;
pub mod sources;

pub use pipeline::{IngestionPipeline, PipelineStats};
pub use sources::{bhc::BhcAdapter, sc::ScAdapter, CourtAdapter};
