//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] or [`ingest_from_bytes`] (from [`unified`])
//! which:
//!
//! - parse LAS text into a [`crate::types::WellLogDocument`]
//! - build the depth-indexed [`crate::store::CurveStore`]
//! - optionally report success/row warnings/failure/alerts to an [`IngestionObserver`]
//!
//! Also available:
//! - [`batch`]: a directory or glob of LAS files, one independent result per file
//! - [`csv`]: delimited text (as exported) back into a curve store

pub mod batch;
pub mod csv;
pub mod observability;
pub mod unified;

pub use batch::{BatchItem, ingest_dir, ingest_glob};
pub use observability::{
    CompositeObserver, FileObserver, IN_MEMORY_SOURCE, IngestionContext, IngestionObserver,
    IngestionSeverity, IngestionStats, TracingObserver,
};
pub use unified::{IngestionOptions, IngestionRequest, LoadedLog, ingest_from_bytes, ingest_from_path};
