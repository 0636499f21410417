//! Unified LAS ingestion entrypoints.
//!
//! Most callers should use [`ingest_from_path`] (or [`ingest_from_bytes`] for uploaded content),
//! which parses a LAS file and builds its [`crate::store::CurveStore`].
//!
//! If an [`super::observability::IngestionObserver`] is provided, success/row warnings/failure/
//! alerts are reported to it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::las::{ParseOptions, parse_with_options};
use crate::store::CurveStore;
use crate::types::WellLogDocument;

use super::observability::{
    IN_MEMORY_SOURCE, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
};

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// LAS parsing options.
    pub parse: ParseOptions,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
    /// Descend into subdirectories in [`super::batch::ingest_dir`].
    pub recursive: bool,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("parse", &self.parse)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .field("recursive", &self.recursive)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
            recursive: false,
        }
    }
}

/// A parsed LAS file and the curve store built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLog {
    /// Header sections, curve definitions and skipped-row report.
    pub document: WellLogDocument,
    /// Depth-indexed curves.
    pub store: CurveStore,
}

impl LoadedLog {
    /// Parse `raw` and build the store.
    pub fn from_bytes(raw: &[u8], options: &ParseOptions) -> IngestionResult<Self> {
        let document = parse_with_options(raw, options)?;
        let store = CurveStore::from_document(&document)?;
        Ok(Self { document, store })
    }

    fn stats(&self) -> IngestionStats {
        IngestionStats {
            rows: self.store.len(),
            curves: self.store.curve_count(),
            skipped_rows: self.document.skipped_row_count(),
        }
    }
}

/// Ingest a LAS file from disk.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/curve/skipped-row stats
/// - `on_warning` once per skipped data row
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use std::sync::Arc;
///
/// use las_data_processing::ingestion::{ingest_from_path, IngestionOptions, TracingObserver};
///
/// # fn main() -> Result<(), las_data_processing::IngestionError> {
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     ..Default::default()
/// };
/// let log = ingest_from_path("volve_15_9-F-11.las", &opts)?;
/// println!("well={:?} samples={}", log.document.well_name(), log.store.len());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<LoadedLog> {
    let path = path.as_ref();
    let ctx = IngestionContext {
        path: path.to_path_buf(),
    };
    let result = std::fs::read(path)
        .map_err(IngestionError::from)
        .and_then(|raw| LoadedLog::from_bytes(&raw, &options.parse));
    report(&ctx, options, &result);
    result
}

/// Ingest LAS content that is already in memory (e.g. an upload).
pub fn ingest_from_bytes(raw: &[u8], options: &IngestionOptions) -> IngestionResult<LoadedLog> {
    let ctx = IngestionContext {
        path: PathBuf::from(IN_MEMORY_SOURCE),
    };
    let result = LoadedLog::from_bytes(raw, &options.parse);
    report(&ctx, options, &result);
    result
}

fn report(ctx: &IngestionContext, options: &IngestionOptions, result: &IngestionResult<LoadedLog>) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(log) => {
            for row in &log.document.row_errors {
                obs.on_warning(ctx, IngestionSeverity::Warning, row);
            }
            obs.on_success(ctx, log.stats());
        }
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Io(_) | IngestionError::Walk(_) | IngestionError::Glob(_) => {
            IngestionSeverity::Critical
        }
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        IngestionError::Parse(_)
        | IngestionError::Store(_)
        | IngestionError::Export(_)
        | IngestionError::Pattern(_)
        | IngestionError::SchemaMismatch { .. }
        | IngestionError::InvalidValue { .. }
        | IngestionError::NotLoaded => IngestionSeverity::Error,
    }
}

/// Convenience helper for callers that want an owned request object.
///
/// Batch ingestion builds one per discovered file.
#[derive(Clone)]
pub struct IngestionRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Options controlling ingestion.
    pub options: IngestionOptions,
}

impl fmt::Debug for IngestionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionRequest")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

impl IngestionRequest {
    /// Execute the request by calling [`ingest_from_path`].
    pub fn run(&self) -> IngestionResult<LoadedLog> {
        ingest_from_path(&self.path, &self.options)
    }
}
