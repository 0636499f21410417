use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{IngestionError, RowError};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal, e.g. a skipped data row).
    Warning,
    /// Error-level event (the file was rejected).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Context about an ingestion attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// The input path, or [`IN_MEMORY_SOURCE`] for byte input.
    pub path: PathBuf,
}

/// Path reported for byte-slice ingestion.
pub const IN_MEMORY_SOURCE: &str = "<memory>";

/// Stats reported on successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of depth samples kept.
    pub rows: usize,
    /// Number of curves, index included.
    pub curves: usize,
    /// Number of data rows dropped while parsing.
    pub skipped_rows: usize,
}

/// Observer interface for ingestion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait IngestionObserver: Send + Sync {
    /// Called when ingestion succeeds.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called once per data row dropped from a file that was otherwise ingested.
    fn on_warning(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _row: &RowError) {}

    /// Called when ingestion fails.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &IngestionError) {}

    /// Called when an ingestion failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }

    fn each(&self, f: impl Fn(&dyn IngestionObserver)) {
        self.observers.iter().for_each(|o| f(&**o));
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.each(|o| o.on_success(ctx, stats));
    }

    fn on_warning(&self, ctx: &IngestionContext, severity: IngestionSeverity, row: &RowError) {
        self.each(|o| o.on_warning(ctx, severity, row));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Forwards ingestion events to `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        tracing::info!(
            path = %ctx.path.display(),
            rows = stats.rows,
            curves = stats.curves,
            skipped_rows = stats.skipped_rows,
            "ingested LAS file"
        );
    }

    fn on_warning(&self, ctx: &IngestionContext, severity: IngestionSeverity, row: &RowError) {
        tracing::warn!(path = %ctx.path.display(), ?severity, %row, "skipped data row");
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        tracing::error!(path = %ctx.path.display(), ?severity, %error, "ingestion failed");
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        tracing::error!(path = %ctx.path.display(), ?severity, %error, alert = true, "ingestion alert");
    }
}

/// Appends ingestion events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// One line per event: `<unix secs> <kind> [severity=..] path=.. <detail>`.
    fn record(
        &self,
        kind: &str,
        severity: Option<IngestionSeverity>,
        ctx: &IngestionContext,
        detail: fmt::Arguments<'_>,
    ) {
        let mut line = format!("{} {kind} ", unix_ts());
        if let Some(severity) = severity {
            line.push_str(&format!("severity={severity:?} "));
        }
        line.push_str(&format!("path={} {detail}", ctx.path.display()));

        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.record(
            "ok",
            None,
            ctx,
            format_args!(
                "rows={} curves={} skipped={}",
                stats.rows, stats.curves, stats.skipped_rows
            ),
        );
    }

    fn on_warning(&self, ctx: &IngestionContext, severity: IngestionSeverity, row: &RowError) {
        self.record("warn", Some(severity), ctx, format_args!("row={row}"));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.record("fail", Some(severity), ctx, format_args!("err={error}"));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.record("ALERT", Some(severity), ctx, format_args!("err={error}"));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
