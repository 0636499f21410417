use std::sync::{Arc, Mutex};

use las_data_processing::error::RowError;
use las_data_processing::ingestion::{
    CompositeObserver, FileObserver, IN_MEMORY_SOURCE, IngestionContext, IngestionObserver,
    IngestionOptions, IngestionSeverity, IngestionStats, ingest_from_bytes, ingest_from_path,
};

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<IngestionStats>>,
    warnings: Mutex<Vec<usize>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
    sources: Mutex<Vec<String>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.sources.lock().unwrap().push(ctx.path.display().to_string());
        self.successes.lock().unwrap().push(stats);
    }

    fn on_warning(&self, _ctx: &IngestionContext, severity: IngestionSeverity, row: &RowError) {
        assert_eq!(severity, IngestionSeverity::Warning);
        self.warnings.lock().unwrap().push(row.line());
    }

    fn on_failure(
        &self,
        _ctx: &IngestionContext,
        severity: IngestionSeverity,
        _error: &las_data_processing::IngestionError,
    ) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(
        &self,
        _ctx: &IngestionContext,
        severity: IngestionSeverity,
        _error: &las_data_processing::IngestionError,
    ) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options_with(obs: Arc<RecordingObserver>, threshold: IngestionSeverity) -> IngestionOptions {
    IngestionOptions {
        observer: Some(obs),
        alert_at_or_above: threshold,
        ..Default::default()
    }
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), IngestionSeverity::Critical);

    // Missing file -> Io error -> Critical
    let _ = ingest_from_path("tests/fixtures/does_not_exist.las", &opts).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    let alerts = obs.alerts.lock().unwrap().clone();
    assert_eq!(failures, vec![IngestionSeverity::Critical]);
    assert_eq!(alerts, vec![IngestionSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_non_critical_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), IngestionSeverity::Critical);

    // Missing ~CURVE -> Error severity (not Critical) -> should not alert
    let _ = ingest_from_path("tests/fixtures/missing_curve.las", &opts).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures, vec![IngestionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
    assert!(obs.successes.lock().unwrap().is_empty());
}

#[test]
fn lower_threshold_alerts_on_parse_errors() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), IngestionSeverity::Error);

    let _ = ingest_from_path("tests/fixtures/missing_curve.las", &opts).unwrap_err();

    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
}

#[test]
fn skipped_rows_are_reported_as_warnings_before_success() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), IngestionSeverity::Critical);

    let log = ingest_from_path("tests/fixtures/malformed_rows.las", &opts).unwrap();
    assert_eq!(log.store.len(), 3);

    assert_eq!(obs.warnings.lock().unwrap().clone(), vec![14, 15, 17]);
    assert_eq!(
        obs.successes.lock().unwrap().clone(),
        vec![IngestionStats {
            rows: 3,
            curves: 4,
            skipped_rows: 3,
        }]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn byte_input_is_reported_as_memory_source() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), IngestionSeverity::Critical);

    let raw = std::fs::read("tests/fixtures/volve_demo.las").unwrap();
    ingest_from_bytes(&raw, &opts).unwrap();

    assert_eq!(obs.sources.lock().unwrap().clone(), vec![IN_MEMORY_SOURCE.to_string()]);
}

#[test]
fn composite_observer_fans_out() {
    let a = Arc::new(RecordingObserver::default());
    let b = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::new(vec![a.clone(), b.clone()]);
    let opts = IngestionOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    ingest_from_path("tests/fixtures/volve_demo.las", &opts).unwrap();
    let _ = ingest_from_path("tests/fixtures/does_not_exist.las", &opts).unwrap_err();

    for obs in [&a, &b] {
        assert_eq!(obs.successes.lock().unwrap().len(), 1);
        assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Critical]);
        assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Critical]);
    }
}

#[test]
fn file_observer_appends_events() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("ingest.log");
    let opts = IngestionOptions {
        observer: Some(Arc::new(FileObserver::new(&log_path))),
        ..Default::default()
    };

    ingest_from_path("tests/fixtures/malformed_rows.las", &opts).unwrap();
    let _ = ingest_from_path("tests/fixtures/does_not_exist.las", &opts).unwrap_err();

    let text = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    // 3 warnings, 1 success, 1 failure, 1 alert
    assert_eq!(lines.len(), 6);
    assert_eq!(lines.iter().filter(|l| l.contains(" warn ")).count(), 3);
    assert!(lines.iter().any(|l| l.contains(" ok ") && l.contains("rows=3")));
    assert!(lines.iter().any(|l| l.contains(" fail severity=Critical")));
    assert!(lines.iter().any(|l| l.contains(" ALERT severity=Critical")));
}
