use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type for LAS parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Convenience result type for curve store mutations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Convenience result type for ingestion and session operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Fatal, per-file parse failure. No partial document is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input is not valid UTF-8 (and no fallback decoding was requested).
    #[error("input is not valid UTF-8 text (first invalid byte at offset {valid_up_to})")]
    Encoding { valid_up_to: usize },

    /// A required section (`CURVE` or `ASCII`) is absent.
    #[error("missing required section ~{0}")]
    MissingSection(String),

    /// A header line or the section layout could not be understood.
    #[error("malformed header in ~{section} at line {line}: {reason}")]
    MalformedHeader {
        section: String,
        line: usize,
        reason: String,
    },
}

/// Recoverable, per-row data error. The row is skipped and parsing continues.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowError {
    /// A data row does not have one value per curve definition.
    #[error("line {line}: expected {expected} values, found {found}")]
    FieldMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A data token is not a number.
    #[error("line {line}: value '{raw}' for curve '{column}' is not a number")]
    InvalidNumber {
        line: usize,
        column: String,
        raw: String,
    },
}

impl RowError {
    /// 1-based source line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            Self::FieldMismatch { line, .. } | Self::InvalidNumber { line, .. } => *line,
        }
    }
}

/// Curve store integrity errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// A column's length differs from the index length.
    #[error("curve '{name}' has {found} samples, index has {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// An append targeted the index curve.
    #[error("curve '{0}' is the index and cannot be overwritten")]
    IndexOverwrite(String),

    /// The index is neither strictly increasing nor strictly decreasing.
    #[error("index is not strictly monotonic at position {position} (value {value})")]
    NonMonotonicIndex { position: usize, value: f64 },

    /// Two columns passed to the constructor share a name.
    #[error("curve '{0}' is defined more than once")]
    DuplicateCurve(String),

    /// The document has no curve definitions.
    #[error("document defines no curves")]
    EmptyCurveSet,
}

/// Per-spec derivation failures, returned alongside the derived store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DerivationError {
    /// Required inputs are absent from the store; the spec is skipped.
    #[error("cannot derive '{spec}': missing input curves {missing:?}")]
    MissingInputs { spec: String, missing: Vec<String> },

    /// The specs reference each other in a cycle; nothing is derived.
    #[error("cyclic dependency between derived curves {specs:?}")]
    CyclicDependency { specs: Vec<String> },

    /// Two specs produce the same curve; nothing is derived.
    #[error("derived curve '{name}' is produced by more than one spec")]
    DuplicateOutput { name: String },

    /// The spec would overwrite the index curve; the spec is skipped.
    #[error("cannot derive '{spec}': name collides with the index curve")]
    IndexConflict { spec: String },

    /// The formula produced NaN/inf at some positions; those samples are stored as the sentinel.
    #[error("'{spec}' produced non-finite values at {positions} positions")]
    NonFiniteResult { spec: String, positions: usize },
}

impl DerivationError {
    /// Returns `true` for errors that abort the whole derivation call.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::CyclicDependency { .. } | Self::DuplicateOutput { .. }
        )
    }
}

/// Errors raised while writing delimited text or plot JSON.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV writer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Written bytes were not UTF-8.
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Error type returned by ingestion and session entry points.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The file could not be parsed as LAS.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The parsed document could not be turned into a curve store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Export failed.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// CSV read error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Tabular input does not have the expected shape (e.g. no columns).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A CSV cell could not be parsed as a number.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    InvalidValue {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// Invalid glob pattern for batch ingestion.
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A glob match could not be read.
    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// Directory traversal failed.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A session operation needs a loaded log.
    #[error("no well log loaded in this session")]
    NotLoaded,
}
