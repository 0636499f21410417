//! Session-scoped state: at most one loaded well log at a time.
//!
//! A [`Session`] is an ordinary owned value. Callers serving several users keep one per user;
//! nothing is shared between sessions.

use std::path::Path;

use crate::error::{DerivationError, IngestionError, IngestionResult};
use crate::export::{PlotSelection, select_for_plot, to_csv};
use crate::ingestion::{IngestionOptions, LoadedLog, ingest_from_bytes, ingest_from_path};
use crate::processing::{DerivedCurveSpec, derive_in_place};
use crate::store::CurveStore;
use crate::types::WellLogDocument;

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing loaded.
    Empty,
    /// A file is loaded, no derivation has run yet.
    Loaded,
    /// A derivation has run on the loaded file.
    Derived,
}

#[derive(Debug, Clone, Default)]
enum SessionState {
    #[default]
    Empty,
    Loaded(LoadedLog),
    Derived(LoadedLog),
}

/// Holds the current well log, if any.
///
/// ```rust
/// use las_data_processing::ingestion::IngestionOptions;
/// use las_data_processing::processing::petrophysics;
/// use las_data_processing::session::{Session, SessionPhase};
///
/// let las = b"~V\n VERS. 2.0 :\n~C\n DEPT.M :\n SW. :\n BVW. :\n PHIF. :\n~A\n1 0.5 0.2 0.25\n";
///
/// let mut session = Session::new();
/// session.load_bytes(las, &IngestionOptions::default()).unwrap();
/// assert_eq!(session.phase(), SessionPhase::Loaded);
///
/// let errors = session.derive(&petrophysics::standard_specs()).unwrap();
/// assert!(errors.is_empty());
/// assert_eq!(session.phase(), SessionPhase::Derived);
/// assert!(session.store().unwrap().contains("PHIE"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        match self.state {
            SessionState::Empty => SessionPhase::Empty,
            SessionState::Loaded(_) => SessionPhase::Loaded,
            SessionState::Derived(_) => SessionPhase::Derived,
        }
    }

    /// Load uploaded LAS bytes, replacing whatever was loaded.
    ///
    /// The previous log is discarded before parsing, so a failed load leaves the session empty.
    pub fn load_bytes(&mut self, raw: &[u8], options: &IngestionOptions) -> IngestionResult<&LoadedLog> {
        self.clear();
        let log = ingest_from_bytes(raw, options)?;
        self.install(log)
    }

    /// Load a LAS file from disk, replacing whatever was loaded.
    pub fn load_path(&mut self, path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<&LoadedLog> {
        self.clear();
        let log = ingest_from_path(path, options)?;
        self.install(log)
    }

    fn install(&mut self, log: LoadedLog) -> IngestionResult<&LoadedLog> {
        self.state = SessionState::Loaded(log);
        self.log().ok_or(IngestionError::NotLoaded)
    }

    /// Apply derived-curve specs to the loaded store.
    ///
    /// Returns the per-spec errors (see [`crate::processing::derive_in_place`]), or
    /// [`IngestionError::NotLoaded`] if nothing is loaded. A call aborted by a fatal error
    /// (cycle or duplicate output) computes nothing and leaves the phase unchanged.
    pub fn derive(&mut self, specs: &[DerivedCurveSpec]) -> IngestionResult<Vec<DerivationError>> {
        let (mut log, was_derived) = match std::mem::take(&mut self.state) {
            SessionState::Empty => return Err(IngestionError::NotLoaded),
            SessionState::Loaded(log) => (log, false),
            SessionState::Derived(log) => (log, true),
        };
        let errors = derive_in_place(&mut log.store, specs);
        let aborted = errors.iter().any(DerivationError::is_fatal);
        self.state = if aborted && !was_derived {
            SessionState::Loaded(log)
        } else {
            SessionState::Derived(log)
        };
        Ok(errors)
    }

    /// Drop the loaded log.
    pub fn clear(&mut self) {
        self.state = SessionState::Empty;
    }

    /// The loaded log, if any.
    pub fn log(&self) -> Option<&LoadedLog> {
        match &self.state {
            SessionState::Empty => None,
            SessionState::Loaded(log) | SessionState::Derived(log) => Some(log),
        }
    }

    /// The loaded curve store, if any.
    pub fn store(&self) -> Option<&CurveStore> {
        self.log().map(|log| &log.store)
    }

    /// The loaded document, if any.
    pub fn document(&self) -> Option<&WellLogDocument> {
        self.log().map(|log| &log.document)
    }

    /// CSV of the current store.
    pub fn to_csv(&self) -> IngestionResult<String> {
        let store = self.store().ok_or(IngestionError::NotLoaded)?;
        Ok(to_csv(store)?)
    }

    /// Plot projection of the current store.
    pub fn select_for_plot(&self, names: &[&str]) -> IngestionResult<PlotSelection> {
        let store = self.store().ok_or(IngestionError::NotLoaded)?;
        Ok(select_for_plot(store, names))
    }
}
