//! `las-data-processing` ingests LAS (Log ASCII Standard) well-log files into an in-memory,
//! depth-indexed [`store::CurveStore`], derives petrophysical curves from it, and projects it to
//! CSV or to per-curve plot series.
//!
//! The primary entrypoints are [`ingestion::ingest_from_path`] / [`ingestion::ingest_from_bytes`]
//! for one-shot use, and [`session::Session`] when a caller keeps one log loaded at a time.
//!
//! ## Pipeline
//!
//! raw bytes → [`las::parse`] → [`store::CurveStore::from_document`] →
//! [`processing::derive`] → [`export::to_csv`] / [`export::select_for_plot`]
//!
//! ## Missing values
//!
//! LAS files mark missing samples with a sentinel (the `~WELL NULL` value, `-999.25` by
//! default). The sentinel is kept verbatim everywhere: it is stored as-is, it propagates through
//! derived curves (any missing input gives a missing output), and it is written literally to CSV.
//!
//! ## Quick example
//!
//! ```rust
//! use las_data_processing::export::to_csv;
//! use las_data_processing::ingestion::{ingest_from_bytes, IngestionOptions};
//! use las_data_processing::processing::{derive, petrophysics};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let las = b"~VERSION
//!  VERS.   2.0 : CWLS LOG ASCII STANDARD
//!  WRAP.   NO  :
//! ~WELL
//!  NULL.   -999.25 :
//!  WELL.   15/9-F-11 B :
//! ~CURVE
//!  DEPT.M   : Depth
//!  SW  .V/V : Water saturation
//!  BVW .V/V : Bulk volume water
//!  PHIF.V/V : Total porosity
//! ~A
//! 3000.0   0.5     0.2  0.25
//! 3000.5  -999.25  0.2  0.25
//! 3001.0   0.3     0.2  0.25
//! ";
//!
//! let log = ingest_from_bytes(las, &IngestionOptions::default())?;
//! assert_eq!(log.document.well_name(), Some("15/9-F-11 B"));
//!
//! let (store, errors) = derive(log.store, &petrophysics::standard_specs());
//! assert!(errors.is_empty());
//! assert_eq!(store.get("SWIRR").unwrap()[1], -999.25);
//!
//! let csv = to_csv(&store)?;
//! assert!(csv.starts_with("DEPT,SW,BVW,PHIF,SWIRR,PHIE\n"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`las`]: LAS text parsing into a [`types::WellLogDocument`]
//! - [`types`]: document and curve model types
//! - [`store`]: the depth-indexed curve store
//! - [`processing`]: derived curves, filtering and per-curve statistics
//! - [`export`]: CSV and plot projection
//! - [`ingestion`]: path/byte/batch entrypoints with observer hooks
//! - [`session`]: explicit per-session state
//! - [`error`]: error types used across the crate

pub mod error;
pub mod export;
pub mod ingestion;
pub mod las;
pub mod processing;
pub mod session;
pub mod store;
pub mod types;

pub use error::{IngestionError, IngestionResult};
