//! In-memory curve transformations.
//!
//! The processing layer operates on [`crate::store::CurveStore`] values produced by ingestion.
//!
//! Currently implemented:
//!
//! - [`derive()`]: derived curves from named formulas, in dependency order
//! - [`petrophysics`]: the built-in SWIRR / PHIE formulas
//! - [`filter()`], [`depth_window`], [`head`]: position selection
//! - [`reduce()`], [`summarize`]: per-curve statistics that skip missing samples
//!
//! ## Example: derive → window → reduce
//!
//! ```rust
//! use las_data_processing::processing::{derive, depth_window, petrophysics, reduce, ReduceOp};
//! use las_data_processing::store::CurveStore;
//! use las_data_processing::types::Curve;
//!
//! let store = CurveStore::new(
//!     Curve::new("DEPT", vec![1000.0, 1000.5, 1001.0]),
//!     vec![
//!         Curve::new("SW", vec![0.5, -999.25, 0.3]),
//!         Curve::new("BVW", vec![0.2, 0.2, 0.2]),
//!         Curve::new("PHIF", vec![0.25, 0.25, 0.25]),
//!     ],
//!     -999.25,
//! )
//! .unwrap();
//!
//! // PHIE is listed first; it still runs after SWIRR.
//! let specs = vec![petrophysics::phie(), petrophysics::swirr()];
//! let (store, errors) = derive(store, &specs);
//! assert!(errors.is_empty());
//!
//! let window = depth_window(&store, 1000.0..=1000.5);
//! assert_eq!(window.len(), 2);
//!
//! // Missing samples are ignored.
//! assert_eq!(reduce(&window, "PHIE", ReduceOp::ValidCount), Some(1.0));
//! ```

pub mod derive;
pub mod filter;
pub mod petrophysics;
pub mod reduce;

pub use derive::{DerivedCurveSpec, Formula, derive, derive_in_place, evaluation_order};
pub use filter::{depth_window, filter, head};
pub use reduce::{CurveSummary, ReduceOp, reduce, summarize, summarize_all};
