//! Export and projection of a [`crate::store::CurveStore`].
//!
//! - [`delimited`]: CSV / delimited text, sentinel values written verbatim
//! - [`plot`]: per-curve `(depth, value)` series for an external renderer

pub mod delimited;
pub mod plot;

pub use delimited::{ExportOptions, export_csv_to_path, to_csv, to_delimited_text, write_delimited};
pub use plot::{DEFAULT_PLOT_TRACKS, PlotSelection, PlotTrack, select_for_plot};
