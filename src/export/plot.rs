//! Projection of selected curves into `(depth, value)` series for an external renderer.
//!
//! The renderer owns layout and axis orientation (depth increasing downward); nothing here
//! describes how to draw.

use std::io::Write;

use serde::Serialize;

use crate::error::ExportResult;
use crate::store::CurveStore;
use crate::types::IndexDirection;

/// Tracks selected by default when the caller has no preference.
pub const DEFAULT_PLOT_TRACKS: [&str; 5] = ["KLOGH", "PHIF", "SAND_FLAG", "SW", "VSH"];

/// One curve paired with the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotTrack {
    /// Curve mnemonic.
    pub name: String,
    /// Curve unit, empty when the header gives none.
    pub unit: String,
    /// Index values, one per sample.
    pub depth: Vec<f64>,
    /// Curve samples, NULL sentinel included.
    pub values: Vec<f64>,
    /// Sentinel marking a missing sample in `values`.
    pub null_value: f64,
}

impl PlotTrack {
    /// `(depth, value)` pairs, skipping missing samples.
    pub fn valid_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.depth
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .filter(|&(_, v)| !crate::types::is_null(v, self.null_value))
    }
}

/// Result of [`select_for_plot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSelection {
    /// Name of the index curve.
    pub index_name: String,
    /// Unit of the index curve.
    pub index_unit: String,
    /// Whether the index increases or decreases.
    pub direction: IndexDirection,
    /// Found curves, in request order.
    pub tracks: Vec<PlotTrack>,
    /// Requested names that are not in the store.
    pub missing: Vec<String>,
}

impl PlotSelection {
    /// Serialize for a renderer.
    pub fn to_json(&self) -> ExportResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize (pretty-printed) to any writer.
    pub fn write_json<W: Write>(&self, writer: W) -> ExportResult<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Track by name.
    pub fn track(&self, name: &str) -> Option<&PlotTrack> {
        self.tracks.iter().find(|t| t.name == name)
    }
}

/// Pair each requested curve with the index. Unknown names are reported in
/// [`PlotSelection::missing`] rather than dropped.
pub fn select_for_plot(store: &CurveStore, names: &[&str]) -> PlotSelection {
    let mut tracks = Vec::with_capacity(names.len());
    let mut missing = Vec::new();

    for &name in names {
        match store.curve(name) {
            Some(curve) => tracks.push(PlotTrack {
                name: curve.name.clone(),
                unit: curve.unit.clone(),
                depth: store.depth().to_vec(),
                values: curve.values.clone(),
                null_value: store.null_value(),
            }),
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        tracing::debug!(?missing, "plot selection names not found");
    }

    PlotSelection {
        index_name: store.index_name().to_string(),
        index_unit: store.index().unit.clone(),
        direction: store.direction(),
        tracks,
        missing,
    }
}
