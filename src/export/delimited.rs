//! Delimited-text (CSV) export of a [`CurveStore`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ExportResult;
use crate::store::CurveStore;
use crate::types::Curve;

/// Options controlling delimited export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Write headers as `NAME (UNIT)` for curves that have a unit.
    pub include_units: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_units: false,
        }
    }
}

/// Render `store` as delimited text.
///
/// The header row is the index name followed by the column names; there is one row per index
/// entry. Missing samples are written as the sentinel value itself.
pub fn to_delimited_text(store: &CurveStore, delimiter: u8) -> ExportResult<String> {
    let options = ExportOptions {
        delimiter,
        ..ExportOptions::default()
    };
    let mut buf = Vec::new();
    write_delimited(store, &mut buf, &options)?;
    Ok(String::from_utf8(buf)?)
}

/// Render `store` as comma-separated text.
pub fn to_csv(store: &CurveStore) -> ExportResult<String> {
    to_delimited_text(store, b',')
}

/// Write `store` as delimited text to any writer. Returns the number of data rows written.
pub fn write_delimited<W: Write>(
    store: &CurveStore,
    writer: W,
    options: &ExportOptions,
) -> ExportResult<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    let header: Vec<String> = std::iter::once(store.index())
        .chain(store.columns())
        .map(|c| header_label(c, options.include_units))
        .collect();
    wtr.write_record(&header)?;

    let mut record: Vec<String> = Vec::with_capacity(store.curve_count());
    for (pos, depth) in store.depth().iter().enumerate() {
        record.clear();
        record.push(format_value(*depth));
        record.extend(store.columns().iter().map(|c| format_value(c.values[pos])));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(store.len())
}

/// Write `store` to a file at `path`, creating or truncating it.
pub fn export_csv_to_path(
    store: &CurveStore,
    path: impl AsRef<Path>,
    options: &ExportOptions,
) -> ExportResult<usize> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let rows = write_delimited(store, BufWriter::new(file), options)?;
    tracing::info!(path = %path.display(), rows, "exported curves");
    Ok(rows)
}

fn header_label(curve: &Curve, include_units: bool) -> String {
    if include_units && !curve.unit.is_empty() {
        format!("{} ({})", curve.name, curve.unit)
    } else {
        curve.name.clone()
    }
}

/// Shortest representation that parses back to the same `f64`.
fn format_value(v: f64) -> String {
    v.to_string()
}
