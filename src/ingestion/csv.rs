//! Reading delimited text (as written by [`crate::export::delimited`]) back into a
//! [`CurveStore`].

use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::store::CurveStore;
use crate::types::Curve;

/// Read a CSV file into a [`CurveStore`].
///
/// Rules:
///
/// - CSV must have headers; the first column is the index.
/// - A `NAME (UNIT)` header sets the curve unit.
/// - Every cell must be a number; empty cells become `null_value`.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, null_value: f64) -> IngestionResult<CurveStore> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, null_value)
}

/// Read delimited text from a string.
pub fn ingest_csv_from_str(input: &str, delimiter: u8, null_value: f64) -> IngestionResult<CurveStore> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(input.as_bytes());
    ingest_csv_from_reader(&mut rdr, null_value)
}

/// Read CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    null_value: f64,
) -> IngestionResult<CurveStore> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "csv has no header columns".to_string(),
        });
    }

    let mut curves: Vec<Curve> = headers
        .iter()
        .map(|h| {
            let (name, unit) = split_header(h);
            Curve::new(name, Vec::new()).with_unit(unit)
        })
        .collect();

    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        for (curve, raw) in curves.iter_mut().zip(record.iter()) {
            curve.values.push(parse_number(user_row, &curve.name, raw, null_value)?);
        }
    }

    let mut curves = curves.into_iter();
    let index = curves.next().ok_or_else(|| IngestionError::SchemaMismatch {
        message: "csv has no index column".to_string(),
    })?;
    Ok(CurveStore::new(index, curves.collect(), null_value)?)
}

fn split_header(header: &str) -> (&str, &str) {
    let header = header.trim();
    match header.strip_suffix(')').and_then(|h| h.rsplit_once(" (")) {
        Some((name, unit)) => (name.trim(), unit.trim()),
        None => (header, ""),
    }
}

fn parse_number(row: usize, column: &str, raw: &str, null_value: f64) -> IngestionResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(null_value);
    }
    trimmed.parse::<f64>().map_err(|e| IngestionError::InvalidValue {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_index_and_columns() {
        let store = ingest_csv_from_str("DEPT (M),SW\n1,0.5\n2,-999.25\n", b',', -999.25).unwrap();
        assert_eq!(store.index_name(), "DEPT");
        assert_eq!(store.index().unit, "M");
        assert_eq!(store.get("SW"), Some(&[0.5, -999.25][..]));
    }

    #[test]
    fn empty_cell_becomes_sentinel() {
        let store = ingest_csv_from_str("DEPT,SW\n1,\n", b',', -999.25).unwrap();
        assert_eq!(store.get("SW"), Some(&[-999.25][..]));
    }

    #[test]
    fn errors_on_non_numeric_cell() {
        let err = ingest_csv_from_str("DEPT,SW\n1,wet\n", b',', -999.25).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("failed to parse value"));
        assert!(msg.contains("row 2 column 'SW'"));
    }

    #[test]
    fn errors_on_ragged_rows() {
        let err = ingest_csv_from_str("DEPT,SW\n1,0.5,9\n", b',', -999.25).unwrap_err();
        assert!(matches!(err, IngestionError::Csv(_)));
    }
}
