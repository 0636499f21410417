//! Depth-indexed, column-major curve storage.
//!
//! A [`CurveStore`] is built once per ingested file from a [`WellLogDocument`], gains derived
//! columns through [`crate::processing::derive`], and is read by [`crate::export`]. Columns are
//! never removed.

use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::types::{Curve, IndexDirection, WellLogDocument};

/// In-memory table of curves sharing one index (typically depth).
///
/// Invariant: every column has exactly `index.len()` samples, and curve names (index included)
/// are unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveStore {
    index: Curve,
    columns: Vec<Curve>,
    null_value: f64,
    direction: IndexDirection,
}

impl CurveStore {
    /// Build a store from an index curve and columns.
    ///
    /// Validates column lengths, name uniqueness and index monotonicity. A repeated column
    /// name is [`StoreError::DuplicateCurve`].
    pub fn new(index: Curve, columns: Vec<Curve>, null_value: f64) -> StoreResult<Self> {
        let direction = validate_index(&index.values, null_value)?;
        let mut store = Self {
            index,
            columns: Vec::with_capacity(columns.len()),
            null_value,
            direction,
        };
        for column in columns {
            if store.columns.iter().any(|c| c.name == column.name) {
                return Err(StoreError::DuplicateCurve(column.name));
            }
            store.append_curve(column)?;
        }
        Ok(store)
    }

    /// Build a store from a parsed document.
    ///
    /// The first curve definition becomes the index. Missing samples keep the document's
    /// sentinel value.
    pub fn from_document(doc: &WellLogDocument) -> StoreResult<Self> {
        let Some((index_def, rest)) = doc.curves.split_first() else {
            return Err(StoreError::EmptyCurveSet);
        };

        let mut series: Vec<Vec<f64>> = doc
            .curves
            .iter()
            .map(|_| Vec::with_capacity(doc.rows.len()))
            .collect();
        for row in &doc.rows {
            for (dst, &v) in series.iter_mut().zip(row) {
                dst.push(v);
            }
        }
        let mut series = series.into_iter();

        let index = Curve {
            name: index_def.mnemonic.clone(),
            unit: index_def.unit.clone(),
            description: index_def.description.clone(),
            values: series.next().unwrap_or_default(),
        };
        let columns = rest
            .iter()
            .zip(series)
            .map(|(def, values)| Curve {
                name: def.mnemonic.clone(),
                unit: def.unit.clone(),
                description: def.description.clone(),
                values,
            })
            .collect();

        let store = Self::new(index, columns, doc.null_value)?;
        tracing::debug!(
            index = %store.index.name,
            curves = store.curve_count(),
            samples = store.len(),
            direction = ?store.direction,
            "built curve store"
        );
        Ok(store)
    }

    /// Number of index entries.
    pub fn len(&self) -> usize {
        self.index.values.len()
    }

    /// Returns `true` if the store has no samples.
    pub fn is_empty(&self) -> bool {
        self.index.values.is_empty()
    }

    /// Number of curves, index included.
    pub fn curve_count(&self) -> usize {
        self.columns.len() + 1
    }

    /// Curve names, index first.
    pub fn curve_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.index.name.as_str())
            .chain(self.columns.iter().map(|c| c.name.as_str()))
    }

    /// Name of the index curve.
    pub fn index_name(&self) -> &str {
        &self.index.name
    }

    /// The index curve.
    pub fn index(&self) -> &Curve {
        &self.index
    }

    /// Index values (depths).
    pub fn depth(&self) -> &[f64] {
        &self.index.values
    }

    /// Non-index columns in order.
    pub fn columns(&self) -> &[Curve] {
        &self.columns
    }

    /// Ordering of the index.
    pub fn direction(&self) -> IndexDirection {
        self.direction
    }

    /// Missing-value sentinel.
    pub fn null_value(&self) -> f64 {
        self.null_value
    }

    /// Returns `true` if `value` is the missing-value sentinel.
    pub fn is_null(&self, value: f64) -> bool {
        crate::types::is_null(value, self.null_value)
    }

    /// Curve by name (index included).
    pub fn curve(&self, name: &str) -> Option<&Curve> {
        if self.index.name == name {
            return Some(&self.index);
        }
        self.columns.iter().find(|c| c.name == name)
    }

    /// Samples of a curve by name, or `None` if absent.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.curve(name).map(|c| c.values.as_slice())
    }

    /// Returns `true` if a curve with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.curve(name).is_some()
    }

    /// Project onto the index plus the named columns (in request order).
    ///
    /// Names that do not exist are returned alongside the subset instead of failing. Naming the
    /// index or repeating a name is harmless.
    pub fn columns_named(&self, names: &[&str]) -> (CurveStore, Vec<String>) {
        let mut columns: Vec<Curve> = Vec::with_capacity(names.len());
        let mut missing = Vec::new();

        for &name in names {
            if name == self.index.name || columns.iter().any(|c| c.name == name) {
                continue;
            }
            match self.columns.iter().find(|c| c.name == name) {
                Some(c) => columns.push(c.clone()),
                None => missing.push(name.to_string()),
            }
        }

        let subset = CurveStore {
            index: self.index.clone(),
            columns,
            null_value: self.null_value,
            direction: self.direction,
        };
        (subset, missing)
    }

    /// Add a column, or overwrite the samples of an existing one.
    pub fn append(&mut self, name: impl Into<String>, values: Vec<f64>) -> StoreResult<()> {
        let name = name.into();
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => {
                let replacement = Curve {
                    name,
                    unit: existing.unit.clone(),
                    description: existing.description.clone(),
                    values,
                };
                check_len(&replacement, self.index.values.len())?;
                *existing = replacement;
                Ok(())
            }
            None => self.append_curve(Curve::new(name, values)),
        }
    }

    /// Add a curve, or replace an existing column of the same name in place.
    pub fn append_curve(&mut self, curve: Curve) -> StoreResult<()> {
        if curve.name == self.index.name {
            return Err(StoreError::IndexOverwrite(curve.name));
        }
        check_len(&curve, self.index.values.len())?;

        match self.columns.iter_mut().find(|c| c.name == curve.name) {
            Some(existing) => *existing = curve,
            None => self.columns.push(curve),
        }
        Ok(())
    }

    /// Samples at one index position, index first.
    pub fn row(&self, position: usize) -> Option<Vec<f64>> {
        let depth = *self.index.values.get(position)?;
        let mut out = Vec::with_capacity(self.curve_count());
        out.push(depth);
        out.extend(self.columns.iter().map(|c| c.values[position]));
        Some(out)
    }

    /// Build a store sharing this store's metadata with a subset of positions.
    pub(crate) fn select_positions(&self, positions: &[usize]) -> CurveStore {
        let pick = |curve: &Curve| Curve {
            name: curve.name.clone(),
            unit: curve.unit.clone(),
            description: curve.description.clone(),
            values: positions.iter().map(|&p| curve.values[p]).collect(),
        };
        CurveStore {
            index: pick(&self.index),
            columns: self.columns.iter().map(pick).collect(),
            null_value: self.null_value,
            direction: self.direction,
        }
    }
}

fn check_len(curve: &Curve, expected: usize) -> StoreResult<()> {
    if curve.values.len() != expected {
        return Err(StoreError::LengthMismatch {
            name: curve.name.clone(),
            expected,
            found: curve.values.len(),
        });
    }
    Ok(())
}

fn validate_index(values: &[f64], null_value: f64) -> StoreResult<IndexDirection> {
    for (position, &value) in values.iter().enumerate() {
        if crate::types::is_null(value, null_value) || !value.is_finite() {
            return Err(StoreError::NonMonotonicIndex { position, value });
        }
    }

    let direction = match values {
        [first, second, ..] if second < first => IndexDirection::Decreasing,
        _ => IndexDirection::Increasing,
    };

    for (i, pair) in values.windows(2).enumerate() {
        let ok = match direction {
            IndexDirection::Increasing => pair[1] > pair[0],
            IndexDirection::Decreasing => pair[1] < pair[0],
        };
        if !ok {
            return Err(StoreError::NonMonotonicIndex {
                position: i + 1,
                value: pair[1],
            });
        }
    }
    Ok(direction)
}
