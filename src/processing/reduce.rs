//! Reduction operations over a single curve of a [`CurveStore`].

use serde::Serialize;

use crate::store::CurveStore;

/// Built-in reduction operations over a single curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all samples (including missing ones).
    Count,
    /// Count non-missing samples.
    ValidCount,
    /// Sum of non-missing samples.
    Sum,
    /// Minimum non-missing sample.
    Min,
    /// Maximum non-missing sample.
    Max,
    /// Mean of non-missing samples.
    Mean,
}

/// Reduce a curve using a built-in [`ReduceOp`].
///
/// - Returns `None` if `curve` does not exist in the store.
/// - Missing samples are ignored by every op except `Count`.
/// - For `Sum`/`Min`/`Max`/`Mean`, returns `Some(null_value)` if there are no valid samples.
pub fn reduce(store: &CurveStore, curve: &str, op: ReduceOp) -> Option<f64> {
    let values = store.get(curve)?;
    let valid = values.iter().copied().filter(|&v| !store.is_null(v));

    let out = match op {
        ReduceOp::Count => Some(values.len() as f64),
        ReduceOp::ValidCount => Some(valid.count() as f64),
        ReduceOp::Sum => valid.reduce(|a, b| a + b),
        ReduceOp::Min => valid.reduce(f64::min),
        ReduceOp::Max => valid.reduce(f64::max),
        ReduceOp::Mean => {
            let (sum, n) = valid.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
            (n > 0).then(|| sum / n as f64)
        }
    };
    Some(out.unwrap_or(store.null_value()))
}

/// Per-curve summary, as shown next to the channel list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSummary {
    /// Curve mnemonic.
    pub name: String,
    /// Curve unit.
    pub unit: String,
    /// Sample count, missing samples included.
    pub samples: usize,
    /// Samples that are not the NULL sentinel.
    pub valid: usize,
    /// Smallest valid sample; `None` when the curve has no valid samples.
    pub min: Option<f64>,
    /// Largest valid sample.
    pub max: Option<f64>,
    /// Mean of the valid samples.
    pub mean: Option<f64>,
}

/// Summarize one curve, or `None` if absent.
pub fn summarize(store: &CurveStore, curve: &str) -> Option<CurveSummary> {
    let c = store.curve(curve)?;
    let valid: Vec<f64> = c.values.iter().copied().filter(|&v| !store.is_null(v)).collect();
    let stat = |op| (!valid.is_empty()).then(|| reduce(store, curve, op)).flatten();

    Some(CurveSummary {
        name: c.name.clone(),
        unit: c.unit.clone(),
        samples: c.values.len(),
        valid: valid.len(),
        min: stat(ReduceOp::Min),
        max: stat(ReduceOp::Max),
        mean: stat(ReduceOp::Mean),
    })
}

/// Summaries for every curve, index first.
pub fn summarize_all(store: &CurveStore) -> Vec<CurveSummary> {
    store
        .curve_names()
        .filter_map(|name| summarize(store, name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Curve;

    fn store_with_nulls() -> CurveStore {
        CurveStore::new(
            Curve::new("DEPT", vec![1.0, 2.0, 3.0]),
            vec![
                Curve::new("GR", vec![10.0, -999.25, 5.5]).with_unit("GAPI"),
                Curve::new("EMPTY", vec![-999.25, -999.25, -999.25]),
            ],
            -999.25,
        )
        .unwrap()
    }

    #[test]
    fn count_includes_missing_samples() {
        let s = store_with_nulls();
        assert_eq!(reduce(&s, "GR", ReduceOp::Count), Some(3.0));
        assert_eq!(reduce(&s, "GR", ReduceOp::ValidCount), Some(2.0));
    }

    #[test]
    fn numeric_ops_ignore_missing_samples() {
        let s = store_with_nulls();
        assert_eq!(reduce(&s, "GR", ReduceOp::Sum), Some(15.5));
        assert_eq!(reduce(&s, "GR", ReduceOp::Min), Some(5.5));
        assert_eq!(reduce(&s, "GR", ReduceOp::Max), Some(10.0));
        assert_eq!(reduce(&s, "GR", ReduceOp::Mean), Some(7.75));
    }

    #[test]
    fn all_missing_reduces_to_sentinel() {
        let s = store_with_nulls();
        assert_eq!(reduce(&s, "EMPTY", ReduceOp::Sum), Some(-999.25));
        assert_eq!(reduce(&s, "EMPTY", ReduceOp::Mean), Some(-999.25));
        assert_eq!(reduce(&s, "EMPTY", ReduceOp::ValidCount), Some(0.0));
    }

    #[test]
    fn missing_curve_returns_none() {
        let s = store_with_nulls();
        assert_eq!(reduce(&s, "missing", ReduceOp::Count), None);
        assert!(summarize(&s, "missing").is_none());
    }

    #[test]
    fn summary_reports_valid_range() {
        let s = store_with_nulls();
        let gr = summarize(&s, "GR").unwrap();
        assert_eq!(gr.unit, "GAPI");
        assert_eq!((gr.samples, gr.valid), (3, 2));
        assert_eq!(gr.min, Some(5.5));
        assert_eq!(gr.max, Some(10.0));

        let empty = summarize(&s, "EMPTY").unwrap();
        assert_eq!(empty.valid, 0);
        assert_eq!(empty.mean, None);

        assert_eq!(summarize_all(&s).len(), 3);
    }
}
