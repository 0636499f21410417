//! Row selection for [`CurveStore`]: depth windows, previews and predicates.

use std::ops::RangeInclusive;

use crate::store::CurveStore;

/// Returns a new store containing only positions for which `predicate` returns `true`.
///
/// The predicate receives the samples at one position, index first, in
/// [`CurveStore::curve_names`] order. Curve metadata is preserved.
pub fn filter<F>(store: &CurveStore, mut predicate: F) -> CurveStore
where
    F: FnMut(&[f64]) -> bool,
{
    let positions: Vec<usize> = (0..store.len())
        .filter(|&p| store.row(p).is_some_and(|row| predicate(&row)))
        .collect();
    store.select_positions(&positions)
}

/// Keep positions whose index value lies within `range` (inclusive, either index direction).
pub fn depth_window(store: &CurveStore, range: RangeInclusive<f64>) -> CurveStore {
    let (lo, hi) = if range.start() <= range.end() {
        (*range.start(), *range.end())
    } else {
        (*range.end(), *range.start())
    };
    let positions: Vec<usize> = store
        .depth()
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d >= lo && d <= hi)
        .map(|(p, _)| p)
        .collect();
    store.select_positions(&positions)
}

/// The first `n` positions (all of them if the store is shorter).
pub fn head(store: &CurveStore, n: usize) -> CurveStore {
    let positions: Vec<usize> = (0..store.len().min(n)).collect();
    store.select_positions(&positions)
}
