//! Derived curves: named formulas over existing curves, evaluated in dependency order.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::DerivationError;
use crate::store::CurveStore;
use crate::types::Curve;

/// Per-position formula: receives one value per input, in input order.
pub type Formula = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// A curve computed from other curves.
#[derive(Clone)]
pub struct DerivedCurveSpec {
    /// Output curve name.
    pub name: String,
    /// Required input curves, in the order the formula receives them.
    pub inputs: Vec<String>,
    /// Unit of the output curve.
    pub unit: String,
    /// Description of the output curve.
    pub description: String,
    formula: Formula,
}

impl DerivedCurveSpec {
    /// Create a spec from a name, its inputs and a pure per-position formula.
    pub fn new<I, S, F>(name: impl Into<String>, inputs: I, formula: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            inputs: inputs.into_iter().map(Into::into).collect(),
            unit: String::new(),
            description: String::new(),
            formula: Arc::new(formula),
        }
    }

    /// Set the output unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the output description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Evaluate the formula for one position.
    pub fn evaluate(&self, inputs: &[f64]) -> f64 {
        (self.formula)(inputs)
    }
}

impl fmt::Debug for DerivedCurveSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedCurveSpec")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("unit", &self.unit)
            .finish_non_exhaustive()
    }
}

/// Apply `specs` to `store` and return the extended store with any per-spec errors.
///
/// See [`derive_in_place`] for ordering and missing-value rules.
///
/// ```rust
/// use las_data_processing::processing::{derive, petrophysics};
/// use las_data_processing::store::CurveStore;
/// use las_data_processing::types::Curve;
///
/// let store = CurveStore::new(
///     Curve::new("DEPT", vec![1.0, 2.0]),
///     vec![
///         Curve::new("SW", vec![0.5, -999.25]),
///         Curve::new("BVW", vec![0.2, 0.2]),
///         Curve::new("PHIF", vec![0.25, 0.25]),
///     ],
///     -999.25,
/// )
/// .unwrap();
///
/// let (store, errors) = derive(store, &petrophysics::standard_specs());
/// assert!(errors.is_empty());
/// assert_eq!(store.get("PHIE").unwrap()[1], -999.25);
/// ```
pub fn derive(mut store: CurveStore, specs: &[DerivedCurveSpec]) -> (CurveStore, Vec<DerivationError>) {
    let errors = derive_in_place(&mut store, specs);
    (store, errors)
}

/// Apply `specs` to `store` in place.
///
/// - Specs are ordered by their dependencies on each other (a spec whose input is another spec's
///   output runs after it); independent specs keep the given order.
/// - A dependency cycle or two specs with the same output abort the call before anything is
///   computed.
/// - A spec whose inputs are absent when its turn comes is skipped with
///   [`DerivationError::MissingInputs`]; the others still run.
/// - At every position where an input is the missing-value sentinel, the output is the sentinel.
///   Non-finite formula results are also stored as the sentinel and reported.
pub fn derive_in_place(store: &mut CurveStore, specs: &[DerivedCurveSpec]) -> Vec<DerivationError> {
    let order = match evaluation_order(specs) {
        Ok(order) => order,
        Err(e) => {
            tracing::warn!(error = %e, "derivation aborted");
            return vec![e];
        }
    };

    let mut errors = Vec::new();
    for idx in order {
        let spec = &specs[idx];
        match apply_spec(store, spec) {
            Ok(non_finite) => {
                tracing::info!(curve = %spec.name, samples = store.len(), "derived curve");
                if non_finite > 0 {
                    let e = DerivationError::NonFiniteResult {
                        spec: spec.name.clone(),
                        positions: non_finite,
                    };
                    tracing::warn!(error = %e, "derived curve has undefined samples");
                    errors.push(e);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping derived curve");
                errors.push(e);
            }
        }
    }
    errors
}

/// Topological order of `specs` (Kahn's algorithm, lowest ready index first).
pub fn evaluation_order(specs: &[DerivedCurveSpec]) -> Result<Vec<usize>, DerivationError> {
    let mut producer: HashMap<&str, usize> = HashMap::with_capacity(specs.len());
    for (i, spec) in specs.iter().enumerate() {
        if producer.insert(spec.name.as_str(), i).is_some() {
            return Err(DerivationError::DuplicateOutput {
                name: spec.name.clone(),
            });
        }
    }

    let n = specs.len();
    let mut indegree = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, spec) in specs.iter().enumerate() {
        let mut deps: Vec<usize> = spec
            .inputs
            .iter()
            .filter_map(|input| producer.get(input.as_str()).copied())
            .collect();
        deps.sort_unstable();
        deps.dedup();
        for dep in deps {
            indegree[i] += 1;
            dependents[dep].push(i);
        }
    }

    let mut done = vec![false; n];
    let mut order = Vec::with_capacity(n);
    while order.len() < n {
        let Some(next) = (0..n).find(|&i| !done[i] && indegree[i] == 0) else {
            let blocked = (0..n)
                .filter(|&i| !done[i])
                .map(|i| specs[i].name.clone())
                .collect();
            return Err(DerivationError::CyclicDependency { specs: blocked });
        };
        done[next] = true;
        order.push(next);
        for &d in &dependents[next] {
            indegree[d] -= 1;
        }
    }
    Ok(order)
}

/// Evaluate one spec and append its curve. Returns the number of non-finite results.
fn apply_spec(store: &mut CurveStore, spec: &DerivedCurveSpec) -> Result<usize, DerivationError> {
    if spec.name == store.index_name() {
        return Err(DerivationError::IndexConflict {
            spec: spec.name.clone(),
        });
    }

    let missing: Vec<String> = spec
        .inputs
        .iter()
        .filter(|name| !store.contains(name))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(DerivationError::MissingInputs {
            spec: spec.name.clone(),
            missing,
        });
    }

    let null = store.null_value();
    let mut non_finite = 0usize;
    let values = {
        let columns: Vec<&[f64]> = spec.inputs.iter().filter_map(|name| store.get(name)).collect();
        let mut args = vec![0.0; columns.len()];
        let mut out = Vec::with_capacity(store.len());

        'positions: for pos in 0..store.len() {
            for (slot, column) in args.iter_mut().zip(&columns) {
                let v = column[pos];
                if store.is_null(v) {
                    out.push(null);
                    continue 'positions;
                }
                *slot = v;
            }

            let v = spec.evaluate(&args);
            if v.is_finite() {
                out.push(v);
            } else {
                non_finite += 1;
                out.push(null);
            }
        }
        out
    };

    let curve = Curve::new(spec.name.clone(), values)
        .with_unit(spec.unit.clone())
        .with_description(spec.description.clone());
    // Lengths match the index by construction and the index name was checked above.
    store
        .append_curve(curve)
        .map_err(|_| DerivationError::IndexConflict {
            spec: spec.name.clone(),
        })?;
    Ok(non_finite)
}
