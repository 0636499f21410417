//! Built-in petrophysical derived curves.

use super::derive::DerivedCurveSpec;

/// Water saturation.
pub const SW: &str = "SW";
/// Bulk volume water.
pub const BVW: &str = "BVW";
/// Total porosity.
pub const PHIF: &str = "PHIF";
/// Irreducible water saturation proxy.
pub const SWIRR: &str = "SWIRR";
/// Effective porosity.
pub const PHIE: &str = "PHIE";

/// `SWIRR = SW * BVW`.
pub fn swirr() -> DerivedCurveSpec {
    DerivedCurveSpec::new(SWIRR, [SW, BVW], |v| v[0] * v[1])
        .with_unit("V/V")
        .with_description("Irreducible water saturation")
}

/// `PHIE = PHIF * (1 - SWIRR)`. Depends on [`swirr`].
pub fn phie() -> DerivedCurveSpec {
    DerivedCurveSpec::new(PHIE, [PHIF, SWIRR], |v| v[0] * (1.0 - v[1]))
        .with_unit("V/V")
        .with_description("Effective porosity")
}

/// SWIRR and PHIE.
pub fn standard_specs() -> Vec<DerivedCurveSpec> {
    vec![swirr(), phie()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formulas_match_definitions() {
        assert!((swirr().evaluate(&[0.5, 0.2]) - 0.1).abs() < 1e-12);
        assert!((phie().evaluate(&[0.25, 0.1]) - 0.225).abs() < 1e-12);
    }

    #[test]
    fn phie_depends_on_swirr() {
        assert_eq!(phie().inputs, vec![PHIF.to_string(), SWIRR.to_string()]);
        assert_eq!(swirr().inputs, vec![SW.to_string(), BVW.to_string()]);
    }
}
