//! Header line grammar shared by `~VERSION`, `~WELL`, `~CURVE` and `~PARAMETER`.

use std::collections::{HashMap, HashSet};

use crate::types::{CurveDefinition, HeaderItem};

/// Mnemonic used when a header line has nothing before its `.`.
pub const UNKNOWN_MNEMONIC: &str = "UNKNOWN";

/// Parse a `MNEM.UNIT  VALUE : DESCRIPTION` line.
///
/// - the mnemonic is everything before the first `.`
/// - the unit starts right after that `.` and stops at whitespace or `:`
/// - the description is everything after the last `:`
/// - the value is what remains in between
///
/// Returns a human-readable reason on failure.
pub fn parse_header_line(line: &str) -> Result<HeaderItem, String> {
    let line = line.trim();
    let dot = line
        .find('.')
        .ok_or_else(|| format!("expected 'MNEM.UNIT VALUE : DESCRIPTION', got '{line}'"))?;

    let mnemonic = match line[..dot].trim() {
        "" => UNKNOWN_MNEMONIC,
        m if m.contains(char::is_whitespace) => {
            return Err(format!(
                "mnemonic '{m}' contains whitespace; expected 'MNEM.UNIT VALUE : DESCRIPTION'"
            ));
        }
        m => m,
    };

    let rest = &line[dot + 1..];
    let unit_end = rest
        .find(|c: char| c.is_whitespace() || c == ':')
        .unwrap_or(rest.len());
    let unit = &rest[..unit_end];
    let rest = &rest[unit_end..];

    let (value, description) = match rest.rfind(':') {
        Some(colon) => (&rest[..colon], &rest[colon + 1..]),
        None => (rest, ""),
    };

    Ok(HeaderItem::new(
        mnemonic,
        unit,
        value.trim(),
        description.trim(),
    ))
}

/// Build a curve definition from a `~CURVE` line. The value slot holds the API code.
pub fn parse_curve_line(line: &str) -> Result<CurveDefinition, String> {
    let item = parse_header_line(line)?;
    Ok(CurveDefinition {
        mnemonic: item.mnemonic,
        unit: item.unit,
        api_code: item.value,
        description: item.description,
    })
}

/// Make curve mnemonics unique in place.
///
/// Every occurrence of a repeated mnemonic gets a `:1`, `:2`, ... suffix in file order, so a
/// file with two `GR` curves yields `GR:1` and `GR:2`. Unique mnemonics are left untouched, and a
/// suffix already used by another curve is skipped.
pub fn make_mnemonics_unique(curves: &mut [CurveDefinition]) {
    let mut totals: HashMap<String, usize> = HashMap::new();
    for curve in curves.iter() {
        *totals.entry(curve.mnemonic.clone()).or_default() += 1;
    }

    let mut taken: HashSet<String> = totals
        .iter()
        .filter(|&(_, &n)| n == 1)
        .map(|(name, _)| name.clone())
        .collect();

    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    for curve in curves.iter_mut() {
        if totals.get(&curve.mnemonic).copied().unwrap_or(0) < 2 {
            continue;
        }
        let n = next_suffix.entry(curve.mnemonic.clone()).or_default();
        let renamed = loop {
            *n += 1;
            let candidate = format!("{}:{}", curve.mnemonic, n);
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        taken.insert(renamed.clone());
        curve.mnemonic = renamed;
    }
}
