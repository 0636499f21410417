//! Core data model types for LAS ingestion.
//!
//! A LAS file parses into a [`WellLogDocument`] (header sections, ordered curve definitions and
//! row-major samples). [`crate::store::CurveStore`] is the column-major view built from it.

use serde::{Deserialize, Serialize};

use crate::error::RowError;

/// Conventional LAS missing-value sentinel, used when a file does not declare `NULL`.
pub const DEFAULT_NULL_VALUE: f64 = -999.25;

/// Returns `true` if `value` is the missing-value `sentinel` (or NaN).
///
/// Comparison is exact: the sentinel is parsed from the same text as the samples, so a missing
/// sample is bit-for-bit equal to it.
pub fn is_null(value: f64, sentinel: f64) -> bool {
    value.is_nan() || value == sentinel
}

/// One `MNEM.UNIT VALUE : DESCRIPTION` line of a header section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderItem {
    /// Mnemonic (text before the first `.`).
    pub mnemonic: String,
    /// Unit (may be empty).
    pub unit: String,
    /// Raw value text, trimmed.
    pub value: String,
    /// Free-form description, trimmed.
    pub description: String,
}

impl HeaderItem {
    /// Create a new header item.
    pub fn new(
        mnemonic: impl Into<String>,
        unit: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            unit: unit.into(),
            value: value.into(),
            description: description.into(),
        }
    }

    /// Parse the value as a number, if it is one.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok()
    }
}

/// An ordered list of header items (`~VERSION`, `~WELL`, `~PARAMETER`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSection {
    /// Items in file order.
    pub items: Vec<HeaderItem>,
}

impl HeaderSection {
    /// Look up an item by mnemonic (case-insensitive).
    pub fn get(&self, mnemonic: &str) -> Option<&HeaderItem> {
        self.items
            .iter()
            .find(|item| item.mnemonic.eq_ignore_ascii_case(mnemonic))
    }

    /// Value text of an item by mnemonic, if present.
    pub fn value_of(&self, mnemonic: &str) -> Option<&str> {
        self.get(mnemonic).map(|item| item.value.as_str())
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the section has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A `~CURVE` section entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveDefinition {
    /// Curve mnemonic, unique within a document.
    pub mnemonic: String,
    /// Curve unit (may be empty).
    pub unit: String,
    /// API code from the value slot (often empty).
    pub api_code: String,
    /// Free-form description.
    pub description: String,
}

impl CurveDefinition {
    /// Create a new curve definition with an empty API code.
    pub fn new(
        mnemonic: impl Into<String>,
        unit: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            unit: unit.into(),
            api_code: String::new(),
            description: description.into(),
        }
    }
}

/// A parsed LAS file.
///
/// `curves[0]` is the index curve and every entry of `rows` has exactly `curves.len()` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellLogDocument {
    /// `~VERSION` items.
    pub version: HeaderSection,
    /// `~WELL` items.
    pub well: HeaderSection,
    /// `~CURVE` definitions in file order.
    pub curves: Vec<CurveDefinition>,
    /// `~PARAMETER` items.
    pub parameters: HeaderSection,
    /// `~OTHER` free text, lines joined with `\n`.
    pub other: String,
    /// Data rows, aligned positionally with `curves`.
    pub rows: Vec<Vec<f64>>,
    /// Missing-value sentinel in effect for this document.
    pub null_value: f64,
    /// Data rows dropped while parsing.
    pub row_errors: Vec<RowError>,
}

impl WellLogDocument {
    /// `VERS` value, if present.
    pub fn version_string(&self) -> Option<&str> {
        self.version.value_of("VERS")
    }

    /// `WELL` value, if present.
    pub fn well_name(&self) -> Option<&str> {
        self.well.value_of("WELL")
    }

    /// Whether the data section uses wrapped mode (`WRAP. YES`).
    pub fn is_wrapped(&self) -> bool {
        self.version
            .value_of("WRAP")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("YES"))
    }

    /// The index curve definition.
    pub fn index_curve(&self) -> Option<&CurveDefinition> {
        self.curves.first()
    }

    /// Curve mnemonics in file order, index first.
    pub fn curve_names(&self) -> impl Iterator<Item = &str> {
        self.curves.iter().map(|c| c.mnemonic.as_str())
    }

    /// Number of data rows kept.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of data rows dropped while parsing.
    pub fn skipped_row_count(&self) -> usize {
        self.row_errors.len()
    }
}

/// A named, depth-aligned sequence of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Curve name.
    pub name: String,
    /// Unit (may be empty).
    pub unit: String,
    /// Free-form description.
    pub description: String,
    /// Samples, one per index entry.
    pub values: Vec<f64>,
}

impl Curve {
    /// Create a curve with no unit or description.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            unit: String::new(),
            description: String::new(),
            values,
        }
    }

    /// Set the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the curve has no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordering of the index curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexDirection {
    /// Strictly increasing (typical for depth).
    Increasing,
    /// Strictly decreasing (e.g. logged bottom-up).
    Decreasing,
}
