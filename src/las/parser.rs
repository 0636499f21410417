//! LAS 1.2 / 2.0 text parser.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult, RowError};
use crate::types::{CurveDefinition, DEFAULT_NULL_VALUE, HeaderSection, WellLogDocument};

use super::header::{make_mnemonics_unique, parse_curve_line, parse_header_line};

/// Options controlling LAS parsing.
///
/// Use [`Default`] for common cases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Overrides the `NULL` value declared in `~WELL`.
    pub null_value: Option<f64>,
    /// Decode non-UTF-8 input as ISO-8859-1 instead of failing with [`ParseError::Encoding`].
    pub latin1_fallback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Version,
    Well,
    Curve,
    Parameter,
    Other,
    Ascii,
    Unknown,
}

impl Section {
    /// Classify a section header by the first letter after `~`.
    fn from_marker(marker: &str) -> Self {
        match marker.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('V') => Self::Version,
            Some('W') => Self::Well,
            Some('C') => Self::Curve,
            Some('P') => Self::Parameter,
            Some('O') => Self::Other,
            Some('A') => Self::Ascii,
            _ => Self::Unknown,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Version => "VERSION",
            Self::Well => "WELL",
            Self::Curve => "CURVE",
            Self::Parameter => "PARAMETER",
            Self::Other => "OTHER",
            Self::Ascii => "ASCII",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Parse raw LAS bytes with default options.
///
/// ```rust
/// use las_data_processing::las::parse;
///
/// let text = b"~V\n VERS. 2.0 :\n WRAP. NO :\n~W\n NULL. -999.25 :\n~C\n DEPT.M :\n GR.GAPI :\n~A\n1000.0 45.1\n1000.5 -999.25\n";
/// let doc = parse(text).unwrap();
/// assert_eq!(doc.curve_names().collect::<Vec<_>>(), vec!["DEPT", "GR"]);
/// assert_eq!(doc.rows[1][1], -999.25);
/// ```
pub fn parse(raw: &[u8]) -> ParseResult<WellLogDocument> {
    parse_with_options(raw, &ParseOptions::default())
}

/// Parse raw LAS bytes.
///
/// Decoding failures surface as [`ParseError::Encoding`]; see [`parse_str_with_options`] for the
/// structural rules.
pub fn parse_with_options(raw: &[u8], options: &ParseOptions) -> ParseResult<WellLogDocument> {
    let text = decode(raw, options.latin1_fallback)?;
    parse_str_with_options(&text, options)
}

/// Parse already-decoded LAS text with default options.
pub fn parse_str(text: &str) -> ParseResult<WellLogDocument> {
    parse_str_with_options(text, &ParseOptions::default())
}

/// Parse already-decoded LAS text.
///
/// Rules:
///
/// - `~CURVE` and `~ASCII` are required; their absence is [`ParseError::MissingSection`].
/// - Header lines must follow `MNEM.UNIT VALUE : DESCRIPTION`, otherwise
///   [`ParseError::MalformedHeader`].
/// - Data rows whose field count or numbers are wrong are skipped and recorded in
///   [`WellLogDocument::row_errors`].
pub fn parse_str_with_options(text: &str, options: &ParseOptions) -> ParseResult<WellLogDocument> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut version = HeaderSection::default();
    let mut well = HeaderSection::default();
    let mut parameters = HeaderSection::default();
    let mut curves: Vec<CurveDefinition> = Vec::new();
    let mut other: Vec<&str> = Vec::new();
    let mut data_lines: Vec<(usize, &str)> = Vec::new();

    let mut section: Option<Section> = None;
    let mut curve_marker_line: Option<usize> = None;
    let mut seen_ascii = false;
    let mut null_line = 0usize;

    for (idx0, line) in text.lines().enumerate() {
        let line_no = idx0 + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(marker) = trimmed.strip_prefix('~') {
            let s = Section::from_marker(marker);
            match s {
                Section::Curve => curve_marker_line = Some(line_no),
                Section::Ascii => seen_ascii = true,
                Section::Unknown => {
                    tracing::debug!(line = line_no, marker = trimmed, "skipping unrecognised LAS section");
                }
                _ => {}
            }
            section = Some(s);
            continue;
        }

        let malformed = |s: Section, reason: String| ParseError::MalformedHeader {
            section: s.name().to_string(),
            line: line_no,
            reason,
        };

        match section {
            None => {
                return Err(ParseError::MalformedHeader {
                    section: "(none)".to_string(),
                    line: line_no,
                    reason: "content before the first '~' section marker".to_string(),
                });
            }
            Some(s @ (Section::Version | Section::Well | Section::Parameter)) => {
                let item = parse_header_line(trimmed).map_err(|reason| malformed(s, reason))?;
                match s {
                    Section::Version => version.items.push(item),
                    Section::Well => {
                        if item.mnemonic.eq_ignore_ascii_case("NULL") {
                            null_line = line_no;
                        }
                        well.items.push(item);
                    }
                    _ => parameters.items.push(item),
                }
            }
            Some(Section::Curve) => {
                let curve =
                    parse_curve_line(trimmed).map_err(|reason| malformed(Section::Curve, reason))?;
                curves.push(curve);
            }
            Some(Section::Other) => other.push(trimmed),
            Some(Section::Ascii) => data_lines.push((line_no, trimmed)),
            Some(Section::Unknown) => {}
        }
    }

    let Some(curve_line) = curve_marker_line else {
        return Err(ParseError::MissingSection(Section::Curve.name().to_string()));
    };
    if !seen_ascii {
        return Err(ParseError::MissingSection(Section::Ascii.name().to_string()));
    }
    if curves.is_empty() {
        return Err(ParseError::MalformedHeader {
            section: Section::Curve.name().to_string(),
            line: curve_line,
            reason: "section defines no curves".to_string(),
        });
    }
    make_mnemonics_unique(&mut curves);

    let null_value = match options.null_value {
        Some(v) => v,
        None => declared_null_value(&well, null_line)?,
    };

    let wrapped = version
        .value_of("WRAP")
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("YES"));

    let names: Vec<&str> = curves.iter().map(|c| c.mnemonic.as_str()).collect();
    let (rows, row_errors) = if wrapped {
        read_wrapped_rows(&data_lines, &names)
    } else {
        read_rows(&data_lines, &names)
    };

    for err in &row_errors {
        tracing::warn!(error = %err, "skipping LAS data row");
    }
    tracing::debug!(
        curves = curves.len(),
        rows = rows.len(),
        skipped_rows = row_errors.len(),
        wrapped,
        null_value,
        "parsed LAS document"
    );

    Ok(WellLogDocument {
        version,
        well,
        curves,
        parameters,
        other: other.join("\n"),
        rows,
        null_value,
        row_errors,
    })
}

fn decode(raw: &[u8], latin1_fallback: bool) -> ParseResult<Cow<'_, str>> {
    let raw = raw.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(raw);
    match std::str::from_utf8(raw) {
        Ok(s) => Ok(Cow::Borrowed(s)),
        Err(_) if latin1_fallback => {
            tracing::debug!("input is not UTF-8; decoding as ISO-8859-1");
            Ok(Cow::Owned(raw.iter().map(|&b| char::from(b)).collect()))
        }
        Err(e) => Err(ParseError::Encoding {
            valid_up_to: e.valid_up_to(),
        }),
    }
}

fn declared_null_value(well: &HeaderSection, line: usize) -> ParseResult<f64> {
    let Some(item) = well.get("NULL") else {
        return Ok(DEFAULT_NULL_VALUE);
    };
    if item.value.is_empty() {
        return Ok(DEFAULT_NULL_VALUE);
    }
    item.numeric_value().ok_or_else(|| ParseError::MalformedHeader {
        section: Section::Well.name().to_string(),
        line,
        reason: format!("NULL value '{}' is not a number", item.value),
    })
}

/// One row per line.
fn read_rows(lines: &[(usize, &str)], names: &[&str]) -> (Vec<Vec<f64>>, Vec<RowError>) {
    let expected = names.len();
    let mut rows = Vec::with_capacity(lines.len());
    let mut errors = Vec::new();

    for &(line, text) in lines {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() != expected {
            errors.push(RowError::FieldMismatch {
                line,
                expected,
                found: tokens.len(),
            });
            continue;
        }

        match parse_row(line, &tokens, names) {
            Ok(row) => rows.push(row),
            Err(e) => errors.push(e),
        }
    }

    (rows, errors)
}

fn parse_row(line: usize, tokens: &[&str], names: &[&str]) -> Result<Vec<f64>, RowError> {
    tokens
        .iter()
        .zip(names)
        .map(|(raw, column)| {
            raw.parse::<f64>().map_err(|_| RowError::InvalidNumber {
                line,
                column: (*column).to_string(),
                raw: (*raw).to_string(),
            })
        })
        .collect()
}

/// `WRAP. YES`: a record spans lines, so tokens are cut into records of `names.len()` values.
fn read_wrapped_rows(lines: &[(usize, &str)], names: &[&str]) -> (Vec<Vec<f64>>, Vec<RowError>) {
    let expected = names.len();
    let mut rows = Vec::new();
    let mut errors = Vec::new();

    let mut pending: Vec<f64> = Vec::with_capacity(expected);
    let mut pending_line = 0usize;
    let mut pending_error: Option<RowError> = None;

    for &(line, text) in lines {
        for raw in text.split_whitespace() {
            if pending.is_empty() {
                pending_line = line;
            }
            let value = match raw.parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    if pending_error.is_none() {
                        pending_error = Some(RowError::InvalidNumber {
                            line,
                            column: names[pending.len()].to_string(),
                            raw: raw.to_string(),
                        });
                    }
                    f64::NAN
                }
            };
            pending.push(value);

            if pending.len() == expected {
                match pending_error.take() {
                    Some(e) => errors.push(e),
                    None => rows.push(std::mem::replace(
                        &mut pending,
                        Vec::with_capacity(expected),
                    )),
                }
                pending.clear();
            }
        }
    }

    if !pending.is_empty() {
        errors.push(RowError::FieldMismatch {
            line: pending_line,
            expected,
            found: pending.len(),
        });
    }

    (rows, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "\
~VERSION INFORMATION
 VERS.   2.0 : CWLS LOG ASCII STANDARD
 WRAP.   NO  : ONE LINE PER DEPTH STEP
~WELL INFORMATION
 STRT.M  1000.0 : START DEPTH
 STOP.M  1001.0 : STOP DEPTH
 STEP.M  0.5    : STEP
 NULL.   -999.25 : NULL VALUE
 WELL.   TEST-1 : WELL
~CURVE INFORMATION
 DEPT.M      : DEPTH
 SW  .V/V    : WATER SATURATION
~PARAMETER INFORMATION
 BHT .DEGC   35.5 : BOTTOM HOLE TEMPERATURE
~OTHER
 Some free text
~A  DEPT  SW
1000.0  0.5
1000.5  -999.25
1001.0  0.3
";

    #[test]
    fn parses_all_sections() {
        let doc = parse_str(MINIMAL).unwrap();
        assert_eq!(doc.version_string(), Some("2.0"));
        assert_eq!(doc.well_name(), Some("TEST-1"));
        assert_eq!(doc.curves.len(), 2);
        assert_eq!(doc.curves[1].unit, "V/V");
        assert_eq!(doc.parameters.get("BHT").and_then(|i| i.numeric_value()), Some(35.5));
        assert_eq!(doc.other, "Some free text");
        assert_eq!(
            doc.rows,
            vec![vec![1000.0, 0.5], vec![1000.5, -999.25], vec![1001.0, 0.3]]
        );
        assert_eq!(doc.null_value, -999.25);
        assert!(doc.row_errors.is_empty());
        assert!(!doc.is_wrapped());
    }

    #[test]
    fn short_row_is_skipped_and_reported() {
        let text = MINIMAL.replace("1000.5  -999.25", "1000.5");
        let doc = parse_str(&text).unwrap();
        assert_eq!(doc.row_count(), 2);
        assert_eq!(
            doc.row_errors,
            vec![RowError::FieldMismatch {
                line: 19,
                expected: 2,
                found: 1
            }]
        );
    }

    #[test]
    fn non_numeric_token_is_skipped_and_reported() {
        let text = MINIMAL.replace("1001.0  0.3", "1001.0  abc");
        let doc = parse_str(&text).unwrap();
        assert_eq!(doc.row_count(), 2);
        assert!(matches!(
            &doc.row_errors[0],
            RowError::InvalidNumber { column, raw, .. } if column == "SW" && raw == "abc"
        ));
    }

    #[test]
    fn missing_curve_section_is_fatal() {
        let text = "~V\n VERS. 2.0 :\n~W\n WELL. X :\n~A\n1 2\n";
        assert_eq!(
            parse_str(text).unwrap_err(),
            ParseError::MissingSection("CURVE".to_string())
        );
    }

    #[test]
    fn missing_ascii_section_is_fatal() {
        let text = "~V\n VERS. 2.0 :\n~C\n DEPT.M :\n";
        assert_eq!(
            parse_str(text).unwrap_err(),
            ParseError::MissingSection("ASCII".to_string())
        );
    }

    #[test]
    fn header_line_without_dot_is_fatal() {
        let text = "~V\n VERS 2.0\n~C\n DEPT.M :\n~A\n1\n";
        match parse_str(text).unwrap_err() {
            ParseError::MalformedHeader { section, line, .. } => {
                assert_eq!(section, "VERSION");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_curve_section_is_fatal() {
        let text = "~V\n VERS. 2.0 :\n~C\n~A\n1\n";
        assert!(matches!(
            parse_str(text).unwrap_err(),
            ParseError::MalformedHeader { section, .. } if section == "CURVE"
        ));
    }

    #[test]
    fn content_before_first_section_is_fatal() {
        let text = "garbage\n~C\n DEPT.M :\n~A\n1\n";
        assert!(matches!(
            parse_str(text).unwrap_err(),
            ParseError::MalformedHeader { line: 1, .. }
        ));
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let mut raw = b"~V\n VERS. 2.0 :\n~W\n WELL. ".to_vec();
        raw.push(0xE9);
        raw.extend_from_slice(b" :\n~C\n DEPT.M :\n~A\n1\n");
        assert!(matches!(parse(&raw), Err(ParseError::Encoding { .. })));

        let opts = ParseOptions {
            latin1_fallback: true,
            ..Default::default()
        };
        let doc = parse_with_options(&raw, &opts).unwrap();
        assert_eq!(doc.well_name(), Some("\u{e9}"));
    }

    #[test]
    fn utf8_bom_is_ignored() {
        let mut raw = b"\xEF\xBB\xBF".to_vec();
        raw.extend_from_slice(MINIMAL.as_bytes());
        let doc = parse(&raw).unwrap();
        assert_eq!(doc.row_count(), 3);
    }

    #[test]
    fn declared_null_value_is_used() {
        let text = MINIMAL.replace("-999.25 : NULL VALUE", "-9999 : NULL VALUE");
        let doc = parse_str(&text).unwrap();
        assert_eq!(doc.null_value, -9999.0);
    }

    #[test]
    fn null_value_override_wins() {
        let opts = ParseOptions {
            null_value: Some(-1.0),
            ..Default::default()
        };
        let doc = parse_str_with_options(MINIMAL, &opts).unwrap();
        assert_eq!(doc.null_value, -1.0);
    }

    #[test]
    fn non_numeric_null_is_fatal() {
        let text = MINIMAL.replace("-999.25 : NULL VALUE", "none : NULL VALUE");
        assert!(matches!(
            parse_str(&text).unwrap_err(),
            ParseError::MalformedHeader { section, .. } if section == "WELL"
        ));
    }

    #[test]
    fn wrapped_data_spans_lines() {
        let text = "\
~V
 VERS. 2.0 :
 WRAP. YES :
~C
 DEPT.M :
 A.   :
 B.   :
 C.   :
~A
1000.0
 1 2
 3
1000.5
 4 5 6
1001.0
 7
";
        let doc = parse_str(text).unwrap();
        assert!(doc.is_wrapped());
        assert_eq!(
            doc.rows,
            vec![vec![1000.0, 1.0, 2.0, 3.0], vec![1000.5, 4.0, 5.0, 6.0]]
        );
        assert_eq!(
            doc.row_errors,
            vec![RowError::FieldMismatch {
                line: 15,
                expected: 4,
                found: 2
            }]
        );
    }

    #[test]
    fn comments_and_unknown_sections_are_ignored() {
        let text = "\
# leading comment
~V
 VERS. 2.0 :
~Tops
 anything goes here
~C
 DEPT.M :
# comment inside curves
 GR.GAPI :
~A
# comment inside data
10 1
";
        let doc = parse_str(text).unwrap();
        assert_eq!(doc.curves.len(), 2);
        assert_eq!(doc.rows, vec![vec![10.0, 1.0]]);
    }
}
