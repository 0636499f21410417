//! LAS (Log ASCII Standard) parsing.
//!
//! [`parse`] turns raw bytes into a [`crate::types::WellLogDocument`]. Structural problems
//! (missing `~CURVE`/`~ASCII`, unparseable header lines, undecodable bytes) abort with a
//! [`crate::error::ParseError`]; bad data rows are skipped and listed in
//! [`crate::types::WellLogDocument::row_errors`].

pub mod header;
pub mod parser;

pub use parser::{ParseOptions, parse, parse_str, parse_str_with_options, parse_with_options};
