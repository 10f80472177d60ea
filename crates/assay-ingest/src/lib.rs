//! Tabular file ingestion.
//!
//! Turns decoded CSV text or an XLSX buffer into immutable
//! [`RawTable`](assay_model::RawTable)s. The extension selects the parser;
//! anything else is rejected up front. No I/O happens here: the caller
//! reads the file and hands over its content.

pub mod csv;
pub mod error;
pub mod hints;
pub mod xlsx;

use std::path::Path;

pub use self::csv::{CsvOptions, detect_delimiter, parse_csv};
pub use error::{ParseError, Result};
pub use hints::build_column_hints;
pub use xlsx::{ParsedTables, parse_xlsx};

/// Parse a source file's bytes, dispatching on the file extension.
///
/// CSV input is decoded as UTF-8 (lossily, so stray bytes degrade to
/// replacement characters instead of failing the whole import).
pub fn parse_bytes(file_name: &str, bytes: &[u8], options: CsvOptions) -> Result<ParsedTables> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("csv") => {
            let text = String::from_utf8_lossy(bytes);
            Ok(ParsedTables::single(parse_csv(&text, options)?))
        }
        Some("xlsx") => parse_xlsx(bytes),
        other => Err(ParseError::UnsupportedExtension {
            extension: other.unwrap_or("").to_string(),
        }),
    }
}
