//! CSV parsing into a [`RawTable`].

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use assay_model::{Cell, RawTable};

use crate::error::{ParseError, Result};

/// Options for CSV parsing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvOptions {
    /// Treat the first row as headers. When false, headers are synthesized
    /// as `Column 1..N` and the first row becomes data.
    pub header_row: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { header_row: true }
    }
}

/// Pick the delimiter from the first non-blank line: more semicolons than
/// commas selects `;`, any tie or comma-majority selects `,`.
pub fn detect_delimiter(text: &str) -> u8 {
    let probe = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");
    let semicolons = probe.matches(';').count();
    let commas = probe.matches(',').count();
    if semicolons > commas { b';' } else { b',' }
}

/// Parse decoded CSV text into a single table.
///
/// Quoted fields are supported, including embedded delimiters and escaped
/// quotes. Fully blank lines are skipped. Fails without partial output on
/// empty input or a malformed record.
pub fn parse_csv(text: &str, options: CsvOptions) -> Result<RawTable> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyFile);
    }
    let delimiter = detect_delimiter(text);
    tracing::debug!(
        delimiter = %char::from(delimiter),
        header_row = options.header_row,
        "parsing csv"
    );

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| ParseError::Csv {
            message: err.to_string(),
        })?;
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(ParseError::EmptyFile);
    }

    let (headers, data_rows) = if options.header_row {
        let header_row = rows.remove(0);
        (header_row, rows)
    } else {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        (RawTable::synthesized_headers(width), rows)
    };

    let cells = data_rows
        .into_iter()
        .map(|row| row.iter().map(|value| Cell::coerce(value)).collect())
        .collect();
    Ok(RawTable::new(headers, cells, None))
}
