//! Parsed tabular file content prior to semantic column mapping.

use serde::{Deserialize, Serialize};

/// A single table cell after coercion.
///
/// Serialized untagged so a cell round-trips as plain JSON
/// `string | number | null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Coerce a raw string into a cell.
    ///
    /// Trims whitespace and BOM markers; empty input becomes [`Cell::Null`],
    /// locale-tolerant numerics become [`Cell::Number`], everything else is
    /// kept as trimmed text. Coercion is idempotent: re-coercing the rendered
    /// form of a number yields the same number.
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim().trim_matches('\u{feff}').trim();
        if trimmed.is_empty() {
            return Cell::Null;
        }
        match parse_number(trimmed) {
            Some(value) => Cell::Number(value),
            None => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Numeric view of the cell, if it holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Display form of the cell; `None` for null cells.
    pub fn render(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Number(value) => Some(format!("{value}")),
            Cell::Text(text) => Some(text.clone()),
        }
    }
}

/// Parse a numeric literal with an optional `,` decimal separator.
///
/// Accepts an optional sign, integer digits, an optional `.` or `,` decimal
/// part, and an optional exponent. A comma decimal is normalized to `.`
/// before parsing, so `"1,5"` parses as `1.5`.
pub fn parse_number(text: &str) -> Option<f64> {
    if !matches_numeric(text) {
        return None;
    }
    let normalized = text.replace(',', ".");
    normalized.parse::<f64>().ok()
}

fn matches_numeric(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut idx = 0;
    if matches!(bytes.first().copied(), Some(b'+') | Some(b'-')) {
        idx += 1;
    }
    let digits_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    if idx == digits_start {
        return false;
    }
    if idx < bytes.len() && (bytes[idx] == b'.' || bytes[idx] == b',') {
        idx += 1;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }
    }
    if idx < bytes.len() && (bytes[idx] == b'e' || bytes[idx] == b'E') {
        idx += 1;
        if idx < bytes.len() && (bytes[idx] == b'+' || bytes[idx] == b'-') {
            idx += 1;
        }
        let exponent_start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }
        if idx == exponent_start {
            return false;
        }
    }
    idx == bytes.len()
}

/// One parsed sheet: headers plus fixed-width rows of coerced cells.
///
/// Immutable once constructed. Every row has exactly `headers.len()` cells;
/// short rows are padded with nulls and long rows truncated at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
}

impl RawTable {
    /// Build a table, enforcing the fixed-width invariant and replacing
    /// blank headers with `"Column N"` (1-based).
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>, sheet_name: Option<String>) -> Self {
        let headers = fill_blank_headers(headers);
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.truncate(width);
                row.resize(width, Cell::Null);
                row
            })
            .collect();
        Self {
            headers,
            rows,
            sheet_name,
        }
    }

    /// Synthesized headers `Column 1..=width` for header-less input.
    pub fn synthesized_headers(width: usize) -> Vec<String> {
        (1..=width).map(|n| format!("Column {n}")).collect()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn header(&self, index: usize) -> Option<&str> {
        self.headers.get(index).map(String::as_str)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, index: usize) -> Vec<&Cell> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index))
            .collect()
    }
}

fn fill_blank_headers(headers: Vec<String>) -> Vec<String> {
    headers
        .into_iter()
        .enumerate()
        .map(|(idx, header)| {
            let trimmed = header.trim().trim_matches('\u{feff}').trim();
            if trimmed.is_empty() {
                format!("Column {}", idx + 1)
            } else {
                trimmed.to_string()
            }
        })
        .collect()
}
