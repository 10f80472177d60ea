//! XLSX workbook parsing into one [`RawTable`] per sheet.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use assay_model::{Cell, RawTable};

use crate::error::{ParseError, Result};

/// All tables parsed from one source file. The first sheet is nominated
/// active; the caller is free to switch.
#[derive(Debug, Clone)]
pub struct ParsedTables {
    pub tables: Vec<RawTable>,
    pub active: usize,
}

impl ParsedTables {
    pub fn single(table: RawTable) -> Self {
        Self {
            tables: vec![table],
            active: 0,
        }
    }

    pub fn active_table(&self) -> Option<&RawTable> {
        self.tables.get(self.active)
    }
}

/// Parse an XLSX buffer. Every sheet becomes a table: row 0 is the header
/// row, numbers pass through, dates and booleans are coerced to strings.
/// Fails without partial output on an unreadable workbook, zero sheets, or
/// a sheet with no header-producing row.
pub fn parse_xlsx(bytes: &[u8]) -> Result<ParsedTables> {
    if bytes.is_empty() {
        return Err(ParseError::EmptyFile);
    }
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|err| ParseError::Workbook {
            message: err.to_string(),
        })?;
    let sheet_names: Vec<String> = workbook.sheet_names().to_owned();
    if sheet_names.is_empty() {
        return Err(ParseError::NoSheets);
    }
    tracing::debug!(sheets = sheet_names.len(), "parsing workbook");

    let mut tables = Vec::with_capacity(sheet_names.len());
    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|err| ParseError::Sheet {
                sheet: name.clone(),
                message: err.to_string(),
            })?;
        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Err(ParseError::NoHeaderRow {
                sheet: name.clone(),
            });
        };
        let headers: Vec<String> = header_row.iter().map(header_text).collect();
        let cells: Vec<Vec<Cell>> = rows
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();
        tables.push(RawTable::new(headers, cells, Some(name.clone())));
    }
    Ok(ParsedTables { tables, active: 0 })
}

/// Convert one sheet cell. Numbers pass through unchanged; dates are
/// rendered so the time normalizer can re-parse them; booleans and error
/// markers become text.
fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Null,
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::String(text) => Cell::coerce(text),
        Data::Bool(value) => Cell::Text(value.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Cell::Text(naive.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::coerce(text),
        Data::Error(err) => Cell::Text(format!("{err}")),
    }
}

fn header_text(data: &Data) -> String {
    convert_cell(data).render().unwrap_or_default()
}
