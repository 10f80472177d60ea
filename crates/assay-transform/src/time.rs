//! Time-axis normalization.
//!
//! Converts a raw time column into elapsed seconds. A column is either
//! `numeric` (scaled by a unit factor), `datetime` (made relative to the
//! first encountered timestamp), or `invalid`. The whole module is pure:
//! identical inputs always give identical output.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use assay_model::{Cell, TimeUnit};

/// Numeric time values above this magnitude with a fractional part look
/// like spreadsheet date serials rather than true elapsed time.
const EXCEL_SERIAL_THRESHOLD: f64 = 1e4;

/// Detected type of a time column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeKind {
    Numeric,
    Datetime,
    Invalid,
}

/// A normalized time column, aligned index-for-index with the input rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeColumn {
    pub kind: TimeKind,
    /// Elapsed seconds per row; `None` where the cell did not yield a time.
    pub seconds: Vec<Option<f64>>,
    /// First encountered timestamp for datetime columns, for display.
    pub reference: Option<NaiveDateTime>,
    /// Row indices whose numeric value looks like an Excel date serial.
    /// Informational only; the normalized output is unaltered.
    pub serial_suspects: Vec<usize>,
}

/// Normalize a raw time column into elapsed seconds.
///
/// Numeric columns are scaled by `declared_unit` when present, otherwise
/// by the caller-selected `selected_unit`. Datetime columns are made
/// relative to the first encountered timestamp (not the minimum). A
/// column that is neither is `invalid` and yields no time for any row.
pub fn normalize_time_column(
    cells: &[&Cell],
    declared_unit: Option<TimeUnit>,
    selected_unit: TimeUnit,
) -> TimeColumn {
    match detect_time_kind(cells) {
        TimeKind::Numeric => normalize_numeric(cells, declared_unit.unwrap_or(selected_unit)),
        TimeKind::Datetime => normalize_datetime(cells),
        TimeKind::Invalid => TimeColumn {
            kind: TimeKind::Invalid,
            seconds: vec![None; cells.len()],
            reference: None,
            serial_suspects: Vec::new(),
        },
    }
}

/// Classify a time column.
///
/// Every populated cell numeric means `numeric`; otherwise every populated
/// cell must parse as a datetime for `datetime` — a single unparsable
/// value makes the whole column `invalid`.
fn detect_time_kind(cells: &[&Cell]) -> TimeKind {
    let populated: Vec<&Cell> = cells.iter().copied().filter(|c| !c.is_null()).collect();
    if populated.is_empty() {
        return TimeKind::Invalid;
    }
    if populated.iter().all(|cell| cell.as_number().is_some()) {
        return TimeKind::Numeric;
    }
    let all_datetimes = populated.iter().all(|cell| match cell {
        Cell::Text(text) => parse_datetime(text).is_some(),
        _ => false,
    });
    if all_datetimes {
        TimeKind::Datetime
    } else {
        TimeKind::Invalid
    }
}

fn normalize_numeric(cells: &[&Cell], unit: TimeUnit) -> TimeColumn {
    let factor = unit.factor();
    let mut seconds = Vec::with_capacity(cells.len());
    let mut serial_suspects = Vec::new();
    for (idx, cell) in cells.iter().enumerate() {
        match cell.as_number() {
            Some(value) => {
                if value.abs() > EXCEL_SERIAL_THRESHOLD && value.fract() != 0.0 {
                    serial_suspects.push(idx);
                }
                seconds.push(Some(value * factor));
            }
            None => seconds.push(None),
        }
    }
    TimeColumn {
        kind: TimeKind::Numeric,
        seconds,
        reference: None,
        serial_suspects,
    }
}

fn normalize_datetime(cells: &[&Cell]) -> TimeColumn {
    let mut seconds = Vec::with_capacity(cells.len());
    let mut reference: Option<i64> = None;
    let mut reference_dt = None;
    for cell in cells {
        let parsed = match cell {
            Cell::Text(text) => parse_datetime(text),
            _ => None,
        };
        match parsed {
            Some(dt) => {
                let micros = dt.and_utc().timestamp_micros();
                let base = *reference.get_or_insert(micros);
                if reference_dt.is_none() {
                    reference_dt = Some(dt);
                }
                seconds.push(Some((micros - base) as f64 / 1_000_000.0));
            }
            None => seconds.push(None),
        }
    }
    TimeColumn {
        kind: TimeKind::Datetime,
        seconds,
        reference: reference_dt,
        serial_suspects: Vec::new(),
    }
}

/// Parse a timestamp from the formats seen in instrument exports.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Offset-carrying timestamps are normalized to UTC.
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
        "%d-%b-%Y %H:%M",
        "%d/%m/%Y %H:%M:%S", // European
        "%d/%m/%Y %H:%M",
        "%m/%d/%Y %H:%M:%S", // US
        "%m/%d/%Y %H:%M",
        "%d.%m.%Y %H:%M:%S",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    const DATE_FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d-%b-%Y", // 15-Jan-2024
        "%d/%m/%Y",
        "%m/%d/%Y",
        "%d.%m.%Y",
    ];
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }

    // Plate readers often log wall-clock only; anchor those at the epoch
    // day so differences still come out right.
    const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S"];
    for fmt in TIME_FORMATS {
        if let Ok(t) = NaiveTime::parse_from_str(trimmed, fmt) {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
            return Some(epoch.and_time(t));
        }
    }

    None
}
