//! Output types of a mapping run.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use assay_model::Dataset;
use assay_transform::TimeKind;

/// Offending row indices kept verbatim before rolling into a bare count.
pub const MAX_REPORTED_ROWS: usize = 5;

/// Counts produced by one mapping run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingStats {
    pub experiment_count: usize,
    pub series_count: usize,
    pub point_count: usize,
}

/// Rows discarded wholesale because their time cell did not parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowErrors {
    /// Total discarded rows.
    pub count: usize,
    /// The first few offending rows, 1-based, in encounter order.
    pub first_rows: Vec<usize>,
}

impl RowErrors {
    pub fn record(&mut self, row: usize) {
        self.count += 1;
        if self.first_rows.len() < MAX_REPORTED_ROWS {
            self.first_rows.push(row);
        }
    }

    /// Discarded rows beyond the ones reported verbatim.
    pub fn overflow(&self) -> usize {
        self.count - self.first_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Everything one mapping run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingOutcome {
    pub dataset: Dataset,
    pub stats: MappingStats,
    pub row_errors: RowErrors,
    /// Detected type of the time column.
    pub time_kind: TimeKind,
    /// Reference timestamp for datetime time columns, for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_reference: Option<NaiveDateTime>,
    /// 1-based rows whose numeric time value looks like an Excel date
    /// serial. Informational only.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub serial_suspect_rows: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_errors_cap_reported_indices() {
        let mut errors = RowErrors::default();
        for row in 1..=8 {
            errors.record(row);
        }
        assert_eq!(errors.count, 8);
        assert_eq!(errors.first_rows, vec![1, 2, 3, 4, 5]);
        assert_eq!(errors.overflow(), 3);
    }
}
