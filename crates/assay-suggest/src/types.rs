//! Advisory request/response payloads.
//!
//! These are the only shapes that cross the advisory boundary. Whatever
//! produces them — the built-in heuristics or an external model — the
//! caller treats them as text suggestions: nothing here is merged into a
//! dataset without passing the deterministic acceptance checks first.

use serde::{Deserialize, Serialize};

/// Role a column can play in a mapping selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Time,
    Value,
    Experiment,
    Replicate,
}

/// One suggested role for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRoleSuggestion {
    pub column_index: usize,
    pub header: String,
    pub role: ColumnRole,
    /// 0.0 to 1.0; the caller decides what to surface.
    pub confidence: f32,
}

/// Request for canonical grouping of one column's raw values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingRequest {
    pub column: String,
    pub raw_values: Vec<String>,
}

/// One canonical label and the raw values it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalGroup {
    pub label: String,
    pub members: Vec<String>,
}

/// A suggested partition of raw values into canonical groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingSuggestion {
    pub groups: Vec<CanonicalGroup>,
}
