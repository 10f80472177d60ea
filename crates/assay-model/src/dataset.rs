//! Structured dataset built by the mapping engine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{DatasetId, ExperimentId, SeriesId};

/// One time/value curve belonging to an experiment.
///
/// Invariant: `time.len() == y.len()`. Points are appended in row-encounter
/// order; monotonicity is not enforced here, only checked by validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: SeriesId,
    pub name: String,
    pub time: Vec<f64>,
    pub y: Vec<f64>,
    pub meta: SeriesMeta,
}

impl Series {
    pub fn new(name: String, value_column: String, replicate: Option<String>) -> Self {
        Self {
            id: SeriesId::new(),
            name,
            time: Vec::new(),
            y: Vec::new(),
            meta: SeriesMeta {
                dropped_points: 0,
                value_column,
                replicate,
            },
        }
    }

    pub fn push_point(&mut self, time: f64, value: f64) {
        self.time.push(time);
        self.y.push(value);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Bookkeeping attached to a series during mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMeta {
    /// Value cells that failed numeric parsing and were dropped.
    pub dropped_points: usize,
    /// Header of the value column this series was built from.
    pub value_column: String,
    /// Replicate label, when a replicate column was mapped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicate: Option<String>,
}

/// Consistency record for one metadata column within an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaConsistency {
    /// True when all rows of the experiment agreed on one value.
    pub consistent: bool,
    /// Every distinct value seen, in first-seen order.
    pub distinct_values: Vec<String>,
}

/// A named group of series sharing metadata, derived from the optional
/// grouping column. One experiment per distinct label, first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    pub id: ExperimentId,
    pub name: String,
    pub series: Vec<Series>,
    /// Winning value per metadata column (most frequent, first-seen on tie).
    pub meta_raw: BTreeMap<String, String>,
    /// Full disagreement record per metadata column.
    pub meta_consistency: BTreeMap<String, MetaConsistency>,
}

impl Experiment {
    pub fn new(name: String) -> Self {
        Self {
            id: ExperimentId::new(),
            name,
            series: Vec::new(),
            meta_raw: BTreeMap::new(),
            meta_consistency: BTreeMap::new(),
        }
    }

    /// Total points across all series of this experiment.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    pub fn dropped_point_count(&self) -> usize {
        self.series.iter().map(|s| s.meta.dropped_points).sum()
    }
}

/// The full mapped dataset. Recomputed wholesale whenever its inputs
/// change; nothing is patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id: DatasetId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub experiments: Vec<Experiment>,
}

impl Dataset {
    pub fn new(name: String) -> Self {
        Self {
            id: DatasetId::new(),
            name,
            created_at: Utc::now(),
            experiments: Vec::new(),
        }
    }

    pub fn series_count(&self) -> usize {
        self.experiments.iter().map(|e| e.series.len()).sum()
    }

    pub fn point_count(&self) -> usize {
        self.experiments.iter().map(Experiment::point_count).sum()
    }

    pub fn dropped_point_count(&self) -> usize {
        self.experiments
            .iter()
            .map(Experiment::dropped_point_count)
            .sum()
    }
}
