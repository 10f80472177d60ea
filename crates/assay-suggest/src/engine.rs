//! Heuristic column-role suggestions.
//!
//! Scores every column for every role from its header name and profiling
//! hints, and keeps the best role per column above a floor. Purely
//! deterministic; the caller still sets the actual selection.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use assay_model::ColumnHint;

use crate::types::{ColumnRole, ColumnRoleSuggestion};

/// Minimum confidence to include a suggestion at all.
const MIN_CONFIDENCE: f32 = 0.5;
/// Exact header-name match.
const NAME_EXACT_SCORE: f32 = 0.6;
/// Header contains a role keyword.
const NAME_PARTIAL_SCORE: f32 = 0.4;
/// Hint profile agrees with the role.
const PROFILE_SCORE: f32 = 0.35;
/// Grouping-like columns repeat values heavily.
const GROUPING_UNIQUE_RATIO_MAX: f64 = 0.5;

const TIME_NAMES: &[&str] = &["time", "t", "zeit", "tiempo", "temps", "elapsed", "timestamp"];
const VALUE_NAMES: &[&str] = &[
    "value", "signal", "od", "od600", "abs", "absorbance", "fluorescence", "intensity",
    "response", "conc", "concentration", "rfu", "rlu",
];
const EXPERIMENT_NAMES: &[&str] = &[
    "experiment", "exp", "sample", "group", "condition", "treatment", "label", "strain",
];
const REPLICATE_NAMES: &[&str] = &["replicate", "rep", "well", "run", "repeat"];

/// Suggest one role per column, strongest first.
pub fn suggest_column_roles(
    headers: &[String],
    hints: &BTreeMap<String, ColumnHint>,
) -> Vec<ColumnRoleSuggestion> {
    let mut suggestions: Vec<ColumnRoleSuggestion> = Vec::new();
    for (column_index, header) in headers.iter().enumerate() {
        let hint = hints.get(header);
        let candidates = [
            (ColumnRole::Time, score_time(header, hint)),
            (ColumnRole::Value, score_value(header, hint)),
            (ColumnRole::Experiment, score_experiment(header, hint)),
            (ColumnRole::Replicate, score_replicate(header, hint)),
        ];
        let best = candidates
            .into_iter()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        if let Some((role, confidence)) = best
            && confidence >= MIN_CONFIDENCE
        {
            suggestions.push(ColumnRoleSuggestion {
                column_index,
                header: header.clone(),
                role,
                confidence: confidence.min(1.0),
            });
        }
    }
    suggestions.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then(a.column_index.cmp(&b.column_index))
    });
    suggestions
}

fn name_score(header: &str, names: &[&str]) -> f32 {
    let normalized = header.trim().to_lowercase();
    if names.iter().any(|name| normalized == *name) {
        return NAME_EXACT_SCORE;
    }
    // Single-letter keywords only count as exact matches; "t" appearing
    // inside "treatment" means nothing.
    if names
        .iter()
        .filter(|name| name.len() > 1)
        .any(|name| normalized.contains(name))
    {
        return NAME_PARTIAL_SCORE;
    }
    0.0
}

fn score_time(header: &str, hint: Option<&ColumnHint>) -> f32 {
    let mut score = name_score(header, TIME_NAMES);
    if let Some(hint) = hint
        && hint.is_numeric
        && score > 0.0
    {
        score += PROFILE_SCORE;
    }
    score
}

fn score_value(header: &str, hint: Option<&ColumnHint>) -> f32 {
    let mut score = name_score(header, VALUE_NAMES);
    if let Some(hint) = hint
        && hint.is_numeric
    {
        score += PROFILE_SCORE;
    }
    // A numeric column that also names a time axis is a time column.
    if name_score(header, TIME_NAMES) > 0.0 {
        score = 0.0;
    }
    score
}

fn score_experiment(header: &str, hint: Option<&ColumnHint>) -> f32 {
    let mut score = name_score(header, EXPERIMENT_NAMES);
    if let Some(hint) = hint
        && !hint.is_numeric
        && hint.unique_ratio <= GROUPING_UNIQUE_RATIO_MAX
    {
        score += PROFILE_SCORE;
    }
    score
}

fn score_replicate(header: &str, hint: Option<&ColumnHint>) -> f32 {
    let mut score = name_score(header, REPLICATE_NAMES);
    if let Some(hint) = hint
        && hint.unique_ratio <= GROUPING_UNIQUE_RATIO_MAX
        && score > 0.0
    {
        score += PROFILE_SCORE;
    }
    score
}
