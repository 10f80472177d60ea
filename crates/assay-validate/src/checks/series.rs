//! Per-series rule checks.

use std::collections::BTreeSet;

use assay_model::{
    FindingCode, FindingDetails, FindingScope, Series, Severity, ValidationFinding,
};

/// Series shorter than this are flagged as too thin to fit.
const MIN_SERIES_POINTS: usize = 5;

/// Population standard deviation at or below this counts as constant.
const CONSTANT_SIGNAL_STDDEV: f64 = 1e-6;

/// Run every per-series check, in a fixed order.
pub fn run(series: &Series) -> Vec<ValidationFinding> {
    [
        check_time_monotonic(series),
        check_time_duplicates(series),
        check_too_few_points(series),
        check_dropped_points(series),
        check_negative_values(series),
        check_constant_signal(series),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn base_details(series: &Series) -> FindingDetails {
    FindingDetails {
        series_name: Some(series.name.clone()),
        ..FindingDetails::default()
    }
}

fn check_time_monotonic(series: &Series) -> Option<ValidationFinding> {
    let transitions = series
        .time
        .windows(2)
        .filter(|pair| pair[1] <= pair[0])
        .count();
    if transitions == 0 {
        return None;
    }
    Some(ValidationFinding {
        code: FindingCode::TimeNotMonotonic,
        severity: Severity::Error,
        scope: FindingScope::Series,
        title: "Time axis is not monotonic".to_string(),
        description: format!(
            "Series {:?} has {transitions} non-increasing time transition(s)",
            series.name
        ),
        hint: Some(
            "Check the time column mapping and unit; rows may be out of order or duplicated"
                .to_string(),
        ),
        details: Some(FindingDetails {
            time_issue_count: Some(transitions),
            ..base_details(series)
        }),
    })
}

fn check_time_duplicates(series: &Series) -> Option<ValidationFinding> {
    let unique: BTreeSet<u64> = series.time.iter().map(|t| t.to_bits()).collect();
    let duplicates = series.time.len() - unique.len();
    if duplicates == 0 {
        return None;
    }
    Some(ValidationFinding {
        code: FindingCode::TimeDuplicates,
        severity: Severity::Warn,
        scope: FindingScope::Series,
        title: "Duplicate time values".to_string(),
        description: format!(
            "Series {:?} has {duplicates} repeated time value(s)",
            series.name
        ),
        hint: Some("Replicate measurements may be missing a replicate column".to_string()),
        details: Some(FindingDetails {
            duplicate_count: Some(duplicates),
            ..base_details(series)
        }),
    })
}

fn check_too_few_points(series: &Series) -> Option<ValidationFinding> {
    let points = series.len();
    if points >= MIN_SERIES_POINTS {
        return None;
    }
    Some(ValidationFinding {
        code: FindingCode::TooFewPoints,
        severity: Severity::Warn,
        scope: FindingScope::Series,
        title: "Too few points".to_string(),
        description: format!(
            "Series {:?} has only {points} point(s); at least {MIN_SERIES_POINTS} are needed \
             for a meaningful fit",
            series.name
        ),
        hint: None,
        details: Some(FindingDetails {
            point_count: Some(points),
            ..base_details(series)
        }),
    })
}

fn check_dropped_points(series: &Series) -> Option<ValidationFinding> {
    let dropped = series.meta.dropped_points;
    if dropped == 0 {
        return None;
    }
    Some(ValidationFinding {
        code: FindingCode::NanOrNonnumeric,
        severity: Severity::Warn,
        scope: FindingScope::Series,
        title: "Non-numeric values dropped".to_string(),
        description: format!(
            "Series {:?} dropped {dropped} value cell(s) that did not parse as numbers",
            series.name
        ),
        hint: Some("Inspect the value column for text markers like 'OVRFLW' or '--'".to_string()),
        details: Some(FindingDetails {
            dropped_count: Some(dropped),
            ..base_details(series)
        }),
    })
}

fn check_negative_values(series: &Series) -> Option<ValidationFinding> {
    let negatives = series.y.iter().filter(|value| **value < 0.0).count();
    if negatives == 0 {
        return None;
    }
    Some(ValidationFinding {
        code: FindingCode::NegativeValues,
        severity: Severity::Info,
        scope: FindingScope::Series,
        title: "Negative signal values".to_string(),
        description: format!(
            "Series {:?} has {negatives} negative value(s)",
            series.name
        ),
        hint: Some("Expected for baseline-subtracted signals; otherwise check the export".to_string()),
        details: Some(FindingDetails {
            negative_count: Some(negatives),
            ..base_details(series)
        }),
    })
}

fn check_constant_signal(series: &Series) -> Option<ValidationFinding> {
    if series.len() < 2 {
        return None;
    }
    let n = series.y.len() as f64;
    let mean = series.y.iter().sum::<f64>() / n;
    let variance = series
        .y
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / n;
    if variance.sqrt() > CONSTANT_SIGNAL_STDDEV {
        return None;
    }
    Some(ValidationFinding {
        code: FindingCode::ConstantSignal,
        severity: Severity::Info,
        scope: FindingScope::Series,
        title: "Constant signal".to_string(),
        description: format!(
            "Series {:?} barely changes over its {} point(s)",
            series.name,
            series.len()
        ),
        hint: Some("A flat trace usually means a blank well or a wrong value column".to_string()),
        details: Some(base_details(series)),
    })
}
