//! Dataset-level rule checks.

use assay_model::{
    Dataset, FindingCode, FindingScope, Severity, ValidationFinding,
};

/// Run every dataset-level check.
pub fn run(dataset: &Dataset) -> Vec<ValidationFinding> {
    check_no_experiments(dataset).into_iter().collect()
}

fn check_no_experiments(dataset: &Dataset) -> Option<ValidationFinding> {
    if !dataset.experiments.is_empty() {
        return None;
    }
    Some(ValidationFinding {
        code: FindingCode::NoExperiments,
        severity: Severity::Error,
        scope: FindingScope::Dataset,
        title: "No experiments".to_string(),
        description: "The mapping produced no experiments at all".to_string(),
        hint: Some(
            "Usually every row was discarded because the time column did not parse".to_string(),
        ),
        details: None,
    })
}
