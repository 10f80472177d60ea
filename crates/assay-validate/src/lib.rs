//! Rule-based data-quality validation.
//!
//! Runs the fixed check battery over a mapped dataset and assembles a
//! report with escalated statuses. Findings are data, not exceptions;
//! every check always runs, and severity is the only gating signal.

pub mod checks;

use assay_model::{
    Dataset, ExperimentSummary, ReportCounts, ReportStatus, ValidationReport,
};

/// Validate a dataset and assemble the full report.
///
/// Per-experiment status escalates from that experiment's own findings;
/// the overall status escalates from the dataset-level findings plus every
/// experiment's findings. Counts are plain sums.
pub fn validate_dataset(dataset: &Dataset) -> ValidationReport {
    let dataset_findings = checks::dataset::run(dataset);
    let mut status = ReportStatus::from_findings(&dataset_findings);

    let mut experiment_summaries = Vec::with_capacity(dataset.experiments.len());
    for experiment in &dataset.experiments {
        let mut findings = Vec::new();
        for series in &experiment.series {
            findings.extend(checks::series::run(series));
        }
        let experiment_status = ReportStatus::from_findings(&findings);
        status = status.combine(experiment_status);
        experiment_summaries.push(ExperimentSummary {
            experiment_id: experiment.id,
            status: experiment_status,
            findings,
        });
    }

    let counts = ReportCounts {
        experiments: dataset.experiments.len(),
        series: dataset.series_count(),
        points: dataset.point_count(),
        dropped_points: dataset.dropped_point_count(),
    };
    tracing::debug!(
        status = ?status,
        experiments = counts.experiments,
        series = counts.series,
        points = counts.points,
        "dataset validated"
    );

    ValidationReport {
        status,
        counts,
        dataset_findings,
        experiment_summaries,
    }
}
