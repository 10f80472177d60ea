//! Validation findings and the assembled quality report.
//!
//! Findings are data, not exceptions: every check always runs and reports
//! its outcome, and severity is the only signal callers use to gate
//! progression.

use serde::{Deserialize, Serialize};

use crate::ids::ExperimentId;

/// Severity of one finding.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

/// Closed set of rule codes the validation engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCode {
    TimeNotMonotonic,
    TimeDuplicates,
    TooFewPoints,
    NanOrNonnumeric,
    NegativeValues,
    ConstantSignal,
    NoExperiments,
}

/// Whether a finding concerns a single series or the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingScope {
    Dataset,
    Series,
}

/// Per-code numeric payloads attached to a finding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_name: Option<String>,
    /// Non-increasing time transitions (TIME_NOT_MONOTONIC).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_issue_count: Option<usize>,
    /// Repeated time values (TIME_DUPLICATES).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_count: Option<usize>,
    /// Points in the series (TOO_FEW_POINTS).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_count: Option<usize>,
    /// Dropped value cells (NAN_OR_NONNUMERIC).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped_count: Option<usize>,
    /// Negative signal values (NEGATIVE_VALUES).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_count: Option<usize>,
}

/// One validation rule's outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFinding {
    pub code: FindingCode,
    pub severity: Severity,
    pub scope: FindingScope,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FindingDetails>,
}

/// Coarse status derived from a set of findings by escalation.
///
/// Always derived, never stored by checks: any `error` finding makes the
/// scope `broken`, any finding at all makes it `needs-info`, otherwise
/// `clean`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Clean,
    NeedsInfo,
    Broken,
}

impl ReportStatus {
    /// Escalate a set of findings into a status.
    pub fn from_findings<'a, I>(findings: I) -> Self
    where
        I: IntoIterator<Item = &'a ValidationFinding>,
    {
        let mut status = ReportStatus::Clean;
        for finding in findings {
            if finding.severity == Severity::Error {
                return ReportStatus::Broken;
            }
            status = ReportStatus::NeedsInfo;
        }
        status
    }

    /// Worst of two statuses.
    pub fn combine(self, other: Self) -> Self {
        self.max(other)
    }
}

/// Plain sums across the dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCounts {
    pub experiments: usize,
    pub series: usize,
    pub points: usize,
    pub dropped_points: usize,
}

/// Findings and escalated status for one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentSummary {
    pub experiment_id: ExperimentId,
    pub status: ReportStatus,
    pub findings: Vec<ValidationFinding>,
}

/// The assembled data-quality report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub status: ReportStatus,
    pub counts: ReportCounts,
    pub dataset_findings: Vec<ValidationFinding>,
    pub experiment_summaries: Vec<ExperimentSummary>,
}

impl ValidationReport {
    /// Every finding in the report, dataset-level first.
    pub fn all_findings(&self) -> impl Iterator<Item = &ValidationFinding> {
        self.dataset_findings.iter().chain(
            self.experiment_summaries
                .iter()
                .flat_map(|summary| summary.findings.iter()),
        )
    }

    pub fn error_count(&self) -> usize {
        self.all_findings()
            .filter(|finding| finding.severity == Severity::Error)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity) -> ValidationFinding {
        ValidationFinding {
            code: FindingCode::NegativeValues,
            severity,
            scope: FindingScope::Series,
            title: "Negative values".to_string(),
            description: "2 negative signal values".to_string(),
            hint: None,
            details: None,
        }
    }

    #[test]
    fn escalation_orders_statuses() {
        assert!(ReportStatus::Clean < ReportStatus::NeedsInfo);
        assert!(ReportStatus::NeedsInfo < ReportStatus::Broken);
        assert_eq!(
            ReportStatus::Clean.combine(ReportStatus::Broken),
            ReportStatus::Broken
        );
    }

    #[test]
    fn info_findings_still_escalate_to_needs_info() {
        let findings = [finding(Severity::Info)];
        assert_eq!(
            ReportStatus::from_findings(findings.iter()),
            ReportStatus::NeedsInfo
        );
    }

    #[test]
    fn report_counts_errors_across_scopes() {
        let report = ValidationReport {
            status: ReportStatus::Broken,
            counts: ReportCounts::default(),
            dataset_findings: vec![finding(Severity::Error)],
            experiment_summaries: vec![ExperimentSummary {
                experiment_id: ExperimentId::new(),
                status: ReportStatus::NeedsInfo,
                findings: vec![finding(Severity::Warn)],
            }],
        };
        assert_eq!(report.all_findings().count(), 2);
        assert_eq!(report.error_count(), 1);
        assert!(report.has_errors());
    }
}
