pub mod dataset;
pub mod ids;
pub mod mapping;
pub mod report;
pub mod table;

pub use dataset::{Dataset, Experiment, MetaConsistency, Series, SeriesMeta};
pub use ids::{DatasetId, ExperimentId, SeriesId};
pub use mapping::{ColumnHint, MappingSelection, TimeUnit};
pub use report::{
    ExperimentSummary, FindingCode, FindingDetails, FindingScope, ReportCounts, ReportStatus,
    Severity, ValidationFinding, ValidationReport,
};
pub use table::{Cell, RawTable, parse_number};
