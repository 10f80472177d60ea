//! Mapping engine: raw tables plus a user's column selection into
//! structured datasets.
//!
//! Re-applying the same (table, selection) pair is idempotent up to
//! generated IDs; everything user-observable about the output ordering is
//! stable run-to-run.

pub mod engine;
pub mod error;
mod metadata;
pub mod types;

pub use engine::{MappingContext, UNLABELED_EXPERIMENT, apply_selection, validate_selection};
pub use error::{SelectionError, SelectionErrors};
pub use types::{MAX_REPORTED_ROWS, MappingOutcome, MappingStats, RowErrors};
