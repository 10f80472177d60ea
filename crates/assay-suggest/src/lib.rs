//! Advisory boundary for mapping assistance.
//!
//! Everything here is advisory: column-role suggestions rank candidates
//! for the user, and grouping suggestions — whether from the built-in
//! heuristics or an external model — only ever enter a dataset after the
//! deterministic [`verify_exact_cover`] gate accepts them.

pub mod engine;
pub mod exact_cover;
pub mod types;

pub use engine::suggest_column_roles;
pub use exact_cover::{CoverError, verify_exact_cover};
pub use types::{
    CanonicalGroup, ColumnRole, ColumnRoleSuggestion, GroupingRequest, GroupingSuggestion,
};
