//! The fixed battery of rule checks.
//!
//! Each check is a pure function returning at most one finding. All checks
//! run unconditionally and independently; nothing is deduplicated or
//! suppressed between them.

pub mod dataset;
pub mod series;
