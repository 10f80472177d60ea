//! Blocking configuration errors for mapping selections.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One reason a selection cannot produce a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SelectionError {
    #[error("no time column selected")]
    MissingTimeColumn,

    #[error("no value columns selected")]
    NoValueColumns,

    #[error("column index {index} is out of range for a table with {width} columns")]
    ColumnOutOfRange { index: usize, width: usize },
}

/// Every blocking error found in one selection, reported together so the
/// caller can surface all of them at once.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("invalid mapping selection: {} error(s)", .0.len())]
pub struct SelectionErrors(pub Vec<SelectionError>);

impl SelectionErrors {
    pub fn iter(&self) -> impl Iterator<Item = &SelectionError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
