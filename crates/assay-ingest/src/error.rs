//! Error types for tabular file ingestion.
//!
//! Every variant is a blocking configuration error: nothing here produces a
//! partially-built table.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while parsing a source file.
///
/// Serializable so the UI collaborator can show them as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ParseError {
    /// The file has no content at all.
    #[error("file is empty")]
    EmptyFile,

    /// The extension selects no known parser.
    #[error("unsupported file type: {extension:?}")]
    UnsupportedExtension { extension: String },

    /// The csv reader rejected the input.
    #[error("failed to parse CSV: {message}")]
    Csv { message: String },

    /// The workbook container could not be opened.
    #[error("failed to open workbook: {message}")]
    Workbook { message: String },

    /// A sheet in the workbook could not be read.
    #[error("failed to read sheet {sheet:?}: {message}")]
    Sheet { sheet: String, message: String },

    /// The workbook contains no sheets.
    #[error("workbook has no sheets")]
    NoSheets,

    /// A sheet produced no header row.
    #[error("sheet {sheet:?} has no header row")]
    NoHeaderRow { sheet: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ParseError::UnsupportedExtension {
            extension: "pdf".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported file type: \"pdf\"");
        assert_eq!(
            ParseError::NoHeaderRow {
                sheet: "Sheet1".to_string()
            }
            .to_string(),
            "sheet \"Sheet1\" has no header row"
        );
    }
}
