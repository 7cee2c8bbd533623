//! # Error Types
//!
//! Structured error types for loadgen_core. Only two things can stop a
//! conversion: a header row that does not name every required column, and the
//! file operations around it (reading the workbook, writing the artifacts).
//! Cells that are not numbers never produce an error; see
//! [`crate::sacs::fields`].
//!
//! ## Example
//!
//! ```rust
//! use loadgen_core::errors::{GenError, GenResult};
//!
//! fn require_sheet(names: &[String], wanted: &str) -> GenResult<usize> {
//!     names
//!         .iter()
//!         .position(|n| n == wanted)
//!         .ok_or_else(|| GenError::sheet_not_found(wanted, names.to_vec()))
//! }
//!
//! let names = vec!["Loads".to_string()];
//! assert!(require_sheet(&names, "Loads").is_ok());
//! assert_eq!(
//!     require_sheet(&names, "Sheet9").unwrap_err().error_code(),
//!     "SHEET_NOT_FOUND"
//! );
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for loadgen_core operations
pub type GenResult<T> = Result<T, GenError>;

/// Structured error type for load generation.
///
/// Each variant carries enough context to tell the user which column, sheet
/// or file was the problem.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum GenError {
    /// No header column contains every keyword for a required field
    #[error("Column not found matching: {}", .keywords.join(" + "))]
    ColumnNotFound {
        /// Semantic field that failed to resolve (e.g. "Load Condition")
        field: String,
        /// Normalized keywords that had to appear in a single header
        keywords: Vec<String>,
    },

    /// The workbook has no sheets, or the selected sheet has no header row
    #[error("Workbook '{path}' has no data to convert")]
    EmptyWorkbook { path: String },

    /// The requested worksheet does not exist
    #[error("Sheet not found: '{sheet}' (available: {})", .available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    /// Spreadsheet could not be opened or decoded
    #[error("Workbook error: '{path}' - {reason}")]
    WorkbookError { path: String, reason: String },

    /// An input value is invalid (bad settings, empty keyword list, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl GenError {
    /// Create a ColumnNotFound error
    pub fn column_not_found(field: impl Into<String>, keywords: Vec<String>) -> Self {
        GenError::ColumnNotFound {
            field: field.into(),
            keywords,
        }
    }

    /// Create a SheetNotFound error
    pub fn sheet_not_found(sheet: impl Into<String>, available: Vec<String>) -> Self {
        GenError::SheetNotFound {
            sheet: sheet.into(),
            available,
        }
    }

    /// Create a WorkbookError
    pub fn workbook_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        GenError::WorkbookError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        GenError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        GenError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether fixing the workbook's header row or sheet choice would help
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GenError::ColumnNotFound { .. } | GenError::SheetNotFound { .. } | GenError::EmptyWorkbook { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            GenError::ColumnNotFound { .. } => "COLUMN_NOT_FOUND",
            GenError::EmptyWorkbook { .. } => "EMPTY_WORKBOOK",
            GenError::SheetNotFound { .. } => "SHEET_NOT_FOUND",
            GenError::WorkbookError { .. } => "WORKBOOK_ERROR",
            GenError::InvalidInput { .. } => "INVALID_INPUT",
            GenError::FileError { .. } => "FILE_ERROR",
            GenError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_not_found_message() {
        let error = GenError::column_not_found(
            "Load Condition",
            vec!["load".to_string(), "condition".to_string()],
        );
        assert_eq!(error.to_string(), "Column not found matching: load + condition");
    }

    #[test]
    fn test_error_serialization() {
        let error = GenError::column_not_found("Force X", vec!["force(x)".to_string()]);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"ColumnNotFound\""));
        let roundtrip: GenError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            GenError::sheet_not_found("Loads", vec![]).error_code(),
            "SHEET_NOT_FOUND"
        );
        assert_eq!(GenError::file_error("write", "a.txt", "denied").error_code(), "FILE_ERROR");
        assert!(GenError::column_not_found("Joint Name", vec![]).is_input_error());
        assert!(!GenError::file_error("write", "a.txt", "denied").is_input_error());
    }
}
