//! Domain error types
//!
//! This module defines the error hierarchy for pinload. The taxonomy keeps
//! the three failure families of an ingestion run apart: the input file is
//! missing, the spreadsheet cannot be read, or the store cannot be written.
//! None of the variants expose third-party error types.

use std::path::PathBuf;
use thiserror::Error;

/// Main pinload error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum PinloadError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The configured spreadsheet does not exist
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Spreadsheet read failures
    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    /// Store write failures
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// Malformed row values
    #[error("Validation error: {0}")]
    Validation(String),

    /// Coverage report could not be written
    #[error("Report error: {0}")]
    Report(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl PinloadError {
    /// Returns true if the error came from the store connection itself
    /// rather than from a single statement.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, PinloadError::Write(WriteError::ConnectionFailed(_)))
    }
}

/// Spreadsheet read errors
#[derive(Debug, Error)]
pub enum ReadError {
    /// The workbook could not be opened or parsed
    #[error("Failed to open workbook {path}: {message}")]
    OpenFailed { path: String, message: String },

    /// The workbook contains no sheets
    #[error("Workbook has no sheets: {0}")]
    NoSheets(String),

    /// A sheet named in the configuration does not exist
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// A sheet exists but its cells could not be loaded
    #[error("Failed to read sheet '{sheet}': {message}")]
    SheetFailed { sheet: String, message: String },

    /// A required column header is absent from a sheet
    #[error("Sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },
}

/// Store write errors
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to connect to the store
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Schema creation failed
    #[error("Failed to initialize schema: {0}")]
    SchemaFailed(String),

    /// A statement failed
    #[error("Statement failed: {0}")]
    StatementFailed(String),

    /// A record referenced a parent that does not exist
    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    /// A pincode already exists with a different mapping
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Row-level error detail
///
/// Identifies the spreadsheet position of a failed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowErrorDetail {
    /// Sheet name
    pub sheet: String,

    /// 1-based spreadsheet row number
    pub row: usize,

    /// Pincode on the row, if one could be read
    pub pincode: Option<String>,

    /// Error message
    pub message: String,
}

impl RowErrorDetail {
    /// Creates a new row error detail
    pub fn new(sheet: impl Into<String>, row: usize, message: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            row,
            pincode: None,
            message: message.into(),
        }
    }

    /// Sets the pincode
    pub fn with_pincode(mut self, pincode: impl Into<String>) -> Self {
        self.pincode = Some(pincode.into());
        self
    }

    /// Formats the location as `sheet!row`
    pub fn location(&self) -> String {
        format!("{}!{}", self.sheet, self.row)
    }
}

impl From<std::io::Error> for PinloadError {
    fn from(err: std::io::Error) -> Self {
        PinloadError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for PinloadError {
    fn from(err: toml::de::Error) -> Self {
        PinloadError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinload_error_display() {
        let err = PinloadError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_input_not_found_display() {
        let err = PinloadError::InputNotFound(PathBuf::from("data/pincodes.xlsx"));
        assert_eq!(err.to_string(), "Input file not found: data/pincodes.xlsx");
    }

    #[test]
    fn test_read_error_conversion() {
        let read_err = ReadError::SheetNotFound("Sheet9".to_string());
        let err: PinloadError = read_err.into();
        assert!(matches!(err, PinloadError::Read(_)));
        assert_eq!(err.to_string(), "Read error: Sheet not found: Sheet9");
    }

    #[test]
    fn test_write_error_conversion() {
        let write_err = WriteError::Conflict("pincode 411001".to_string());
        let err: PinloadError = write_err.into();
        assert!(matches!(err, PinloadError::Write(WriteError::Conflict(_))));
        assert!(!err.is_connection_error());
    }

    #[test]
    fn test_connection_error_detection() {
        let err: PinloadError = WriteError::ConnectionFailed("refused".to_string()).into();
        assert!(err.is_connection_error());
    }

    #[test]
    fn test_missing_column_display() {
        let err = ReadError::MissingColumn {
            sheet: "North".to_string(),
            column: "Pincode".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Sheet 'North' is missing required column 'Pincode'"
        );
    }

    #[test]
    fn test_row_error_detail_builder() {
        let detail = RowErrorDetail::new("Sheet1", 7, "blank city").with_pincode("411001");

        assert_eq!(detail.sheet, "Sheet1");
        assert_eq!(detail.row, 7);
        assert_eq!(detail.pincode, Some("411001".to_string()));
        assert_eq!(detail.location(), "Sheet1!7");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PinloadError = io_err.into();
        assert!(matches!(err, PinloadError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: PinloadError = toml_err.into();
        assert!(matches!(err, PinloadError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let _: &dyn std::error::Error = &PinloadError::Validation("x".to_string());
        let _: &dyn std::error::Error = &ReadError::NoSheets("x".to_string());
        let _: &dyn std::error::Error = &WriteError::SchemaFailed("x".to_string());
    }
}
