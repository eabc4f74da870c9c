//! Ingestion summary and reporting
//!
//! This module defines structures for tracking and reporting ingestion results.

use super::writer::{EntityOutcome, RowOutcome};
use crate::adapters::database::{CoverageCounts, PincodeWrite};
use crate::domain::{PinloadError, RowErrorDetail, WriteError};
use std::path::PathBuf;
use std::time::Duration;

/// Summary of an ingestion run
#[derive(Debug, Clone, Default)]
pub struct IngestSummary {
    /// SHA-256 of the input file
    pub input_checksum: Option<String>,

    /// Number of sheets processed
    pub sheets_processed: usize,

    /// Number of data rows read
    pub rows_read: usize,

    /// Rows with every mapped cell blank
    pub blank_rows: usize,

    /// Rows that failed validation or writing
    pub failed_rows: usize,

    /// States inserted by this run
    pub states_created: usize,

    /// States already present in the store
    pub states_existing: usize,

    /// Cities inserted by this run
    pub cities_created: usize,

    /// Cities already present in the store
    pub cities_existing: usize,

    /// Pincodes inserted
    pub pincodes_inserted: usize,

    /// Pincodes re-pointed to a new city or cluster
    pub pincodes_updated: usize,

    /// Pincodes already present with the same mapping
    pub pincodes_unchanged: usize,

    /// Pincodes left untouched by the `keep_existing` policy
    pub pincodes_skipped: usize,

    /// Store totals after the run
    pub coverage: Option<CoverageCounts>,

    /// Where the report was written
    pub report_path: Option<PathBuf>,

    /// Duration of the run
    pub duration: Duration,

    /// Errors encountered during the run
    pub errors: Vec<IngestError>,

    /// Whether the run wrote to an in-memory store only
    pub dry_run: bool,

    /// Whether the run stopped on a shutdown signal
    pub interrupted: bool,
}

impl IngestSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: IngestError) {
        self.errors.push(error);
    }

    /// Count a persisted row
    pub fn record_row(&mut self, outcome: &RowOutcome) {
        match outcome.state {
            EntityOutcome::Created => self.states_created += 1,
            EntityOutcome::Existing => self.states_existing += 1,
            EntityOutcome::Resolved => {}
        }
        match outcome.city {
            EntityOutcome::Created => self.cities_created += 1,
            EntityOutcome::Existing => self.cities_existing += 1,
            EntityOutcome::Resolved => {}
        }
        match outcome.pincode {
            PincodeWrite::Inserted => self.pincodes_inserted += 1,
            PincodeWrite::Updated => self.pincodes_updated += 1,
            PincodeWrite::Unchanged => self.pincodes_unchanged += 1,
            PincodeWrite::Skipped => self.pincodes_skipped += 1,
        }
    }

    /// Count a failed row and keep its error
    pub fn record_failure(&mut self, detail: &RowErrorDetail, error: &PinloadError) {
        self.failed_rows += 1;
        self.add_error(IngestError::from_row(detail, error));
    }

    /// Rows written to the store
    pub fn rows_written(&self) -> usize {
        self.pincodes_inserted + self.pincodes_updated + self.pincodes_unchanged + self.pincodes_skipped
    }

    /// Check if the run completed with no failed rows
    pub fn is_successful(&self) -> bool {
        self.failed_rows == 0 && self.errors.is_empty() && !self.interrupted
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            sheets = self.sheets_processed,
            rows_read = self.rows_read,
            blank_rows = self.blank_rows,
            failed_rows = self.failed_rows,
            states_created = self.states_created,
            cities_created = self.cities_created,
            pincodes_inserted = self.pincodes_inserted,
            pincodes_updated = self.pincodes_updated,
            pincodes_unchanged = self.pincodes_unchanged,
            pincodes_skipped = self.pincodes_skipped,
            duration_ms = self.duration.as_millis(),
            dry_run = self.dry_run,
            "Ingestion summary"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Ingestion completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Ingestion error"
                );
            }
        }
    }
}

/// Type of ingestion error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestErrorType {
    /// Malformed or incomplete row
    Validation,
    /// Parent record missing
    ForeignKey,
    /// Pincode already mapped differently
    Conflict,
    /// Statement failure
    Write,
    /// Unknown error
    Unknown,
}

impl IngestErrorType {
    /// Classify a pipeline error
    pub fn classify(error: &PinloadError) -> Self {
        match error {
            PinloadError::Validation(_) => Self::Validation,
            PinloadError::Write(WriteError::ForeignKey(_)) => Self::ForeignKey,
            PinloadError::Write(WriteError::Conflict(_)) => Self::Conflict,
            PinloadError::Write(_) => Self::Write,
            _ => Self::Unknown,
        }
    }
}

/// Ingestion error with context
#[derive(Debug, Clone)]
pub struct IngestError {
    /// Type of error
    pub error_type: IngestErrorType,

    /// Error message
    pub message: String,

    /// Optional context (sheet, row, pincode)
    pub context: Option<String>,
}

impl IngestError {
    /// Create a new ingestion error
    pub fn new(error_type: IngestErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }

    /// Build from a failed row
    pub fn from_row(detail: &RowErrorDetail, error: &PinloadError) -> Self {
        let context = match &detail.pincode {
            Some(pincode) => format!("{} (pincode {})", detail.location(), pincode),
            None => detail.location(),
        };
        Self::new(IngestErrorType::classify(error), error.to_string()).with_context(context)
    }
}
