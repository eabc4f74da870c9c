//! Logging and observability
//!
//! Structured logging with:
//! - Configurable log levels (`--log-level`, `RUST_LOG`)
//! - Console output on stderr
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use pinload::logging::init_logging;
//! use pinload::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an ingestion run
///
/// # Example
///
/// ```no_run
/// use pinload::log_ingest_start;
///
/// log_ingest_start!("pincodes_clusters.xlsx", false);
/// ```
#[macro_export]
macro_rules! log_ingest_start {
    ($file:expr, $dry_run:expr) => {
        tracing::info!(
            file = %$file,
            dry_run = $dry_run,
            "Starting ingestion"
        );
    };
}

/// Log the completion of an ingestion run
///
/// # Example
///
/// ```no_run
/// use pinload::log_ingest_complete;
/// use std::time::Duration;
///
/// log_ingest_complete!(42, Duration::from_secs(3));
/// ```
#[macro_export]
macro_rules! log_ingest_complete {
    ($rows:expr, $duration:expr) => {
        tracing::info!(
            rows = $rows,
            duration_ms = $duration.as_millis(),
            "Ingestion completed"
        );
    };
}

/// Log the start of a sheet
///
/// # Example
///
/// ```no_run
/// use pinload::log_sheet_processing;
///
/// log_sheet_processing!("Sheet1", 1, 3, 120);
/// ```
#[macro_export]
macro_rules! log_sheet_processing {
    ($sheet:expr, $current:expr, $total:expr, $rows:expr) => {
        tracing::info!(
            sheet = %$sheet,
            current = $current,
            total = $total,
            rows = $rows,
            "Processing sheet"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use pinload::log_error_with_context;
/// use pinload::domain::PinloadError;
///
/// let error = PinloadError::Validation("blank city".to_string());
/// log_error_with_context!(&error, "Sheet1!12");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}
