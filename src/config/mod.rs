//! Configuration management for pinload.
//!
//! Configuration is read from a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PINLOAD_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level and dry-run mode
//! - [`InputConfig`] - spreadsheet path, sheet filter, header row and [`ColumnConfig`]
//! - [`PostgreSQLConfig`] - connection string and pool settings
//! - [`IngestConfig`] - duplicate and row-error policies
//! - [`ReportConfig`] - report path and overwrite flag
//! - [`LoggingConfig`] - optional file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [input]
//! file_path = "pincodes_clusters.xlsx"
//!
//! [postgresql]
//! connection_string = "${PINLOAD_DATABASE_URL}"
//!
//! [ingest]
//! duplicate_policy = "upsert"
//! on_row_error = "abort"
//!
//! [report]
//! path = "coverage_report.md"
//! overwrite = true
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_or_default, parse_config, DEFAULT_CONFIG_PATH};
pub use schema::{
    ApplicationConfig, ColumnConfig, DuplicatePolicy, IngestConfig, InputConfig, LoggingConfig,
    PinloadConfig, PostgreSQLConfig, ReportConfig, RowErrorPolicy,
};
pub use secret::{redact_connection_string, secret_string, SecretString, SecretValue};
