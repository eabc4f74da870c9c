//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the pinload configuration file.

use crate::cli::{EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::{load_config_or_default, redact_connection_string, DEFAULT_CONFIG_PATH};
use clap::Args;
use secrecy::ExposeSecret;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let shown_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        tracing::info!(config_path = %shown_path, "Validating configuration");

        println!("🔍 Validating configuration file: {shown_path}");
        println!();

        // Loading also validates
        let config = match load_config_or_default(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let columns = &config.input.columns;
        let sheets = if config.input.sheets.is_empty() {
            "all".to_string()
        } else {
            config.input.sheets.join(", ")
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Input File: {}", config.input.file_path);
        println!("  Sheets: {sheets}");
        println!("  Header Row: {}", config.input.header_row);
        println!(
            "  Columns: state={}, state_name={}, city={}, pincode={}, cluster={}",
            columns.state_code,
            columns.state_name.as_deref().unwrap_or("-"),
            columns.city,
            columns.pincode,
            columns.cluster
        );
        println!(
            "  PostgreSQL: {}",
            redact_connection_string(config.postgresql.connection_string.expose_secret().as_ref())
        );
        println!("  SSL Mode: {}", config.postgresql.ssl_mode);
        println!("  Max Connections: {}", config.postgresql.max_connections);
        println!("  Duplicate Policy: {}", config.ingest.duplicate_policy);
        println!("  On Row Error: {}", config.ingest.on_row_error);
        println!("  Create Schema: {}", config.ingest.create_schema);
        println!("  Report: {} (overwrite: {})", config.report.path, config.report.overwrite);
        println!();

        if !Path::new(&config.input.file_path).is_file() {
            println!(
                "⚠️  Input file does not exist yet: {}",
                config.input.file_path
            );
            println!();
        }

        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_validate_missing_file_is_config_error() {
        let code = ValidateArgs {}
            .execute(Some("definitely/not/here.toml"))
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }

    #[tokio::test]
    async fn test_validate_good_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[application]\ndry_run = true\n\n[input]\nfile_path = \"pins.xlsx\"\n"
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let code = ValidateArgs {}.execute(Some(&path)).await.unwrap();
        assert_eq!(code, EXIT_SUCCESS);
    }
}
