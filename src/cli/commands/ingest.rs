//! Ingest command implementation
//!
//! This module implements the `ingest` command, which runs the full pipeline
//! and is also what runs when no command is given.

use crate::cli::{
    exit_code_for, EXIT_CONFIG, EXIT_INTERRUPTED, EXIT_PARTIAL, EXIT_SUCCESS,
};
use crate::config::{load_config_or_default, DuplicatePolicy, PinloadConfig, RowErrorPolicy};
use crate::core::ingest::{IngestCoordinator, IngestSummary};
use crate::domain::PinloadError;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the ingest command
#[derive(Args, Debug, Default)]
pub struct IngestArgs {
    /// Override the spreadsheet path
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// Override the coverage report path
    #[arg(short, long, value_name = "PATH")]
    pub report: Option<String>,

    /// Fail instead of replacing an existing report
    #[arg(long)]
    pub no_overwrite: bool,

    /// Dry run mode - resolve every row without writing to the database
    #[arg(long)]
    pub dry_run: bool,

    /// Override the duplicate pincode policy (upsert, keep_existing, reject)
    #[arg(long, value_name = "POLICY")]
    pub duplicate_policy: Option<DuplicatePolicy>,

    /// Override the row error policy (abort, skip)
    #[arg(long, value_name = "POLICY")]
    pub on_row_error: Option<RowErrorPolicy>,

    /// Only read the named sheet (repeatable)
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheets: Vec<String>,
}

impl IngestArgs {
    /// Apply CLI overrides on top of loaded configuration
    pub fn apply_overrides(&self, config: &mut PinloadConfig) {
        if let Some(file) = &self.file {
            tracing::info!(file = %file, "Overriding input file from CLI");
            config.input.file_path = file.clone();
        }
        if let Some(report) = &self.report {
            tracing::info!(report = %report, "Overriding report path from CLI");
            config.report.path = report.clone();
        }
        if self.no_overwrite {
            config.report.overwrite = false;
        }
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
        if let Some(policy) = self.duplicate_policy {
            config.ingest.duplicate_policy = policy;
        }
        if let Some(policy) = self.on_row_error {
            config.ingest.on_row_error = policy;
        }
        if !self.sheets.is_empty() {
            config.input.sheets = self.sheets.clone();
        }
    }

    /// Execute the ingest command
    pub async fn execute(
        &self,
        config_path: Option<&str>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting ingest command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("❌ Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - No data will be written to the database");
            println!();
        }

        println!("🚀 Loading {}", config.input.file_path);
        println!();

        let coordinator = IngestCoordinator::new(config, shutdown_signal);
        let summary = match coordinator.execute().await {
            Ok(s) => s,
            Err(e) => {
                print_failure(&e);
                return Ok(exit_code_for(&e));
            }
        };

        print_summary(&summary);
        Ok(summary_exit_code(&summary))
    }
}

fn print_failure(error: &PinloadError) {
    match error {
        PinloadError::InputNotFound(path) => {
            eprintln!("❌ Input file not found: {}", path.display());
            eprintln!("   Check input.file_path or pass --file");
        }
        PinloadError::Write(e) if error.is_connection_error() => {
            eprintln!("❌ Could not connect to the database");
            eprintln!("   Error: {e}");
        }
        PinloadError::Read(e) => {
            eprintln!("❌ Failed to read spreadsheet");
            eprintln!("   Error: {e}");
        }
        other => {
            eprintln!("❌ Ingestion failed");
            eprintln!("   Error: {other}");
        }
    }
}

fn print_summary(summary: &IngestSummary) {
    println!();
    println!("📊 Ingestion Summary:");
    println!("  Sheets: {}", summary.sheets_processed);
    println!("  Rows Read: {}", summary.rows_read);
    println!("  Blank Rows: {}", summary.blank_rows);
    println!("  Failed Rows: {}", summary.failed_rows);
    println!(
        "  States: {} created, {} existing",
        summary.states_created, summary.states_existing
    );
    println!(
        "  Cities: {} created, {} existing",
        summary.cities_created, summary.cities_existing
    );
    println!(
        "  Pincodes: {} inserted, {} updated, {} unchanged, {} skipped",
        summary.pincodes_inserted,
        summary.pincodes_updated,
        summary.pincodes_unchanged,
        summary.pincodes_skipped
    );
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    if let Some(checksum) = &summary.input_checksum {
        println!("  Input SHA-256: {checksum}");
    }
    if let Some(path) = &summary.report_path {
        println!("  Report: {}", path.display());
    }
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Skipped rows:");
        for error in summary.errors.iter().take(20) {
            let context = error.context.as_deref().unwrap_or("-");
            println!("  - {context} {:?}: {}", error.error_type, error.message);
        }
        if summary.errors.len() > 20 {
            println!("  ... and {} more", summary.errors.len() - 20);
        }
        println!();
    }
}

fn summary_exit_code(summary: &IngestSummary) -> i32 {
    if summary.interrupted {
        println!("⚠️  Ingestion interrupted. No report was written.");
        println!("   Rows already written are kept; re-running is safe.");
        tracing::info!("Ingestion interrupted by user signal");
        EXIT_INTERRUPTED
    } else if summary.failed_rows > 0 {
        println!("⚠️  Ingestion completed with skipped rows");
        EXIT_PARTIAL
    } else {
        println!("✅ Ingestion completed successfully!");
        EXIT_SUCCESS
    }
}
