//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for pinload using clap.

pub mod commands;

use crate::domain::{PinloadError, WriteError};
use clap::{Parser, Subcommand};

/// Exit code for a clean run
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when rows were skipped
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code when the input file is missing
pub const EXIT_INPUT_NOT_FOUND: i32 = 3;
/// Exit code for database connection errors
pub const EXIT_CONNECTION: i32 = 4;
/// Exit code for any other fatal error
pub const EXIT_FATAL: i32 = 5;
/// Exit code after a shutdown signal
pub const EXIT_INTERRUPTED: i32 = 130;

/// pinload - Pincode to cluster spreadsheet loader
#[derive(Parser, Debug)]
#[command(name = "pinload")]
#[command(version, about, long_about = None)]
#[command(author = "pinload Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to pinload.toml when present)
    #[arg(short, long, env = "PINLOAD_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PINLOAD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to `ingest`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the spreadsheet into the database and write the coverage report
    Ingest(commands::ingest::IngestArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show database totals and pincodes per cluster
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Maps an error onto the process exit code
pub fn exit_code_for(error: &PinloadError) -> i32 {
    match error {
        PinloadError::Configuration(_) => EXIT_CONFIG,
        PinloadError::InputNotFound(_) => EXIT_INPUT_NOT_FOUND,
        PinloadError::Write(WriteError::ConnectionFailed(_) | WriteError::SchemaFailed(_)) => {
            EXIT_CONNECTION
        }
        _ => EXIT_FATAL,
    }
}
