// pinload - Pincode to Cluster Spreadsheet Loader
// Copyright (c) 2025 pinload Contributors
// Licensed under the MIT License

//! # pinload - Pincode to Cluster Spreadsheet Loader
//!
//! pinload reads a spreadsheet that maps postal codes (pincodes) to cities,
//! states and delivery clusters, loads it into PostgreSQL, and writes a
//! Markdown coverage report.
//!
//! ## Overview
//!
//! One linear pipeline:
//! - **Locate** the configured spreadsheet (nothing runs if it is missing)
//! - **Read** every sheet into memory
//! - **Resolve** states and cities to identifiers, once per natural key
//! - **Persist** State, City, Pincode rows in dependency order
//! - **Report** the store totals
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (locate, resolve, ingest, report)
//! - [`adapters`] - External integrations (spreadsheets, PostgreSQL)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pinload::config::load_config_or_default;
//! use pinload::core::ingest::IngestCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default(None)?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let coordinator = IngestCoordinator::new(config, shutdown_rx);
//!
//!     let summary = coordinator.execute().await?;
//!     println!("Loaded {} pincodes", summary.pincodes_inserted);
//!     Ok(())
//! }
//! ```
//!
//! ## Dry Runs and Tests
//!
//! The pipeline writes through the [`adapters::database::GeoStore`] trait.
//! Dry runs and tests use [`adapters::memory::MemoryStore`], which enforces
//! the same uniqueness and foreign-key rules as the PostgreSQL schema:
//!
//! ```rust,no_run
//! use pinload::adapters::memory::MemoryStore;
//! use pinload::config::PinloadConfig;
//! use pinload::core::ingest::IngestCoordinator;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = PinloadConfig::default();
//! config.input.file_path = "fixtures/pincodes.xlsx".to_string();
//!
//! let store = Arc::new(MemoryStore::new());
//! let (_tx, rx) = tokio::sync::watch::channel(false);
//! let summary = IngestCoordinator::new(config, rx)
//!     .with_store(store.clone())
//!     .execute()
//!     .await?;
//!
//! assert_eq!(store.pincodes().len(), summary.pincodes_inserted);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All library functions return [`domain::Result`], whose error type
//! [`domain::PinloadError`] separates a missing input file, spreadsheet read
//! failures, and database write failures.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
