//! Core business logic for pinload.
//!
//! # Modules
//!
//! - [`locate`] - Input file check, the first stage of every run
//! - [`resolve`] - State and city deduplication within a run
//! - [`ingest`] - Row extraction, persistence and orchestration
//! - [`report`] - Markdown coverage report
//!
//! # Ingestion Workflow
//!
//! 1. **Locate**: Confirm the spreadsheet exists
//! 2. **Read**: Load every sheet into memory
//! 3. **Resolve**: Map state codes and city names to identifiers
//! 4. **Persist**: Write State, City, Pincode for each row
//! 5. **Report**: Count store totals and write the coverage report
//!
//! # Example
//!
//! ```rust,no_run
//! use pinload::config::load_config;
//! use pinload::core::ingest::IngestCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("pinload.toml")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = IngestCoordinator::new(config, shutdown_rx);
//!
//! let summary = coordinator.execute().await?;
//! println!("Rows read: {}", summary.rows_read);
//! println!("Pincodes inserted: {}", summary.pincodes_inserted);
//! # Ok(())
//! # }
//! ```

pub mod ingest;
pub mod locate;
pub mod report;
pub mod resolve;
