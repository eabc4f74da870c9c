//! External system integrations for pinload.
//!
//! - [`spreadsheet`] - Workbook reading (calamine)
//! - [`database`] - Geo store abstraction (trait-based)
//! - [`postgresql`] - PostgreSQL implementation
//! - [`memory`] - In-memory implementation for dry runs and tests
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind the [`database::GeoStore`]
//! trait, so the ingestion pipeline can be exercised against
//! [`memory::MemoryStore`] without a database:
//!
//! ```rust
//! use pinload::adapters::database::GeoStore;
//! use pinload::adapters::memory::MemoryStore;
//! use pinload::domain::{State, StateCode};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! let state = State::new(StateCode::new("MH")?, Some("Maharashtra"));
//! let upserted = store.upsert_state(&state).await?;
//! assert!(upserted.created);
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod memory;
pub mod postgresql;
pub mod spreadsheet;
