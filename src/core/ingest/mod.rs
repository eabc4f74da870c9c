//! Ingestion orchestration
//!
//! - [`row`] - column layout and row validation
//! - [`writer`] - ordered State, City, Pincode writes
//! - [`coordinator`] - the end-to-end run
//! - [`summary`] - run counters and errors

pub mod coordinator;
pub mod row;
pub mod summary;
pub mod writer;

pub use coordinator::IngestCoordinator;
pub use row::{ColumnLayout, GeoRow};
pub use summary::{IngestError, IngestErrorType, IngestSummary};
pub use writer::{EntityOutcome, PersistenceWriter, RowOutcome};
