//! Database abstraction layer
//!
//! This module provides a trait-based abstraction over the geo store, so the
//! ingestion pipeline can write to PostgreSQL or to an in-memory store.

pub mod factory;
pub mod traits;

pub use factory::create_store;
pub use traits::{ClusterCount, CoverageCounts, GeoStore, PincodeWrite, Upserted};
