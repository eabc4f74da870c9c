//! Geo store factory
//!
//! This module provides the factory function that creates a store based on
//! configuration.

use crate::adapters::database::traits::GeoStore;
use crate::adapters::memory::MemoryStore;
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::PinloadConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create a geo store based on the configuration
///
/// Dry runs get an empty in-memory store so that the whole pipeline runs
/// without touching the database. Otherwise a PostgreSQL store is created;
/// the pool connects lazily, so callers should follow up with
/// [`GeoStore::test_connection`].
///
/// # Errors
///
/// Returns an error if the PostgreSQL client cannot be created.
pub async fn create_store(config: &PinloadConfig) -> Result<Arc<dyn GeoStore>> {
    if config.application.dry_run {
        tracing::info!("DRY RUN: using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    tracing::info!(ssl_mode = %config.postgresql.ssl_mode, "Creating PostgreSQL store");
    let client = PostgreSQLClient::new(config.postgresql.clone()).await?;
    Ok(Arc::new(PostgreSQLAdapter::new(client)))
}
