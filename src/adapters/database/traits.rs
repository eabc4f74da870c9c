//! Database abstraction traits
//!
//! This module defines the trait that geo stores must implement to receive
//! ingested states, cities and pincodes.

use crate::config::DuplicatePolicy;
use crate::domain::{City, CityId, PincodeRecord, Result, State, StateId};
use async_trait::async_trait;
use serde::Serialize;

/// Result of an insert-if-absent operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upserted<T> {
    /// Identifier held by the store after the call
    pub id: T,

    /// True if this call created the record
    pub created: bool,
}

impl<T> Upserted<T> {
    /// A record created by this call
    pub fn created(id: T) -> Self {
        Self { id, created: true }
    }

    /// A record that already existed
    pub fn existing(id: T) -> Self {
        Self { id, created: false }
    }
}

/// Outcome of writing one pincode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PincodeWrite {
    /// A new pincode row was inserted
    Inserted,
    /// An existing pincode was re-pointed to a new city or cluster
    Updated,
    /// The pincode already existed with the same mapping
    Unchanged,
    /// The pincode already existed and was left as is (`keep_existing`)
    Skipped,
}

/// Total rows per table
///
/// `None` means the count could not be obtained; the report renders it as
/// `N/A`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoverageCounts {
    /// Number of states
    pub states: Option<u64>,

    /// Number of cities
    pub cities: Option<u64>,

    /// Number of pincodes
    pub pincodes: Option<u64>,
}

impl CoverageCounts {
    /// Counts with every value known
    pub fn known(states: u64, cities: u64, pincodes: u64) -> Self {
        Self {
            states: Some(states),
            cities: Some(cities),
            pincodes: Some(pincodes),
        }
    }

    /// Counts with every value unavailable
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// Number of pincodes assigned to a cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterCount {
    /// Cluster label
    pub cluster: String,

    /// Number of pincodes in the cluster
    pub pincodes: u64,
}

/// Geo store trait
///
/// Implementations must enforce the ownership chain: a city may only
/// reference an existing state and a pincode may only reference an existing
/// city.
#[async_trait]
pub trait GeoStore: Send + Sync {
    /// Test the store connection
    ///
    /// # Errors
    ///
    /// Returns `WriteError::ConnectionFailed` if the store is unreachable.
    async fn test_connection(&self) -> Result<()>;

    /// Create tables and indexes if they do not exist
    async fn ensure_schema(&self) -> Result<()>;

    /// Insert a state unless one with the same code exists
    ///
    /// Existing states are never modified. The returned id is the one the
    /// store holds for the code, which differs from `state.id` when the
    /// state already existed.
    async fn upsert_state(&self, state: &State) -> Result<Upserted<StateId>>;

    /// Insert a city unless one with the same (state, name) exists
    ///
    /// # Errors
    ///
    /// Returns `WriteError::ForeignKey` if the owning state does not exist.
    async fn upsert_city(&self, city: &City) -> Result<Upserted<CityId>>;

    /// Write a pincode according to the duplicate policy
    ///
    /// # Errors
    ///
    /// Returns `WriteError::ForeignKey` if the owning city does not exist and
    /// `WriteError::Conflict` when `policy` is `Reject` and the pincode is
    /// already mapped differently.
    async fn write_pincode(
        &self,
        record: &PincodeRecord,
        policy: DuplicatePolicy,
    ) -> Result<PincodeWrite>;

    /// Count states, cities and pincodes
    async fn coverage_counts(&self) -> Result<CoverageCounts>;

    /// Count pincodes per cluster, ordered by cluster label
    async fn cluster_breakdown(&self) -> Result<Vec<ClusterCount>>;

    /// Short name of the backend for logs
    fn store_name(&self) -> &str;
}
