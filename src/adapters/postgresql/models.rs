//! PostgreSQL row models
//!
//! Typed views over the rows returned by the geo store queries.

use crate::adapters::database::traits::{ClusterCount, CoverageCounts, Upserted};
use crate::domain::{Result, WriteError};
use tokio_postgres::Row;
use uuid::Uuid;

/// Row returned by the insert-if-absent statements: `(id, created)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertRow {
    /// Identifier held by the table
    pub id: Uuid,

    /// True if the row was inserted by this statement
    pub created: bool,
}

impl UpsertRow {
    /// Reads the row
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: column(row, "id")?,
            created: column(row, "created")?,
        })
    }

    /// Converts into a typed upsert result
    pub fn into_upserted<T>(self, wrap: impl FnOnce(Uuid) -> T) -> Upserted<T> {
        Upserted {
            id: wrap(self.id),
            created: self.created,
        }
    }
}

/// Existing mapping of a pincode: `(city_id, cluster)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PincodeRow {
    /// Owning city
    pub city_id: Uuid,

    /// Cluster label
    pub cluster: String,
}

impl PincodeRow {
    /// Reads the row
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            city_id: column(row, "city_id")?,
            cluster: column(row, "cluster")?,
        })
    }
}

/// Reads the three table totals
pub fn coverage_from_row(row: &Row) -> Result<CoverageCounts> {
    let states: i64 = column(row, "states")?;
    let cities: i64 = column(row, "cities")?;
    let pincodes: i64 = column(row, "pincodes")?;
    Ok(CoverageCounts::known(
        states.max(0) as u64,
        cities.max(0) as u64,
        pincodes.max(0) as u64,
    ))
}

/// Reads one `(cluster, pincodes)` row
pub fn cluster_count_from_row(row: &Row) -> Result<ClusterCount> {
    let cluster: String = column(row, "cluster")?;
    let pincodes: i64 = column(row, "pincodes")?;
    Ok(ClusterCount {
        cluster,
        pincodes: pincodes.max(0) as u64,
    })
}

fn column<'a, T>(row: &'a Row, name: &str) -> Result<T>
where
    T: tokio_postgres::types::FromSql<'a>,
{
    row.try_get(name).map_err(|e| {
        WriteError::StatementFailed(format!("Failed to read column '{}': {}", name, e)).into()
    })
}
