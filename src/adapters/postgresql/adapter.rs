//! PostgreSQL adapter implementing the geo store trait

use crate::adapters::database::traits::{
    ClusterCount, CoverageCounts, GeoStore, PincodeWrite, Upserted,
};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{
    cluster_count_from_row, coverage_from_row, PincodeRow, UpsertRow,
};
use crate::config::DuplicatePolicy;
use crate::domain::{City, CityId, PincodeRecord, Result, State, StateId, WriteError};
use async_trait::async_trait;
use std::sync::Arc;

const UPSERT_STATE: &str = r#"
    WITH inserted AS (
        INSERT INTO states (id, code, name)
        VALUES ($1, $2, $3)
        ON CONFLICT (code) DO NOTHING
        RETURNING id
    )
    SELECT id, TRUE AS created FROM inserted
    UNION ALL
    SELECT id, FALSE AS created FROM states WHERE code = $2
    LIMIT 1
"#;

const UPSERT_CITY: &str = r#"
    WITH inserted AS (
        INSERT INTO cities (id, state_id, name, name_key)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (state_id, name_key) DO NOTHING
        RETURNING id
    )
    SELECT id, TRUE AS created FROM inserted
    UNION ALL
    SELECT id, FALSE AS created FROM cities WHERE state_id = $2 AND name_key = $4
    LIMIT 1
"#;

const UPSERT_PINCODE: &str = r#"
    INSERT INTO pincodes (pincode, city_id, cluster)
    VALUES ($1, $2, $3)
    ON CONFLICT (pincode) DO UPDATE
        SET city_id = EXCLUDED.city_id,
            cluster = EXCLUDED.cluster,
            updated_at = now()
        WHERE pincodes.city_id IS DISTINCT FROM EXCLUDED.city_id
           OR pincodes.cluster IS DISTINCT FROM EXCLUDED.cluster
    RETURNING (xmax = 0) AS inserted
"#;

const INSERT_PINCODE_IF_ABSENT: &str = r#"
    INSERT INTO pincodes (pincode, city_id, cluster)
    VALUES ($1, $2, $3)
    ON CONFLICT (pincode) DO NOTHING
    RETURNING pincode
"#;

const SELECT_PINCODE: &str = "SELECT city_id, cluster FROM pincodes WHERE pincode = $1";

const COVERAGE_COUNTS: &str = r#"
    SELECT
        (SELECT COUNT(*) FROM states) AS states,
        (SELECT COUNT(*) FROM cities) AS cities,
        (SELECT COUNT(*) FROM pincodes) AS pincodes
"#;

const CLUSTER_BREAKDOWN: &str = r#"
    SELECT cluster, COUNT(*) AS pincodes
    FROM pincodes
    GROUP BY cluster
    ORDER BY cluster
"#;

/// PostgreSQL implementation of [`GeoStore`]
///
/// Every write is a single statement, so each row commits on its own and a
/// later failure never rolls back earlier rows.
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    async fn insert_if_absent(&self, record: &PincodeRecord) -> Result<Option<PincodeRow>> {
        let inserted = self
            .client
            .query(
                INSERT_PINCODE_IF_ABSENT,
                &[
                    &record.pincode.as_str(),
                    record.city_id.as_uuid(),
                    &record.cluster.as_str(),
                ],
            )
            .await?;
        if !inserted.is_empty() {
            return Ok(None);
        }

        let rows = self
            .client
            .query(SELECT_PINCODE, &[&record.pincode.as_str()])
            .await?;
        let row = rows.first().ok_or_else(|| {
            WriteError::StatementFailed(format!(
                "pincode {} vanished between insert and read",
                record.pincode
            ))
        })?;
        Ok(Some(PincodeRow::from_row(row)?))
    }
}

#[async_trait]
impl GeoStore for PostgreSQLAdapter {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.client.ensure_schema().await
    }

    async fn upsert_state(&self, state: &State) -> Result<Upserted<StateId>> {
        let rows = self
            .client
            .query(
                UPSERT_STATE,
                &[state.id.as_uuid(), &state.code.as_str(), &state.name],
            )
            .await?;
        let row = rows.first().ok_or_else(|| {
            WriteError::StatementFailed(format!("state {} was neither inserted nor found", state.code))
        })?;

        let upserted = UpsertRow::from_row(row)?.into_upserted(StateId::from_uuid);
        tracing::trace!(code = %state.code, created = upserted.created, "State upserted");
        Ok(upserted)
    }

    async fn upsert_city(&self, city: &City) -> Result<Upserted<CityId>> {
        let rows = self
            .client
            .query(
                UPSERT_CITY,
                &[
                    city.id.as_uuid(),
                    city.state_id.as_uuid(),
                    &city.name.as_str(),
                    &city.name.key(),
                ],
            )
            .await?;
        let row = rows.first().ok_or_else(|| {
            WriteError::StatementFailed(format!("city {} was neither inserted nor found", city.name))
        })?;

        let upserted = UpsertRow::from_row(row)?.into_upserted(CityId::from_uuid);
        tracing::trace!(city = %city.name, created = upserted.created, "City upserted");
        Ok(upserted)
    }

    async fn write_pincode(
        &self,
        record: &PincodeRecord,
        policy: DuplicatePolicy,
    ) -> Result<PincodeWrite> {
        if policy == DuplicatePolicy::Upsert {
            let rows = self
                .client
                .query(
                    UPSERT_PINCODE,
                    &[
                        &record.pincode.as_str(),
                        record.city_id.as_uuid(),
                        &record.cluster.as_str(),
                    ],
                )
                .await?;

            // No row back means the conflict matched an identical mapping.
            return match rows.first() {
                None => Ok(PincodeWrite::Unchanged),
                Some(row) => {
                    let inserted: bool = row.try_get("inserted").map_err(|e| {
                        WriteError::StatementFailed(format!("Failed to read upsert result: {}", e))
                    })?;
                    Ok(if inserted {
                        PincodeWrite::Inserted
                    } else {
                        PincodeWrite::Updated
                    })
                }
            };
        }

        let Some(existing) = self.insert_if_absent(record).await? else {
            return Ok(PincodeWrite::Inserted);
        };

        if existing.city_id == *record.city_id.as_uuid()
            && existing.cluster == record.cluster.as_str()
        {
            return Ok(PincodeWrite::Unchanged);
        }

        match policy {
            DuplicatePolicy::Reject => Err(WriteError::Conflict(format!(
                "pincode {} is already mapped to cluster '{}'",
                record.pincode, existing.cluster
            ))
            .into()),
            _ => Ok(PincodeWrite::Skipped),
        }
    }

    async fn coverage_counts(&self) -> Result<CoverageCounts> {
        let rows = self.client.query(COVERAGE_COUNTS, &[]).await?;
        match rows.first() {
            Some(row) => coverage_from_row(row),
            None => Ok(CoverageCounts::unavailable()),
        }
    }

    async fn cluster_breakdown(&self) -> Result<Vec<ClusterCount>> {
        let rows = self.client.query(CLUSTER_BREAKDOWN, &[]).await?;
        rows.iter().map(cluster_count_from_row).collect()
    }

    fn store_name(&self) -> &str {
        "postgresql"
    }
}
