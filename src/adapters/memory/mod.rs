//! In-memory geo store
//!
//! Used for dry runs (resolve and count without touching the database) and
//! by tests. Enforces the same uniqueness and foreign-key rules as the
//! PostgreSQL schema.

use crate::adapters::database::traits::{
    ClusterCount, CoverageCounts, GeoStore, PincodeWrite, Upserted,
};
use crate::config::DuplicatePolicy;
use crate::domain::{
    City, CityId, Pincode, PincodeRecord, PinloadError, Result, State, StateCode, StateId,
    WriteError,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tables {
    states: HashMap<StateCode, State>,
    cities: HashMap<(StateId, String), City>,
    city_ids: HashMap<CityId, (StateId, String)>,
    pincodes: BTreeMap<Pincode, PincodeRecord>,
}

/// Geo store held in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| {
            PinloadError::Write(WriteError::StatementFailed(
                "memory store lock poisoned".to_string(),
            ))
        })
    }

    /// Snapshot of all states, ordered by code
    pub fn states(&self) -> Vec<State> {
        let Ok(tables) = self.lock() else {
            return Vec::new();
        };
        let mut states: Vec<State> = tables.states.values().cloned().collect();
        states.sort_by(|a, b| a.code.cmp(&b.code));
        states
    }

    /// Snapshot of all cities, ordered by name
    pub fn cities(&self) -> Vec<City> {
        let Ok(tables) = self.lock() else {
            return Vec::new();
        };
        let mut cities: Vec<City> = tables.cities.values().cloned().collect();
        cities.sort_by(|a, b| a.name.key().cmp(b.name.key()));
        cities
    }

    /// Snapshot of all pincodes, ordered by pincode
    pub fn pincodes(&self) -> Vec<PincodeRecord> {
        let Ok(tables) = self.lock() else {
            return Vec::new();
        };
        tables.pincodes.values().cloned().collect()
    }
}

#[async_trait]
impl GeoStore for MemoryStore {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn upsert_state(&self, state: &State) -> Result<Upserted<StateId>> {
        let mut tables = self.lock()?;
        if let Some(existing) = tables.states.get(&state.code) {
            return Ok(Upserted::existing(existing.id));
        }
        tables.states.insert(state.code.clone(), state.clone());
        Ok(Upserted::created(state.id))
    }

    async fn upsert_city(&self, city: &City) -> Result<Upserted<CityId>> {
        let mut tables = self.lock()?;
        if !tables.states.values().any(|s| s.id == city.state_id) {
            return Err(WriteError::ForeignKey(format!(
                "city '{}' references unknown state {}",
                city.name, city.state_id
            ))
            .into());
        }

        let key = (city.state_id, city.name.key().to_string());
        if let Some(existing) = tables.cities.get(&key) {
            return Ok(Upserted::existing(existing.id));
        }
        tables.city_ids.insert(city.id, key.clone());
        tables.cities.insert(key, city.clone());
        Ok(Upserted::created(city.id))
    }

    async fn write_pincode(
        &self,
        record: &PincodeRecord,
        policy: DuplicatePolicy,
    ) -> Result<PincodeWrite> {
        let mut tables = self.lock()?;
        if !tables.city_ids.contains_key(&record.city_id) {
            return Err(WriteError::ForeignKey(format!(
                "pincode {} references unknown city {}",
                record.pincode, record.city_id
            ))
            .into());
        }

        let Some(existing) = tables.pincodes.get_mut(&record.pincode) else {
            tables
                .pincodes
                .insert(record.pincode.clone(), record.clone());
            return Ok(PincodeWrite::Inserted);
        };

        if existing.same_mapping(record) {
            return Ok(PincodeWrite::Unchanged);
        }

        match policy {
            DuplicatePolicy::Upsert => {
                *existing = record.clone();
                Ok(PincodeWrite::Updated)
            }
            DuplicatePolicy::KeepExisting => Ok(PincodeWrite::Skipped),
            DuplicatePolicy::Reject => Err(WriteError::Conflict(format!(
                "pincode {} is already mapped to cluster '{}'",
                record.pincode, existing.cluster
            ))
            .into()),
        }
    }

    async fn coverage_counts(&self) -> Result<CoverageCounts> {
        let tables = self.lock()?;
        Ok(CoverageCounts::known(
            tables.states.len() as u64,
            tables.cities.len() as u64,
            tables.pincodes.len() as u64,
        ))
    }

    async fn cluster_breakdown(&self) -> Result<Vec<ClusterCount>> {
        let tables = self.lock()?;
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for record in tables.pincodes.values() {
            *counts.entry(record.cluster.as_str().to_string()).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(cluster, pincodes)| ClusterCount { cluster, pincodes })
            .collect())
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CityName, ClusterLabel};

    fn state(code: &str) -> State {
        State::new(StateCode::new(code).unwrap(), None)
    }

    fn pin(value: &str, city_id: CityId, cluster: &str) -> PincodeRecord {
        PincodeRecord::new(
            Pincode::new(value).unwrap(),
            city_id,
            ClusterLabel::new(cluster).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_upsert_state_returns_existing_id() {
        let store = MemoryStore::new();
        let first = store.upsert_state(&state("MH")).await.unwrap();
        let second = store.upsert_state(&state("mh")).await.unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.id, second.id);
        assert_eq!(store.states().len(), 1);
    }

    #[tokio::test]
    async fn test_city_requires_state() {
        let store = MemoryStore::new();
        let orphan = City::new(StateId::generate(), CityName::new("Pune").unwrap());

        let err = store.upsert_city(&orphan).await.unwrap_err();
        assert!(matches!(err, PinloadError::Write(WriteError::ForeignKey(_))));
    }

    #[tokio::test]
    async fn test_same_city_name_in_two_states() {
        let store = MemoryStore::new();
        let mh = store.upsert_state(&state("MH")).await.unwrap().id;
        let ka = store.upsert_state(&state("KA")).await.unwrap().id;

        let a = store
            .upsert_city(&City::new(mh, CityName::new("Aurangabad").unwrap()))
            .await
            .unwrap();
        let b = store
            .upsert_city(&City::new(ka, CityName::new("Aurangabad").unwrap()))
            .await
            .unwrap();

        assert!(a.created && b.created);
        assert_ne!(a.id, b.id);
        assert_eq!(store.cities().len(), 2);
    }

    #[tokio::test]
    async fn test_pincode_requires_city() {
        let store = MemoryStore::new();
        let err = store
            .write_pincode(&pin("411001", CityId::generate(), "A"), DuplicatePolicy::Upsert)
            .await
            .unwrap_err();
        assert!(matches!(err, PinloadError::Write(WriteError::ForeignKey(_))));
    }

    #[tokio::test]
    async fn test_pincode_duplicate_policies() {
        let store = MemoryStore::new();
        let mh = store.upsert_state(&state("MH")).await.unwrap().id;
        let pune = store
            .upsert_city(&City::new(mh, CityName::new("Pune").unwrap()))
            .await
            .unwrap()
            .id;

        let original = pin("411001", pune, "A");
        let moved = pin("411001", pune, "B");

        assert_eq!(
            store.write_pincode(&original, DuplicatePolicy::Reject).await.unwrap(),
            PincodeWrite::Inserted
        );
        assert_eq!(
            store.write_pincode(&original, DuplicatePolicy::Reject).await.unwrap(),
            PincodeWrite::Unchanged
        );
        assert!(store.write_pincode(&moved, DuplicatePolicy::Reject).await.is_err());
        assert_eq!(
            store
                .write_pincode(&moved, DuplicatePolicy::KeepExisting)
                .await
                .unwrap(),
            PincodeWrite::Skipped
        );
        assert_eq!(store.pincodes()[0].cluster.as_str(), "A");

        assert_eq!(
            store.write_pincode(&moved, DuplicatePolicy::Upsert).await.unwrap(),
            PincodeWrite::Updated
        );
        assert_eq!(store.pincodes()[0].cluster.as_str(), "B");
    }

    #[tokio::test]
    async fn test_counts_and_breakdown() {
        let store = MemoryStore::new();
        let mh = store.upsert_state(&state("MH")).await.unwrap().id;
        let pune = store
            .upsert_city(&City::new(mh, CityName::new("Pune").unwrap()))
            .await
            .unwrap()
            .id;
        for (p, c) in [("411001", "A"), ("411002", "A"), ("411003", "B")] {
            store
                .write_pincode(&pin(p, pune, c), DuplicatePolicy::Upsert)
                .await
                .unwrap();
        }

        assert_eq!(
            store.coverage_counts().await.unwrap(),
            CoverageCounts::known(1, 1, 3)
        );
        let breakdown = store.cluster_breakdown().await.unwrap();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].cluster, "A");
        assert_eq!(breakdown[0].pincodes, 2);
        assert_eq!(breakdown[1].pincodes, 1);
    }
}
