//! Persistence writer
//!
//! Writes one validated row as State, then City, then Pincode.

use super::row::GeoRow;
use crate::adapters::database::{GeoStore, PincodeWrite};
use crate::config::DuplicatePolicy;
use crate::core::resolve::EntityResolver;
use crate::domain::{City, CityId, PincodeRecord, Result, State, StateId};

/// How a parent entity was obtained for a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityOutcome {
    /// Already recorded by the resolver earlier in this run
    Resolved,
    /// Inserted by this row
    Created,
    /// Found in the store from an earlier run
    Existing,
}

impl EntityOutcome {
    fn from_created(created: bool) -> Self {
        if created {
            Self::Created
        } else {
            Self::Existing
        }
    }
}

/// What happened when a row was persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowOutcome {
    /// State outcome
    pub state: EntityOutcome,

    /// City outcome
    pub city: EntityOutcome,

    /// Pincode outcome
    pub pincode: PincodeWrite,
}

/// Writes rows to a geo store in dependency order
pub struct PersistenceWriter<'a> {
    store: &'a dyn GeoStore,
    policy: DuplicatePolicy,
}

impl<'a> PersistenceWriter<'a> {
    /// Creates a writer over a store
    pub fn new(store: &'a dyn GeoStore, policy: DuplicatePolicy) -> Self {
        Self { store, policy }
    }

    /// Persists one row
    ///
    /// The resolver is consulted first; a state or city is only sent to the
    /// store the first time its natural key is seen in this run, and the
    /// identifier the store returns is recorded.
    ///
    /// # Errors
    ///
    /// Propagates store errors. The state and city of a failed row stay
    /// recorded if they were written.
    pub async fn persist_row(
        &self,
        row: &GeoRow,
        resolver: &mut EntityResolver,
    ) -> Result<RowOutcome> {
        let (state_id, state) = self.resolve_state(row, resolver).await?;
        let (city_id, city) = self.resolve_city(row, state_id, resolver).await?;

        let record = PincodeRecord::new(row.pincode.clone(), city_id, row.cluster.clone());
        let pincode = self.store.write_pincode(&record, self.policy).await?;

        tracing::trace!(
            pincode = %row.pincode,
            city = %row.city,
            state = %row.state_code,
            outcome = ?pincode,
            "Row persisted"
        );

        Ok(RowOutcome {
            state,
            city,
            pincode,
        })
    }

    async fn resolve_state(
        &self,
        row: &GeoRow,
        resolver: &mut EntityResolver,
    ) -> Result<(StateId, EntityOutcome)> {
        if let Some(id) = resolver.state_id(&row.state_code) {
            return Ok((id, EntityOutcome::Resolved));
        }

        let state = State::new(row.state_code.clone(), row.state_name.as_deref());
        let upserted = self.store.upsert_state(&state).await?;
        resolver.record_state(row.state_code.clone(), upserted.id);

        if upserted.created {
            tracing::debug!(code = %state.code, name = %state.name, "State created");
        }
        Ok((upserted.id, EntityOutcome::from_created(upserted.created)))
    }

    async fn resolve_city(
        &self,
        row: &GeoRow,
        state_id: StateId,
        resolver: &mut EntityResolver,
    ) -> Result<(CityId, EntityOutcome)> {
        if let Some(id) = resolver.city_id(state_id, &row.city) {
            return Ok((id, EntityOutcome::Resolved));
        }

        let city = City::new(state_id, row.city.clone());
        let upserted = self.store.upsert_city(&city).await?;
        resolver.record_city(state_id, row.city.clone(), upserted.id);

        if upserted.created {
            tracing::debug!(city = %city.name, state = %row.state_code, "City created");
        }
        Ok((upserted.id, EntityOutcome::from_created(upserted.created)))
    }
}
