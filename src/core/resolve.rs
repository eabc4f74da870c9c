//! Entity resolution
//!
//! Deduplicates states and cities within one run. The resolver is consulted
//! before every insert decision, so each distinct state code and each
//! distinct (state, city) pair reaches the store at most once per run.

use crate::domain::{CityId, CityName, StateCode, StateId};
use std::collections::HashMap;

/// Lookup maps from natural keys to the identifiers the store holds
#[derive(Debug, Default)]
pub struct EntityResolver {
    states: HashMap<StateCode, StateId>,
    cities: HashMap<(StateId, CityName), CityId>,
}

impl EntityResolver {
    /// Creates an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identifier recorded for a state code
    pub fn state_id(&self, code: &StateCode) -> Option<StateId> {
        self.states.get(code).copied()
    }

    /// Records the identifier the store holds for a state code
    pub fn record_state(&mut self, code: StateCode, id: StateId) {
        self.states.insert(code, id);
    }

    /// Returns the identifier recorded for a city within a state
    pub fn city_id(&self, state_id: StateId, name: &CityName) -> Option<CityId> {
        self.cities.get(&(state_id, name.clone())).copied()
    }

    /// Records the identifier the store holds for a city within a state
    pub fn record_city(&mut self, state_id: StateId, name: CityName, id: CityId) {
        self.cities.insert((state_id, name), id);
    }

    /// Number of distinct states seen
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of distinct cities seen
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_lookup_uses_normalized_code() {
        let mut resolver = EntityResolver::new();
        let id = StateId::generate();
        resolver.record_state(StateCode::new("MH").unwrap(), id);

        assert_eq!(resolver.state_id(&StateCode::new(" mh").unwrap()), Some(id));
        assert_eq!(resolver.state_id(&StateCode::new("KA").unwrap()), None);
        assert_eq!(resolver.state_count(), 1);
    }

    #[test]
    fn test_city_lookup_is_scoped_to_state() {
        let mut resolver = EntityResolver::new();
        let mh = StateId::generate();
        let ka = StateId::generate();
        let pune = CityId::generate();
        resolver.record_city(mh, CityName::new("Pune").unwrap(), pune);

        assert_eq!(
            resolver.city_id(mh, &CityName::new("PUNE").unwrap()),
            Some(pune)
        );
        assert_eq!(resolver.city_id(ka, &CityName::new("Pune").unwrap()), None);
        assert_eq!(resolver.city_count(), 1);
    }
}
