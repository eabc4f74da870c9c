//! Geographic entities
//!
//! State owns zero or more Cities; City owns zero or more Pincodes.

use super::ids::{CityId, CityName, ClusterLabel, Pincode, StateCode, StateId};
use serde::{Deserialize, Serialize};

/// A state, keyed externally by its code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Generated identifier
    pub id: StateId,

    /// External state code
    pub code: StateCode,

    /// Display name
    pub name: String,
}

impl State {
    /// Creates a state with a freshly generated identifier
    ///
    /// A blank name falls back to the code.
    pub fn new(code: StateCode, name: Option<&str>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| code.as_str().to_string());
        Self {
            id: StateId::generate(),
            code,
            name,
        }
    }
}

/// A city, unique within its owning state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// Generated identifier
    pub id: CityId,

    /// Owning state
    pub state_id: StateId,

    /// City name
    pub name: CityName,
}

impl City {
    /// Creates a city with a freshly generated identifier
    pub fn new(state_id: StateId, name: CityName) -> Self {
        Self {
            id: CityId::generate(),
            state_id,
            name,
        }
    }
}

/// A pincode mapped to a city and a cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PincodeRecord {
    /// Postal code
    pub pincode: Pincode,

    /// Owning city
    pub city_id: CityId,

    /// Cluster label
    pub cluster: ClusterLabel,
}

impl PincodeRecord {
    /// Creates a new pincode record
    pub fn new(pincode: Pincode, city_id: CityId, cluster: ClusterLabel) -> Self {
        Self {
            pincode,
            city_id,
            cluster,
        }
    }

    /// Returns true if `other` maps the pincode to the same city and cluster
    pub fn same_mapping(&self, other: &PincodeRecord) -> bool {
        self.city_id == other.city_id && self.cluster == other.cluster
    }
}
