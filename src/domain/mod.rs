//! Domain models and types for pinload.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Generated identifiers** ([`StateId`], [`CityId`])
//! - **Normalized natural keys** ([`StateCode`], [`CityName`], [`Pincode`], [`ClusterLabel`])
//! - **Entities** ([`State`], [`City`], [`PincodeRecord`])
//! - **Error types** ([`PinloadError`], [`ReadError`], [`WriteError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers are distinct newtypes, so a city id can never be passed where
//! a state id is expected:
//!
//! ```rust
//! use pinload::domain::{CityName, State, StateCode, City};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = State::new(StateCode::new("MH")?, Some("Maharashtra"));
//! let city = City::new(state.id, CityName::new("Pune")?);
//! // City::new(city.id, ...) would not compile
//! # Ok(())
//! # }
//! ```

pub mod entities;
pub mod errors;
pub mod ids;
pub mod result;

pub use entities::{City, PincodeRecord, State};
pub use errors::{PinloadError, ReadError, RowErrorDetail, WriteError};
pub use ids::{CityId, CityName, ClusterLabel, Pincode, StateCode, StateId};
pub use result::Result;
