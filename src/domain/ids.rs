//! Domain identifier and key types with validation
//!
//! Generated identifiers ([`StateId`], [`CityId`]) are UUID v4 tokens assigned
//! on first sight of an entity. Natural keys read from the spreadsheet
//! ([`StateCode`], [`CityName`], [`Pincode`], [`ClusterLabel`]) are newtypes
//! that normalize their input on construction so that two spellings of the
//! same key compare equal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! generated_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an identifier read back from a store
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

generated_id!(
    /// State identifier
    StateId
);

generated_id!(
    /// City identifier
    CityId
);

/// State code newtype wrapper
///
/// The external key of a state. Trimmed and uppercased.
///
/// # Examples
///
/// ```
/// use pinload::domain::ids::StateCode;
///
/// let code = StateCode::new(" mh ").unwrap();
/// assert_eq!(code.as_str(), "MH");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateCode(String);

impl StateCode {
    /// Creates a new StateCode from a string
    pub fn new(code: impl AsRef<str>) -> Result<Self, String> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err("State code cannot be empty".to_string());
        }
        if code.chars().any(char::is_whitespace) {
            return Err(format!("State code cannot contain whitespace: '{code}'"));
        }
        Ok(Self(code.to_uppercase()))
    }

    /// Returns the state code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StateCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// City name newtype wrapper
///
/// Keeps the display spelling (trimmed, inner whitespace collapsed) and a
/// lowercase lookup key. Equality and hashing use the key only.
///
/// # Examples
///
/// ```
/// use pinload::domain::ids::CityName;
///
/// let a = CityName::new("Navi  Mumbai").unwrap();
/// let b = CityName::new(" navi mumbai").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "Navi Mumbai");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityName {
    display: String,
    key: String,
}

impl CityName {
    /// Creates a new CityName from a string
    pub fn new(name: impl AsRef<str>) -> Result<Self, String> {
        let display = name
            .as_ref()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if display.is_empty() {
            return Err("City name cannot be empty".to_string());
        }
        let key = display.to_lowercase();
        Ok(Self { display, key })
    }

    /// Returns the display spelling
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Returns the case-folded lookup key
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for CityName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CityName {}

impl std::hash::Hash for CityName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

/// Pincode newtype wrapper
///
/// A postal code made of ASCII digits only.
///
/// # Examples
///
/// ```
/// use pinload::domain::ids::Pincode;
///
/// assert!(Pincode::new("411001").is_ok());
/// assert!(Pincode::new("41 1001").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pincode(String);

impl Pincode {
    /// Creates a new Pincode from a string
    pub fn new(value: impl AsRef<str>) -> Result<Self, String> {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err("Pincode cannot be empty".to_string());
        }
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("Pincode must contain only digits, got '{value}'"));
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the pincode as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Pincode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Cluster label newtype wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClusterLabel(String);

impl ClusterLabel {
    /// Creates a new ClusterLabel from a string
    pub fn new(label: impl AsRef<str>) -> Result<Self, String> {
        let label = label.as_ref().trim();
        if label.is_empty() {
            return Err("Cluster label cannot be empty".to_string());
        }
        Ok(Self(label.to_string()))
    }

    /// Returns the cluster label as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
