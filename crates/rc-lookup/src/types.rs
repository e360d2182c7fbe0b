//! Core data types for a vehicle lookup.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LookupError, LookupResult};

/// Minimum number of characters in a trimmed RC number.
pub const MIN_RC_LEN: usize = 3;

/// A validated registration certificate number: trimmed and upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RcNumber(String);

impl RcNumber {
    /// Validate and normalize a raw identifier.
    ///
    /// Fails with [`LookupError::InvalidRcNumber`] when the input is missing
    /// or shorter than [`MIN_RC_LEN`] characters once surrounding whitespace
    /// is removed.
    pub fn parse(raw: Option<&str>) -> LookupResult<Self> {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.chars().count() < MIN_RC_LEN {
            return Err(LookupError::InvalidRcNumber);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RcNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RcNumber {
    type Error = LookupError;

    fn try_from(value: String) -> LookupResult<Self> {
        Self::parse(Some(&value))
    }
}

impl From<RcNumber> for String {
    fn from(rc: RcNumber) -> Self {
        rc.0
    }
}

/// Field name → value mapping extracted from a lookup page.
///
/// Keys are kept sorted so the serialized form is stable across requests.
/// Empty values are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleRecord {
    fields: BTreeMap<String, String>,
}

impl VehicleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, dropping it if it is empty.
    pub fn insert(&mut self, field: &str, value: String) {
        if value.is_empty() {
            return;
        }
        self.fields.insert(field.to_string(), value);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A successful lookup: the normalized identifier and what was found for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleLookup {
    pub rc_number: RcNumber,
    pub details: VehicleRecord,
}
