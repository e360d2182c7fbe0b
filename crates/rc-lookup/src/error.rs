//! Error type shared by every stage of a lookup.

/// All errors that can occur while looking up a vehicle.
///
/// The `Display` text of each variant is the message shown to API callers,
/// so it is part of the response contract.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Identifier missing or shorter than [`crate::MIN_RC_LEN`] after trimming.
    #[error("Invalid or missing rc_number")]
    InvalidRcNumber,

    /// Network failure, timeout or non-2xx status from the lookup site.
    #[error("Network error: {0}")]
    Network(String),

    /// The lookup site's own error block said the vehicle does not exist.
    #[error("Vehicle not found or invalid RC number")]
    VehicleNotFound,

    /// The page was fetched but none of the known fields could be extracted.
    /// Carries the identifier exactly as the caller supplied it.
    #[error("No details found for {0}")]
    NoDetails(String),
}

impl LookupError {
    /// Short machine-readable name, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::InvalidRcNumber => "invalid_input",
            LookupError::Network(_) => "network",
            LookupError::VehicleNotFound => "vehicle_not_found",
            LookupError::NoDetails(_) => "no_details",
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::Network(e.to_string())
    }
}

pub type LookupResult<T> = Result<T, LookupError>;
