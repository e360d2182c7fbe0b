//! JSON response envelope shared by every lookup outcome.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use rc_lookup::{LookupError, LookupResult, RcNumber, VehicleLookup, VehicleRecord};

/// Attribution carried by every envelope.
pub const CREDIT: &str = "API DEVELOPER: @J4TNX";

/// Value of the envelope's `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeStatus {
    Success,
    Error,
    NotFound,
}

/// A lookup response body plus the HTTP status it is sent with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub credit: &'static str,
    pub status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rc_number: Option<RcNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<VehicleRecord>,
    #[serde(skip)]
    pub http_status: StatusCode,
}

impl Envelope {
    pub fn success(lookup: VehicleLookup) -> Self {
        Self {
            credit: CREDIT,
            status: EnvelopeStatus::Success,
            message: None,
            rc_number: Some(lookup.rc_number),
            details: Some(lookup.details),
            http_status: StatusCode::OK,
        }
    }

    /// Map a lookup failure to its status pair.
    ///
    /// A "not found" reported by the site goes out as 500/`error`; an empty
    /// extraction goes out as 404/`not_found`. Clients rely on this split.
    pub fn from_error(error: &LookupError) -> Self {
        let (http_status, status) = match error {
            LookupError::InvalidRcNumber => (StatusCode::BAD_REQUEST, EnvelopeStatus::Error),
            LookupError::Network(_) | LookupError::VehicleNotFound => {
                (StatusCode::INTERNAL_SERVER_ERROR, EnvelopeStatus::Error)
            }
            LookupError::NoDetails(_) => (StatusCode::NOT_FOUND, EnvelopeStatus::NotFound),
        };
        Self {
            credit: CREDIT,
            status,
            message: Some(error.to_string()),
            rc_number: None,
            details: None,
            http_status,
        }
    }

    pub fn from_result(result: LookupResult<VehicleLookup>) -> Self {
        match result {
            Ok(lookup) => Self::success(lookup),
            Err(e) => Self::from_error(&e),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}
