//! One complete lookup: validate, fetch, extract.

use crate::error::{LookupError, LookupResult};
use crate::extract::extract_vehicle_record;
use crate::fetch::PageSource;
use crate::types::{RcNumber, VehicleLookup};

/// Look up a vehicle by a raw, caller-supplied RC number.
///
/// The identifier is validated before any network traffic. An empty
/// extraction is reported as [`LookupError::NoDetails`] carrying `raw` as
/// it was supplied.
pub async fn lookup_vehicle(
    source: &dyn PageSource,
    raw: Option<&str>,
) -> LookupResult<VehicleLookup> {
    let rc_number = RcNumber::parse(raw)?;

    let result = fetch_and_extract(source, &rc_number, raw.unwrap_or_default()).await;
    match &result {
        Ok(lookup) => tracing::info!(
            rc = %rc_number,
            fields = lookup.details.len(),
            "vehicle lookup succeeded"
        ),
        Err(e) => tracing::warn!(rc = %rc_number, kind = e.kind(), "vehicle lookup failed: {e}"),
    }
    result
}

async fn fetch_and_extract(
    source: &dyn PageSource,
    rc_number: &RcNumber,
    raw: &str,
) -> LookupResult<VehicleLookup> {
    let html = source.fetch(rc_number).await?;

    // `scraper::Html` is not Send; keep it out of the async state.
    let details = extract_vehicle_record(&html)?;
    if details.is_empty() {
        return Err(LookupError::NoDetails(raw.to_string()));
    }

    Ok(VehicleLookup {
        rc_number: rc_number.clone(),
        details,
    })
}
