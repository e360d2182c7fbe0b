//! Turn a lookup page into a [`VehicleRecord`].
//!
//! The page is a flat grid of cards. Each card is a `div` holding a label
//! (`span` or `strong`) and a value (`p`, or `span.value`). There is no
//! schema, so extraction is driven entirely by the label text in
//! [`crate::fields::FIELDS`].

use scraper::ElementRef;

use crate::error::{LookupError, LookupResult};
use crate::fields::{FieldSpec, FIELDS};
use crate::page::{ElementExt, Page};
use crate::types::VehicleRecord;

/// Tag of the element that groups a label with its value.
const CONTAINER_TAG: &str = "div";

/// Classes of the block the site uses to report problems, in lookup order.
const ERROR_BLOCK_CLASSES: &[&str] = &["error", "alert"];

/// Lower-case marker inside the error block meaning the vehicle is unknown.
const NOT_FOUND_MARKER: &str = "not found";

/// Extract every known field from a lookup page.
///
/// Returns [`LookupError::VehicleNotFound`] when the site's error block
/// reports the vehicle as unknown. An empty record is not an error here.
pub fn extract_vehicle_record(html: &str) -> LookupResult<VehicleRecord> {
    let page = Page::parse(html);

    // 1. Explicit "not found" report from the site
    if reports_not_found(&page) {
        return Err(LookupError::VehicleNotFound);
    }

    // 2. Label/value pairs for every known field
    let mut record = VehicleRecord::new();
    for field in FIELDS {
        if let Some(value) = field_value(&page, field) {
            record.insert(field.name, value);
        }
    }

    tracing::debug!(fields = record.len(), "extracted vehicle record");
    Ok(record)
}

// ── Error block ─────────────────────────────────────────────────────────────

/// First error block on the page: `div.error`, else `div.alert`.
fn error_block<'a>(page: &'a Page) -> Option<ElementRef<'a>> {
    ERROR_BLOCK_CLASSES
        .iter()
        .find_map(|class| page.find(CONTAINER_TAG, |el| el.has_class(class)))
}

/// Whether the first error block says "not found". Only that one block is
/// examined: a `div.error` without the marker hides any `div.alert`.
fn reports_not_found(page: &Page) -> bool {
    error_block(page)
        .map(|block| block.stripped_text().to_lowercase().contains(NOT_FOUND_MARKER))
        .unwrap_or(false)
}

// ── Label/value pairing ─────────────────────────────────────────────────────

/// The label element for a field: the first matching tag wins.
fn label_element<'a>(page: &'a Page, field: &FieldSpec) -> Option<ElementRef<'a>> {
    field
        .label
        .tags
        .iter()
        .find_map(|tag| page.find(tag, |el| field.label.matches(el)))
}

/// The value element inside a label's container: first `p`, else
/// `span.value`.
fn value_element<'a>(container: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    container
        .find_descendant("p", |_| true)
        .or_else(|| container.find_descendant("span", |el| el.has_class("value")))
}

fn field_value(page: &Page, field: &FieldSpec) -> Option<String> {
    let label = label_element(page, field)?;
    let container = label.find_ancestor(CONTAINER_TAG)?;
    let value = value_element(&container)?.stripped_text();
    (!value.is_empty()).then_some(value)
}
