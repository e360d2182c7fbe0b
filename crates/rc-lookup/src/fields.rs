//! The table of fields the extractor knows about.
//!
//! Each entry pairs an output field name with the rule that recognises its
//! label on the lookup page. Adding a field is a one-line change here.

use scraper::ElementRef;

use crate::page::ElementExt;

/// Tags that may carry a label, in the order they are tried.
pub const LABEL_TAGS: &[&str] = &["span", "strong"];

/// How to recognise the label element of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMatcher {
    /// Exact label text. No trimming or case folding is applied.
    pub text: &'static str,
    /// Candidate tags, tried in order; the first tag with a match wins.
    pub tags: &'static [&'static str],
}

impl LabelMatcher {
    pub const fn exact(text: &'static str) -> Self {
        Self {
            text,
            tags: LABEL_TAGS,
        }
    }

    /// Whether `el` is a label for this field. The tag is checked separately
    /// by the caller.
    pub fn matches(&self, el: &ElementRef<'_>) -> bool {
        el.own_string().is_some_and(|s| s == self.text)
    }
}

/// One known output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key used in the output record.
    pub name: &'static str,
    pub label: LabelMatcher,
}

impl FieldSpec {
    /// A field whose page label is its own name.
    pub const fn labelled(name: &'static str) -> Self {
        Self {
            name,
            label: LabelMatcher::exact(name),
        }
    }
}

/// Every field a vehicle record can contain.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::labelled("Owner Name"),
    FieldSpec::labelled("Father's Name"),
    FieldSpec::labelled("Owner Serial No"),
    FieldSpec::labelled("Model Name"),
    FieldSpec::labelled("Maker Model"),
    FieldSpec::labelled("Vehicle Class"),
    FieldSpec::labelled("Fuel Type"),
    FieldSpec::labelled("Fuel Norms"),
    FieldSpec::labelled("Registration Date"),
    FieldSpec::labelled("Insurance Company"),
    FieldSpec::labelled("Insurance No"),
    FieldSpec::labelled("Insurance Upto"),
    FieldSpec::labelled("Fitness Upto"),
    FieldSpec::labelled("Tax Upto"),
    FieldSpec::labelled("PUC No"),
    FieldSpec::labelled("PUC Upto"),
    FieldSpec::labelled("Financier Name"),
    FieldSpec::labelled("Registered RTO"),
    FieldSpec::labelled("Address"),
    FieldSpec::labelled("City Name"),
    FieldSpec::labelled("Phone"),
];
