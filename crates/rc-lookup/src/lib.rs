//! rc-lookup — fetch a vehicle registration page and extract its labeled fields.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod fields;
pub mod lookup;
pub mod page;
pub mod types;

pub use error::{LookupError, LookupResult};
pub use extract::extract_vehicle_record;
pub use fetch::{FetchConfig, HttpFetcher, PageSource, StaticPage, UnreachablePage};
pub use fields::{FieldSpec, LabelMatcher, FIELDS};
pub use lookup::lookup_vehicle;
pub use page::{ElementExt, Page};
pub use types::*;
