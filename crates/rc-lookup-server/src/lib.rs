//! rc-lookup-server — JSON HTTP API for vehicle RC lookups.

pub mod config;
pub mod envelope;
pub mod rest;

pub use config::{resolve_bind_addr, ServerConfig};
pub use envelope::{Envelope, EnvelopeStatus, CREDIT};
pub use rest::{router, AppState};
