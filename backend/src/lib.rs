//! Maintenance-tracking backend library modules.
//!
//! Authenticated users record and review equipment service history through
//! a REST API. The crate follows a hexagonal layout: `domain` holds the
//! record lifecycle and authorization core, `inbound` the HTTP adapter,
//! `outbound` the Diesel persistence adapters, and `server` the wiring.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
