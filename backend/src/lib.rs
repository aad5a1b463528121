//! User management service.
//!
//! A small hexagonal actix-web application: `domain` holds the user model,
//! ports and service; `inbound::http` exposes the CRUD endpoints;
//! `outbound` provides PostgreSQL and in-memory repositories; `server`
//! wires them together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
