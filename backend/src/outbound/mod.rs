//! Outbound adapters implementing the `UserRepository` port.
//!
//! - `persistence`: PostgreSQL via Diesel and bb8.
//! - `memory`: process-local store for tests and database-less runs.

pub mod memory;
pub mod persistence;
