//! Inbound adapters translating external requests into domain port calls.

pub mod http;
