//! Chooses the repository behind the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryUserRepository;
use crate::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// PostgreSQL when a pool is configured, otherwise the in-memory store.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("serving users from PostgreSQL");
            HttpState::from_repository(Arc::new(DieselUserRepository::new(pool.clone())))
        }
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
            HttpState::from_repository(Arc::new(InMemoryUserRepository::new()))
        }
    };
    web::Data::new(state)
}
