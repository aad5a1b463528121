//! Entry point: load settings, prepare the database, then serve HTTP.

use actix_web::web;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use user_service::inbound::http::health::HealthState;
use user_service::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use user_service::server::{ServerConfig, ServerSettings, create_server};

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .json()
        .try_init()
        .map_err(|error| eyre!("tracing init failed: {error}"))
}

async fn build_config(settings: &ServerSettings) -> Result<ServerConfig> {
    let config = ServerConfig::new(settings.bind_addr()?);
    let Some(database_url) = settings.database_url() else {
        return Ok(config);
    };

    if settings.run_migrations {
        run_migrations(database_url.to_owned())
            .await
            .wrap_err("database migration failed")?;
    }
    let pool_config =
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()?);
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("database pool construction failed")?;
    Ok(config.with_db_pool(pool))
}

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = ServerSettings::load_from_args(std::env::args_os())?;
    let config = build_config(&settings).await?;
    let bind_addr = config.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "user service listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("server terminated with an error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_tracing_init_reports_an_error() {
        let _ = init_tracing();
        let error = init_tracing().expect_err("subscriber already installed");
        assert!(error.to_string().starts_with("tracing init failed"));
    }
}
