//! Bot registry entry point: loads settings, prepares the store and serves
//! the registry API with its dashboard.

mod server;

use std::time::Duration;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bot_registry::inbound::http::health::HealthState;
use bot_registry::outbound::persistence::{DbPool, PoolConfig, apply_migrations_within};
use bot_registry::settings::RegistrySettings;
use server::{ServerConfig, StoreBackend, create_server};

const POOL_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(10);
const MIGRATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Apply migrations off the async runtime. Failures are logged and startup
/// continues; requests then surface the store's own errors.
async fn migrate(database_url: String) {
    match apply_migrations_within(database_url, MIGRATION_TIMEOUT).await {
        Ok(applied) if applied.is_empty() => info!("database schema up to date"),
        Ok(applied) => info!(migrations = ?applied, "applied database migrations"),
        Err(err) => error!(error = %err, "database migrations failed"),
    }
}

async fn build_store(settings: &RegistrySettings) -> StoreBackend {
    let Some(database_url) = settings.database_url() else {
        warn!("no database URL configured; bot records are kept in memory and lost on restart");
        return StoreBackend::InMemory;
    };

    if settings.run_migrations {
        migrate(database_url.to_owned()).await;
    }

    let pool_config = PoolConfig::new(database_url)
        .with_max_size(settings.pool_max_size())
        .with_connection_timeout(POOL_CHECKOUT_TIMEOUT);
    StoreBackend::Postgres(DbPool::connect_lazy(&pool_config))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = RegistrySettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let store = build_store(&settings).await;
    let health_state = web::Data::new(HealthState::new(store.kind()));
    let config =
        ServerConfig::new(settings.bind_addr(), store).with_action_policy(settings.action_policy());

    info!(
        addr = %config.bind_addr(),
        store = ?health_state.store(),
        strict_actions = settings.strict_actions,
        "starting bot registry"
    );
    create_server(health_state, config)?.await
}
