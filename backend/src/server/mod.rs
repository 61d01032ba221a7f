//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, StoreBackend};

use std::future::Future;
use std::sync::Arc;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use bot_registry::Trace;
#[cfg(debug_assertions)]
use bot_registry::doc::ApiDoc;
use bot_registry::domain::ports::BotRepository;
use bot_registry::domain::{ActionPolicy, BotRegistryService};
use bot_registry::inbound::http::configure_registry;
use bot_registry::inbound::http::health::{HealthState, live, ready};
use bot_registry::inbound::http::state::HttpState;
use bot_registry::outbound::InMemoryBotRepository;
use bot_registry::outbound::persistence::DieselBotRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn state_for<R>(repo: R, clock: Arc<dyn Clock>, action_policy: ActionPolicy) -> HttpState
where
    R: BotRepository + 'static,
{
    let service = Arc::new(BotRegistryService::new(Arc::new(repo), clock));
    HttpState::new(service.clone(), service).with_action_policy(action_policy)
}

/// Build handler state over the configured store.
pub(crate) fn build_http_state(config: &ServerConfig, clock: Arc<dyn Clock>) -> HttpState {
    match &config.store {
        StoreBackend::Postgres(pool) => state_for(
            DieselBotRepository::new(pool.clone()),
            clock,
            config.action_policy,
        ),
        StoreBackend::InMemory => {
            state_for(InMemoryBotRepository::new(), clock, config.action_policy)
        }
    }
}

pub(crate) fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .configure(|cfg| configure_registry(cfg, http_state));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = interrupt() => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(err) => {
                warn!(error = %err, "SIGTERM handler unavailable");
                interrupt().await;
            }
        }
    }

    #[cfg(not(unix))]
    interrupt().await;
}

async fn interrupt() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "SIGINT handler unavailable");
        std::future::pending::<()>().await;
    }
}

/// Once `signal` resolves, fail liveness probes and stop the server after
/// in-flight requests finish.
pub(crate) async fn drain_on<S>(signal: S, health_state: web::Data<HealthState>, handle: ServerHandle)
where
    S: Future<Output = ()>,
{
    signal.await;
    health_state.mark_unhealthy();
    info!("shutdown requested; draining connections");
    handle.stop(true).await;
}

/// Construct the Actix HTTP server.
///
/// The registry state is built once and shared by every worker, so the
/// in-memory store is process-wide. `health_state` is marked ready once the
/// listener is bound and unhealthy when a shutdown signal arrives. Must be
/// called from within the Actix runtime.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config, Arc::new(DefaultClock)));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .disable_signals()
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    actix_web::rt::spawn(drain_on(
        shutdown_signal(),
        health_state,
        server.handle(),
    ));
    Ok(server)
}
