//! HTTP inbound adapter exposing the registry API and dashboard.

pub mod bots;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod state;

use actix_web::web;

pub use error::ApiResult;
use state::HttpState;

/// Mount the registry API, its JSON error handling and the dashboard on
/// `cfg`.
///
/// Health probes and API docs are left to the host application.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use bot_registry::domain::BotRegistryService;
/// use bot_registry::inbound::http::{configure_registry, state::HttpState};
/// use bot_registry::outbound::InMemoryBotRepository;
/// use mockable::DefaultClock;
///
/// let service = Arc::new(BotRegistryService::new(
///     Arc::new(InMemoryBotRepository::new()),
///     Arc::new(DefaultClock),
/// ));
/// let state = web::Data::new(HttpState::new(service.clone(), service));
/// let _app = App::new().configure(|cfg| configure_registry(cfg, state.clone()));
/// ```
pub fn configure_registry(cfg: &mut web::ServiceConfig, state: web::Data<HttpState>) {
    cfg.app_data(state)
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(
            web::scope("/api")
                .service(bots::register_bot)
                .service(bots::check_bot)
                .service(bots::list_bots)
                .service(bots::set_blacklist),
        )
        .service(dashboard::index)
        .service(dashboard::script);
}
