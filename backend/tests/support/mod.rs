//! Shared helpers for registry integration tests.

use std::sync::{Arc, Mutex};

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use bot_registry::Trace;
use bot_registry::domain::{ActionPolicy, BotRegistryService};
use bot_registry::inbound::http::configure_registry;
use bot_registry::inbound::http::state::HttpState;
use bot_registry::outbound::InMemoryBotRepository;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

/// Clock that advances one second on every read, so each registration gets a
/// distinct `createdAt`.
pub struct SteppingClock(Mutex<DateTime<Utc>>);

impl SteppingClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self(Mutex::new(start))
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut guard = match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = *guard;
        *guard = now + TimeDelta::seconds(1);
        now
    }
}

/// First timestamp handed out by [`SteppingClock`] in these tests.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Registry over a fresh in-memory store, mounted the way an embedding host
/// would mount it. `None` keeps the state's default action policy.
pub async fn registry_app(
    policy: Option<ActionPolicy>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let service = Arc::new(BotRegistryService::new(
        Arc::new(InMemoryBotRepository::new()),
        Arc::new(SteppingClock::starting_at(epoch())),
    ));
    let mut state = HttpState::new(service.clone(), service);
    if let Some(policy) = policy {
        state = state.with_action_policy(policy);
    }
    let state = web::Data::new(state);
    test::init_service(
        App::new()
            .wrap(Trace)
            .configure(|cfg| configure_registry(cfg, state)),
    )
    .await
}
