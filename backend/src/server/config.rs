//! HTTP server configuration object.

use std::net::SocketAddr;

use bot_registry::domain::ActionPolicy;
use bot_registry::inbound::http::health::StoreKind;
use bot_registry::outbound::persistence::DbPool;

/// Store the registry runs against.
#[derive(Clone)]
pub enum StoreBackend {
    Postgres(DbPool),
    InMemory,
}

impl StoreBackend {
    /// Kind reported by the health probes.
    pub fn kind(&self) -> StoreKind {
        match self {
            Self::Postgres(_) => StoreKind::Postgres,
            Self::InMemory => StoreKind::InMemory,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: StoreBackend,
    pub(crate) action_policy: ActionPolicy,
}

impl ServerConfig {
    /// Serve `store` on `bind_addr` with lenient action parsing.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, store: StoreBackend) -> Self {
        Self {
            bind_addr,
            store,
            action_policy: ActionPolicy::default(),
        }
    }

    /// Select how blacklist actions are parsed.
    #[must_use]
    pub fn with_action_policy(mut self, action_policy: ActionPolicy) -> Self {
        self.action_policy = action_policy;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
