//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `REGISTRY_*` environment variables and
//! configuration files, in that order of precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ActionPolicy;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Settings for the `bot-registry` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct RegistrySettings {
    /// PostgreSQL connection string. Records are kept in memory when unset.
    pub database_url: Option<String>,
    /// Address to bind.
    pub host: Option<IpAddr>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations at startup.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// Reject blacklist actions other than `blacklist` and `unblacklist`.
    #[ortho_config(default = false)]
    pub strict_actions: bool,
}

impl RegistrySettings {
    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Socket address to bind, falling back to `0.0.0.0:3000`.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Maximum pooled connections, defaulting to 10.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Blacklist action parsing selected by `strict_actions`.
    pub fn action_policy(&self) -> ActionPolicy {
        if self.strict_actions {
            ActionPolicy::Strict
        } else {
            ActionPolicy::Lenient
        }
    }
}
