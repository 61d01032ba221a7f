//! Driving ports for the registry use-cases.
//!
//! HTTP handlers depend on these traits only, so they can be exercised with
//! any implementation.

use async_trait::async_trait;

use crate::domain::{BlacklistAction, Bot, BotId, BotStatus, Error, RegisterBotRequest, Registration};

/// Mutating registry operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BotRegistryCommand: Send + Sync {
    /// Register a bot, or return the existing record for its identifier.
    async fn register(&self, request: RegisterBotRequest) -> Result<Registration, Error>;

    /// Apply `action` to the bot's blacklist flag.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when no record exists.
    async fn set_blacklist(&self, bot_id: &BotId, action: BlacklistAction) -> Result<Bot, Error>;
}

/// Read-only registry operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BotRegistryQuery: Send + Sync {
    /// Report whether a bot identifier is acceptable.
    async fn check(&self, bot_id: &BotId) -> Result<BotStatus, Error>;

    /// Every record, newest first.
    async fn list(&self) -> Result<Vec<Bot>, Error>;
}
