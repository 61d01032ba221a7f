//! Process-local `BotRepository` used when no database is configured.
//!
//! Records live in insertion order behind a tokio `RwLock`. The write lock
//! makes check-then-insert atomic, matching the unique constraint the
//! PostgreSQL adapter relies on. Contents are lost on restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{BotRepository, BotRepositoryError};
use crate::domain::{Bot, BotId, Registration};

/// In-memory implementation of the [`BotRepository`] port.
#[derive(Debug, Default)]
pub struct InMemoryBotRepository {
    bots: RwLock<Vec<Bot>>,
}

impl InMemoryBotRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BotRepository for InMemoryBotRepository {
    async fn insert_if_absent(&self, bot: &Bot) -> Result<Registration, BotRepositoryError> {
        let mut bots = self.bots.write().await;
        if let Some(existing) = bots.iter().find(|stored| stored.bot_id == bot.bot_id) {
            return Ok(Registration::AlreadyRegistered(existing.clone()));
        }
        bots.push(bot.clone());
        Ok(Registration::Created(bot.clone()))
    }

    async fn find_by_bot_id(&self, bot_id: &BotId) -> Result<Option<Bot>, BotRepositoryError> {
        let bots = self.bots.read().await;
        Ok(bots.iter().find(|stored| &stored.bot_id == bot_id).cloned())
    }

    async fn list_newest_first(&self) -> Result<Vec<Bot>, BotRepositoryError> {
        let bots = self.bots.read().await;
        // Latest insert first, then a stable sort keeps that order for ties.
        let mut listed: Vec<Bot> = bots.iter().rev().cloned().collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn set_blacklisted(
        &self,
        bot_id: &BotId,
        flag: bool,
    ) -> Result<Option<Bot>, BotRepositoryError> {
        let mut bots = self.bots.write().await;
        Ok(bots
            .iter_mut()
            .find(|stored| &stored.bot_id == bot_id)
            .map(|stored| {
                stored.is_blacklisted = flag;
                stored.clone()
            }))
    }
}
