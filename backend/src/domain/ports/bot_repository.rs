//! Port for bot record persistence.
//!
//! Adapters store one record per [`BotId`]. Uniqueness is the adapter's job:
//! [`BotRepository::insert_if_absent`] must be atomic with respect to other
//! inserts for the same identifier.

use async_trait::async_trait;

use crate::domain::{Bot, BotId, Registration};

use super::define_port_error;

define_port_error! {
    /// Errors raised by bot repository adapters.
    pub enum BotRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "bot repository connection failed: {message}",
        /// A statement failed or was rejected by the store.
        Query { message: String } =>
            "bot repository query failed: {message}",
    }
}

/// Persistence contract for bot records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BotRepository: Send + Sync {
    /// Store `bot` unless a record with the same identifier exists.
    ///
    /// Returns [`Registration::AlreadyRegistered`] carrying the existing
    /// record, untouched, when the identifier is taken.
    async fn insert_if_absent(&self, bot: &Bot) -> Result<Registration, BotRepositoryError>;

    /// Fetch the record for `bot_id`.
    async fn find_by_bot_id(&self, bot_id: &BotId) -> Result<Option<Bot>, BotRepositoryError>;

    /// All records, newest `created_at` first; ties go to the later insert.
    async fn list_newest_first(&self) -> Result<Vec<Bot>, BotRepositoryError>;

    /// Set the blacklist flag and return the updated record, or `None` when
    /// no record matches. Never creates a record.
    async fn set_blacklisted(
        &self,
        bot_id: &BotId,
        flag: bool,
    ) -> Result<Option<Bot>, BotRepositoryError>;
}
