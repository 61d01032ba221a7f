//! Registry domain service.
//!
//! Implements the driving ports on top of a [`BotRepository`]. The service
//! owns the consistency rules: first writer wins on registration, unknown
//! identifiers check as valid, and only the blacklist flag is ever updated.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{BotRegistryCommand, BotRegistryQuery, BotRepository, BotRepositoryError};
use crate::domain::{
    BlacklistAction, Bot, BotId, BotRegistration, BotStatus, BotValidationError, Error,
    RegisterBotRequest, Registration,
};

/// Registry service implementing [`BotRegistryCommand`] and
/// [`BotRegistryQuery`].
#[derive(Clone)]
pub struct BotRegistryService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> BotRegistryService<R> {
    /// Create a service over `repo`, stamping new records with `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> BotRegistryService<R>
where
    R: BotRepository,
{
    // Store failures keep their text; the dashboard tester shows it verbatim.
    fn map_repository_error(error: BotRepositoryError) -> Error {
        match error {
            BotRepositoryError::Connection { message } | BotRepositoryError::Query { message } => {
                Error::internal(message)
            }
        }
    }

    fn validation_error(error: &BotValidationError) -> Error {
        let fields: Vec<&str> = error.missing().iter().map(|field| field.as_str()).collect();
        Error::internal(error.to_string()).with_details(json!({
            "code": "validation_failed",
            "missing": fields,
        }))
    }

    /// An incomplete request for an identifier that is already registered
    /// still resolves to the existing record.
    async fn existing_or_validation_error(
        &self,
        bot_id: Option<String>,
        error: &BotValidationError,
    ) -> Result<Registration, Error> {
        let Some(bot_id) = bot_id.filter(|id| !id.is_empty()) else {
            return Err(Self::validation_error(error));
        };
        match self
            .repo
            .find_by_bot_id(&BotId::new(bot_id))
            .await
            .map_err(Self::map_repository_error)?
        {
            Some(bot) => Ok(Registration::AlreadyRegistered(bot)),
            None => Err(Self::validation_error(error)),
        }
    }
}

#[async_trait]
impl<R> BotRegistryCommand for BotRegistryService<R>
where
    R: BotRepository,
{
    async fn register(&self, request: RegisterBotRequest) -> Result<Registration, Error> {
        let bot_id = request.bot_id.clone();
        let registration = match BotRegistration::try_from_request(request) {
            Ok(registration) => registration,
            Err(error) => return self.existing_or_validation_error(bot_id, &error).await,
        };

        let bot = registration.into_bot(self.clock.utc());
        let outcome = self
            .repo
            .insert_if_absent(&bot)
            .await
            .map_err(Self::map_repository_error)?;

        match &outcome {
            Registration::Created(bot) => {
                info!(bot_id = %bot.bot_id, owner_id = %bot.owner_id, "bot registered");
            }
            Registration::AlreadyRegistered(bot) => {
                debug!(bot_id = %bot.bot_id, "bot already registered");
            }
        }
        Ok(outcome)
    }

    async fn set_blacklist(&self, bot_id: &BotId, action: BlacklistAction) -> Result<Bot, Error> {
        let updated = self
            .repo
            .set_blacklisted(bot_id, action.target_flag())
            .await
            .map_err(Self::map_repository_error)?;

        let Some(bot) = updated else {
            debug!(bot_id = %bot_id, %action, "blacklist toggle on unknown bot");
            return Err(Error::not_found("Bot not found"));
        };
        info!(bot_id = %bot.bot_id, state = action.past_tense(), "bot blacklist updated");
        Ok(bot)
    }
}

#[async_trait]
impl<R> BotRegistryQuery for BotRegistryService<R>
where
    R: BotRepository,
{
    async fn check(&self, bot_id: &BotId) -> Result<BotStatus, Error> {
        self.repo
            .find_by_bot_id(bot_id)
            .await
            .map(BotStatus::from_lookup)
            .map_err(Self::map_repository_error)
    }

    async fn list(&self) -> Result<Vec<Bot>, Error> {
        self.repo
            .list_newest_first()
            .await
            .map_err(Self::map_repository_error)
    }
}
