//! Internal Diesel row structs. Never exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Bot, BotId};

use super::schema::bots;

/// Row struct for reading from the bots table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BotRow {
    pub bot_id: String,
    pub owner_id: String,
    pub store_name: String,
    pub owner_username: String,
    pub is_blacklisted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<BotRow> for Bot {
    fn from(row: BotRow) -> Self {
        Self {
            bot_id: BotId::new(row.bot_id),
            owner_id: row.owner_id,
            store_name: row.store_name,
            owner_username: row.owner_username,
            is_blacklisted: row.is_blacklisted,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for new bot records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bots)]
pub(crate) struct NewBotRow<'a> {
    pub bot_id: &'a str,
    pub owner_id: &'a str,
    pub store_name: &'a str,
    pub owner_username: &'a str,
    pub is_blacklisted: bool,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Bot> for NewBotRow<'a> {
    fn from(bot: &'a Bot) -> Self {
        Self {
            bot_id: bot.bot_id.as_str(),
            owner_id: &bot.owner_id,
            store_name: &bot.store_name,
            owner_username: &bot.owner_username,
            is_blacklisted: bot.is_blacklisted,
            created_at: bot.created_at,
        }
    }
}
