//! Bot record aggregate and the value types the registry operates on.
//!
//! A [`Bot`] is written once by registration. Afterwards only its blacklist
//! flag changes; `created_at` and the descriptive fields are never rewritten.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Natural key of a bot record.
///
/// Lookups accept any text; emptiness is only rejected when a record is
/// registered (see [`BotRegistration`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotId(String);

impl BotId {
    /// Wrap the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for BotId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<BotId> for String {
    fn from(value: BotId) -> Self {
        value.0
    }
}

/// A registered bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bot {
    /// Unique identifier chosen by the registering client.
    pub bot_id: BotId,
    pub owner_id: String,
    pub store_name: String,
    pub owner_username: String,
    /// Blocked bots fail checks but stay listed.
    pub is_blacklisted: bool,
    /// Registration time; never rewritten.
    pub created_at: DateTime<Utc>,
}

impl Bot {
    /// Copy of this record with the blacklist flag set to `flag`.
    #[must_use]
    pub fn with_blacklisted(&self, flag: bool) -> Self {
        Self {
            is_blacklisted: flag,
            ..self.clone()
        }
    }
}

/// Fields of a bot record that must be present and non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotField {
    /// `botId`
    BotId,
    /// `ownerId`
    OwnerId,
    /// `storeName`
    StoreName,
    /// `ownerUsername`
    OwnerUsername,
}

impl BotField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BotId => "botId",
            Self::OwnerId => "ownerId",
            Self::StoreName => "storeName",
            Self::OwnerUsername => "ownerUsername",
        }
    }
}

impl fmt::Display for BotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a registration misses required fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bot validation failed: {} required", describe_missing(.missing))]
pub struct BotValidationError {
    missing: Vec<BotField>,
}

impl BotValidationError {
    /// Fields that were absent or empty, in declaration order.
    pub fn missing(&self) -> &[BotField] {
        &self.missing
    }
}

fn describe_missing(fields: &[BotField]) -> String {
    let names: Vec<&str> = fields.iter().map(|field| field.as_str()).collect();
    match names.as_slice() {
        [single] => format!("{single} is"),
        _ => format!("{} are", names.join(", ")),
    }
}

/// Unvalidated registration input, one optional value per record field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterBotRequest {
    /// Blank or missing values fail validation.
    pub bot_id: Option<String>,
    pub owner_id: Option<String>,
    pub store_name: Option<String>,
    pub owner_username: Option<String>,
}

/// Registration input whose required fields are all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotRegistration {
    pub bot_id: BotId,
    pub owner_id: String,
    pub store_name: String,
    pub owner_username: String,
}

impl BotRegistration {
    /// Validate a request. Absent and empty values both count as missing.
    ///
    /// # Examples
    /// ```
    /// use bot_registry::domain::{BotField, BotRegistration, RegisterBotRequest};
    ///
    /// let request = RegisterBotRequest {
    ///     bot_id: Some("B1".into()),
    ///     owner_id: Some(String::new()),
    ///     ..RegisterBotRequest::default()
    /// };
    /// let err = BotRegistration::try_from_request(request).expect_err("fields missing");
    /// assert_eq!(
    ///     err.missing(),
    ///     &[BotField::OwnerId, BotField::StoreName, BotField::OwnerUsername]
    /// );
    /// ```
    pub fn try_from_request(request: RegisterBotRequest) -> Result<Self, BotValidationError> {
        let mut missing = Vec::new();
        let mut take = |value: Option<String>, field: BotField| match value {
            Some(value) if !value.is_empty() => value,
            _ => {
                missing.push(field);
                String::new()
            }
        };

        let bot_id = take(request.bot_id, BotField::BotId);
        let owner_id = take(request.owner_id, BotField::OwnerId);
        let store_name = take(request.store_name, BotField::StoreName);
        let owner_username = take(request.owner_username, BotField::OwnerUsername);

        if !missing.is_empty() {
            return Err(BotValidationError { missing });
        }
        Ok(Self {
            bot_id: BotId::new(bot_id),
            owner_id,
            store_name,
            owner_username,
        })
    }

    /// Build the record to persist: not blacklisted, created at `created_at`.
    pub fn into_bot(self, created_at: DateTime<Utc>) -> Bot {
        Bot {
            bot_id: self.bot_id,
            owner_id: self.owner_id,
            store_name: self.store_name,
            owner_username: self.owner_username,
            is_blacklisted: false,
            created_at,
        }
    }
}

/// Result of an insert-if-absent keyed on the bot identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The record did not exist and was stored.
    Created(Bot),
    /// A record with the same identifier already existed; it was left as is.
    AlreadyRegistered(Bot),
}

impl Registration {
    /// Whether this call stored the record.
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// Take ownership of the stored record.
    pub fn into_bot(self) -> Bot {
        match self {
            Self::Created(bot) | Self::AlreadyRegistered(bot) => bot,
        }
    }
}

/// Standing of a bot identifier as reported by a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotStatus {
    /// No record exists for the identifier.
    Unregistered,
    /// A record exists and is not blacklisted.
    Active(Bot),
    /// A record exists and is blacklisted.
    Blacklisted(Bot),
}

impl BotStatus {
    /// Classify an optional lookup result.
    pub fn from_lookup(bot: Option<Bot>) -> Self {
        match bot {
            None => Self::Unregistered,
            Some(bot) if bot.is_blacklisted => Self::Blacklisted(bot),
            Some(bot) => Self::Active(bot),
        }
    }

    /// Whether clients should accept the bot. Unregistered identifiers are
    /// accepted.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Blacklisted(_))
    }

    /// The record behind this status, if one exists.
    pub fn into_bot(self) -> Option<Bot> {
        match self {
            Self::Unregistered => None,
            Self::Active(bot) | Self::Blacklisted(bot) => Some(bot),
        }
    }
}

/// Requested transition of the blacklist flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlacklistAction {
    Blacklist,
    Unblacklist,
}

impl BlacklistAction {
    /// Flag value after the transition.
    pub fn target_flag(self) -> bool {
        matches!(self, Self::Blacklist)
    }

    /// Wire name of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blacklist => "blacklist",
            Self::Unblacklist => "unblacklist",
        }
    }

    /// State name used in confirmation messages.
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Blacklist => "blacklisted",
            Self::Unblacklist => "unblacklisted",
        }
    }
}

impl fmt::Display for BlacklistAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when an action is neither `blacklist` nor `unblacklist`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("action must be 'blacklist' or 'unblacklist', got '{0}'")]
pub struct UnknownBlacklistAction(pub String);

impl FromStr for BlacklistAction {
    type Err = UnknownBlacklistAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blacklist" => Ok(Self::Blacklist),
            "unblacklist" => Ok(Self::Unblacklist),
            other => Err(UnknownBlacklistAction(other.to_owned())),
        }
    }
}

/// How strictly blacklist actions are parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActionPolicy {
    /// Only `blacklist` and `unblacklist` are accepted.
    Strict,
    /// `blacklist` blacklists; anything else, including no action, unblacklists.
    #[default]
    Lenient,
}

impl ActionPolicy {
    /// Parse a raw action according to this policy.
    ///
    /// # Examples
    /// ```
    /// use bot_registry::domain::{ActionPolicy, BlacklistAction};
    ///
    /// assert!(ActionPolicy::Strict.parse(Some("x")).is_err());
    /// assert_eq!(
    ///     ActionPolicy::Lenient.parse(Some("x")),
    ///     Ok(BlacklistAction::Unblacklist)
    /// );
    /// ```
    pub fn parse(self, raw: Option<&str>) -> Result<BlacklistAction, UnknownBlacklistAction> {
        match self {
            Self::Strict => raw.unwrap_or_default().parse(),
            Self::Lenient if raw == Some("blacklist") => Ok(BlacklistAction::Blacklist),
            Self::Lenient => Ok(BlacklistAction::Unblacklist),
        }
    }
}
