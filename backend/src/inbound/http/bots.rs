//! Registry HTTP handlers.
//!
//! ```text
//! POST  /api/register
//! GET   /api/check/{botId}
//! GET   /api/list
//! PATCH /api/blacklist
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use utoipa::ToSchema;

use crate::domain::{Bot, BotField, BotId, Error, RegisterBotRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Registration payload. Scalar values are coerced to strings.
///
/// Only JSON objects deserialise; arrays and scalars are rejected by the
/// extractor as malformed.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct RegisterBotBody {
    /// Unique bot identifier.
    #[schema(value_type = Option<String>, example = "B1")]
    pub bot_id: Option<Value>,
    /// Owning account identifier.
    #[schema(value_type = Option<String>, example = "O1")]
    pub owner_id: Option<Value>,
    /// Store the bot operates for.
    #[schema(value_type = Option<String>, example = "Corner Shop")]
    pub store_name: Option<Value>,
    /// Display name of the owner.
    #[schema(value_type = Option<String>, example = "shopkeeper")]
    pub owner_username: Option<Value>,
}

impl From<Map<String, Value>> for RegisterBotBody {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            bot_id: fields.remove(BotField::BotId.as_str()),
            owner_id: fields.remove(BotField::OwnerId.as_str()),
            store_name: fields.remove(BotField::StoreName.as_str()),
            owner_username: fields.remove(BotField::OwnerUsername.as_str()),
        }
    }
}

fn cast_error(field: BotField, value: &Value) -> Error {
    Error::internal(format!(
        "Cast to string failed for value \"{value}\" at path \"{field}\""
    ))
    .with_details(json!({ "code": "cast_failed", "field": field.as_str() }))
}

fn coerce(field: BotField, value: Option<Value>) -> Result<Option<String>, Error> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(cast_error(field, &other)),
    }
}

impl TryFrom<RegisterBotBody> for RegisterBotRequest {
    type Error = Error;

    fn try_from(body: RegisterBotBody) -> Result<Self, Self::Error> {
        Ok(Self {
            bot_id: coerce(BotField::BotId, body.bot_id)?,
            owner_id: coerce(BotField::OwnerId, body.owner_id)?,
            store_name: coerce(BotField::StoreName, body.store_name)?,
            owner_username: coerce(BotField::OwnerUsername, body.owner_username)?,
        })
    }
}

/// Bot record as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BotResponse {
    #[schema(example = "B1")]
    pub bot_id: String,
    pub owner_id: String,
    pub store_name: String,
    pub owner_username: String,
    /// `true` once blocked.
    pub is_blacklisted: bool,
    /// RFC 3339 UTC timestamp with millisecond precision.
    #[schema(example = "2026-10-18T12:00:00.000Z")]
    pub created_at: String,
}

impl From<Bot> for BotResponse {
    fn from(bot: Bot) -> Self {
        Self {
            bot_id: bot.bot_id.into(),
            owner_id: bot.owner_id,
            store_name: bot.store_name,
            owner_username: bot.owner_username,
            is_blacklisted: bot.is_blacklisted,
            created_at: bot.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Confirmation message with the affected record.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BotEnvelope {
    #[schema(example = "Bot registered successfully")]
    pub message: String,
    pub data: BotResponse,
}

impl BotEnvelope {
    fn new(message: impl Into<String>, bot: Bot) -> Self {
        Self {
            message: message.into(),
            data: bot.into(),
        }
    }
}

/// Result of a bot check. `data` is `null` for unregistered identifiers.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckResponse {
    /// `false` only for blacklisted bots.
    pub status: bool,
    #[schema(example = "Bot is valid")]
    pub message: String,
    pub data: Option<BotResponse>,
}

/// Blacklist toggle payload. Must be a JSON object with string or null
/// values.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", try_from = "Map<String, Value>")]
pub struct BlacklistBody {
    #[schema(example = "B1")]
    pub bot_id: Option<String>,
    /// `blacklist` to block; anything else unblocks unless strict actions
    /// are enabled.
    #[schema(example = "blacklist")]
    pub action: Option<String>,
}

fn optional_text(fields: &mut Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(other) => Err(format!("{key} must be a string, got {other}")),
    }
}

impl TryFrom<Map<String, Value>> for BlacklistBody {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            bot_id: optional_text(&mut fields, "botId")?,
            action: optional_text(&mut fields, "action")?,
        })
    }
}

/// Register a bot, or return the existing record for a known identifier.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterBotBody,
    responses(
        (status = 201, description = "Bot registered", body = BotEnvelope),
        (status = 200, description = "Bot already registered", body = BotEnvelope),
        (status = 400, description = "Malformed JSON body", body = Error),
        (status = 500, description = "Missing fields or store failure", body = Error)
    ),
    tags = ["bots"],
    operation_id = "registerBot"
)]
#[post("/register")]
pub async fn register_bot(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterBotBody>,
) -> ApiResult<HttpResponse> {
    let request = RegisterBotRequest::try_from(payload.into_inner())?;
    let outcome = state.command.register(request).await?;

    let response = if outcome.is_created() {
        HttpResponse::Created().json(BotEnvelope::new(
            "Bot registered successfully",
            outcome.into_bot(),
        ))
    } else {
        HttpResponse::Ok().json(BotEnvelope::new("Bot already registered", outcome.into_bot()))
    };
    Ok(response)
}

/// Check whether a bot may operate.
#[utoipa::path(
    get,
    path = "/api/check/{bot_id}",
    params(("bot_id" = String, Path, description = "Bot identifier")),
    responses(
        (status = 200, description = "Bot standing", body = CheckResponse),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["bots"],
    operation_id = "checkBot"
)]
#[get("/check/{bot_id}")]
pub async fn check_bot(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CheckResponse>> {
    let status = state.query.check(&BotId::new(path.into_inner())).await?;
    let valid = status.is_valid();
    Ok(web::Json(CheckResponse {
        status: valid,
        message: if valid { "Bot is valid" } else { "Bot is blacklisted" }.to_owned(),
        data: status.into_bot().map(BotResponse::from),
    }))
}

/// List every bot, newest first.
#[utoipa::path(
    get,
    path = "/api/list",
    responses(
        (status = 200, description = "All bots", body = [BotResponse]),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["bots"],
    operation_id = "listBots"
)]
#[get("/list")]
pub async fn list_bots(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<BotResponse>>> {
    let bots = state.query.list().await?;
    Ok(web::Json(bots.into_iter().map(BotResponse::from).collect()))
}

/// Blacklist or unblacklist a bot.
#[utoipa::path(
    patch,
    path = "/api/blacklist",
    request_body = BlacklistBody,
    responses(
        (status = 200, description = "Flag updated", body = BotEnvelope),
        (status = 400, description = "Malformed body, or unknown action with strict actions enabled", body = Error),
        (status = 404, description = "Bot not found", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["bots"],
    operation_id = "setBotBlacklist"
)]
#[patch("/blacklist")]
pub async fn set_blacklist(
    state: web::Data<HttpState>,
    payload: web::Json<BlacklistBody>,
) -> ApiResult<web::Json<BotEnvelope>> {
    let BlacklistBody { bot_id, action } = payload.into_inner();
    let action = state.action_policy.parse(action.as_deref()).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "action", "value": err.0 }))
    })?;

    let bot_id = BotId::new(bot_id.unwrap_or_default());
    let bot = state.command.set_blacklist(&bot_id, action).await?;
    Ok(web::Json(BotEnvelope::new(
        format!("Bot {} successfully", action.past_tense()),
        bot,
    )))
}
