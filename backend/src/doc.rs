//! OpenAPI document for the registry API.
//!
//! Served by Swagger UI in debug builds and printed by `openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::bots::{
    BlacklistBody, BotEnvelope, BotResponse, CheckResponse, RegisterBotBody,
};
use crate::inbound::http::health::StoreKind;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bot registry API",
        description = "Register bots, check their standing and manage the blacklist."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::bots::register_bot,
        crate::inbound::http::bots::check_bot,
        crate::inbound::http::bots::list_bots,
        crate::inbound::http::bots::set_blacklist,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterBotBody,
        BotResponse,
        BotEnvelope,
        CheckResponse,
        BlacklistBody,
        StoreKind,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "bots", description = "Bot registration and blacklist"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
