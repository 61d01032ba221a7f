//! Domain primitives, ports and the registry service.
//!
//! Purpose: own the bot record model and its consistency rules, independent
//! of HTTP and of the store behind the [`ports::BotRepository`] port.
//!
//! Public surface:
//! - Bot, BotId, BotStatus, Registration: the record and operation outcomes.
//! - BlacklistAction, ActionPolicy: parsing of blacklist transitions.
//! - Error, ErrorCode: transport-agnostic failure payload.
//! - BotRegistryService: implementation of the driving ports.

pub mod bot;
pub mod error;
pub mod ports;
pub mod registry_service;
pub mod trace_id;

pub use self::bot::{
    ActionPolicy, BlacklistAction, Bot, BotField, BotId, BotRegistration, BotStatus,
    BotValidationError, RegisterBotRequest, Registration, UnknownBlacklistAction,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::registry_service::BotRegistryService;
pub use self::trace_id::TraceId;
