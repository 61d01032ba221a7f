//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod bot_registry;
mod bot_repository;

#[cfg(test)]
pub use bot_registry::{MockBotRegistryCommand, MockBotRegistryQuery};
pub use bot_registry::{BotRegistryCommand, BotRegistryQuery};
#[cfg(test)]
pub use bot_repository::MockBotRepository;
pub use bot_repository::{BotRepository, BotRepositoryError};
