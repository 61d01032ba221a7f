//! Outbound adapters implementing the [`crate::domain::ports::BotRepository`]
//! port.
//!
//! - **persistence**: PostgreSQL via Diesel.
//! - **in_memory**: process-local store for runs without a database.

pub mod in_memory;
pub mod persistence;

pub use in_memory::InMemoryBotRepository;
