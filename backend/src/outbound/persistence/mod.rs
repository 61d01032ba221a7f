//! PostgreSQL persistence using Diesel with `diesel-async` and `bb8`.
//!
//! Row structs and the table definition stay private; the repository only
//! translates between them and domain types.

mod diesel_bot_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_bot_repository::DieselBotRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations, apply_migrations_within};
pub use pool::{DbPool, PoolConfig, PoolError};
