//! PostgreSQL-backed `BotRepository` implementation using Diesel ORM.
//!
//! Registration relies on the unique constraint on `bot_id`: the insert
//! is `ON CONFLICT (bot_id) DO NOTHING`, so concurrent registrations of the
//! same identifier leave exactly one row and every caller sees that row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{BotRepository, BotRepositoryError};
use crate::domain::{Bot, BotId, Registration};

use super::models::{BotRow, NewBotRow};
use super::pool::{DbPool, PoolError};
use super::schema::bots;

/// Diesel-backed implementation of the [`BotRepository`] port.
#[derive(Clone)]
pub struct DieselBotRepository {
    pool: DbPool,
}

impl DieselBotRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BotRepositoryError {
    match error {
        PoolError::Checkout { message } => BotRepositoryError::connection(message),
    }
}

/// Map Diesel errors to repository errors, keeping the driver's message.
fn map_diesel_error(error: diesel::result::Error) -> BotRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            BotRepositoryError::connection(info.message())
        }
        DieselError::DatabaseError(_, info) => BotRepositoryError::query(info.message()),
        other => BotRepositoryError::query(other.to_string()),
    }
}

#[async_trait]
impl BotRepository for DieselBotRepository {
    async fn insert_if_absent(&self, bot: &Bot) -> Result<Registration, BotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let inserted: Option<BotRow> = diesel::insert_into(bots::table)
            .values(NewBotRow::from(bot))
            .on_conflict(bots::bot_id)
            .do_nothing()
            .returning(BotRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        if let Some(row) = inserted {
            return Ok(Registration::Created(row.into()));
        }

        let existing: BotRow = bots::table
            .filter(bots::bot_id.eq(bot.bot_id.as_str()))
            .select(BotRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(Registration::AlreadyRegistered(existing.into()))
    }

    async fn find_by_bot_id(&self, bot_id: &BotId) -> Result<Option<Bot>, BotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<BotRow> = bots::table
            .filter(bots::bot_id.eq(bot_id.as_str()))
            .select(BotRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Bot::from))
    }

    async fn list_newest_first(&self) -> Result<Vec<Bot>, BotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<BotRow> = bots::table
            .order((bots::created_at.desc(), bots::id.desc()))
            .select(BotRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Bot::from).collect())
    }

    async fn set_blacklisted(
        &self,
        bot_id: &BotId,
        flag: bool,
    ) -> Result<Option<Bot>, BotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<BotRow> =
            diesel::update(bots::table.filter(bots::bot_id.eq(bot_id.as_str())))
                .set(bots::is_blacklisted.eq(flag))
                .returning(BotRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;

        Ok(row.map(Bot::from))
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping and pool failure coverage. Statement behaviour against a
    //! live database lives in `tests/diesel_bot_repository.rs`.

    use std::time::Duration;

    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    use super::*;
    use crate::outbound::persistence::PoolConfig;

    #[derive(Debug)]
    struct StubInfo(&'static str);

    impl diesel::result::DatabaseErrorInformation for StubInfo {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(StubInfo("server closed the connection unexpectedly")),
        ));

        assert_eq!(
            err,
            BotRepositoryError::connection("server closed the connection unexpectedly")
        );
    }

    #[rstest]
    fn database_errors_keep_the_driver_message() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation,
            Box::new(StubInfo(
                "new row for relation \"bots\" violates check constraint",
            )),
        ));

        assert_eq!(
            err,
            BotRepositoryError::query("new row for relation \"bots\" violates check constraint")
        );
    }

    #[rstest]
    fn other_errors_map_to_query_errors() {
        let err = map_diesel_error(DieselError::NotFound);
        assert!(matches!(err, BotRepositoryError::Query { .. }));
    }

    #[tokio::test]
    async fn unreachable_database_surfaces_as_connection_error() {
        let config = PoolConfig::new("postgres://registry@127.0.0.1:1/unreachable")
            .with_connection_timeout(Duration::from_millis(200));
        let repo = DieselBotRepository::new(DbPool::connect_lazy(&config));

        let err = repo
            .find_by_bot_id(&BotId::new("B1"))
            .await
            .expect_err("database is unreachable");

        assert!(matches!(err, BotRepositoryError::Connection { .. }));
    }
}
