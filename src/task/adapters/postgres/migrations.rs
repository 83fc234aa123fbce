//! Schema set-up for the task tables.

use crate::task::ports::{TaskRepositoryError, TaskRepositoryResult};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;

/// SQL creating the `tasks` table and its indexes.
const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_tasks/up.sql");

/// Creates the task schema if it does not exist yet.
///
/// Safe to run on every start-up.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the SQL fails.
pub fn apply_migrations(connection: &mut PgConnection) -> TaskRepositoryResult<()> {
    connection
        .batch_execute(CREATE_TASKS_SQL)
        .map_err(TaskRepositoryError::persistence)
}
