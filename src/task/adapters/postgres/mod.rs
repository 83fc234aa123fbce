//! `PostgreSQL` adapters for task persistence.

mod migrations;
mod models;
mod repository;
mod schema;

pub use migrations::apply_migrations;
pub use repository::{PostgresTaskRepository, TaskPgPool, build_pool};
