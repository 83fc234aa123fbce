//! Taskboard: a small task tracker with a two-state lifecycle.
//!
//! Tasks are created open, completed, reopened, edited field by field, and
//! deleted. The crate owns the lifecycle rules and exposes them over HTTP.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task records, storage contract, and lifecycle service
//! - [`api`]: HTTP transport
//! - [`config`]: Configuration loading
//! - [`telemetry`]: Logging set-up

pub mod api;
pub mod config;
pub mod task;
pub mod telemetry;
