//! HTTP transport for the task board.
//!
//! Exposes the lifecycle service as a JSON API. Every response uses the
//! `{"data": ..., "error": ...}` envelope with absent members omitted.

mod error;
mod routes;
mod tasks;

pub use error::{ApiError, ApiResponse, FieldViolations};
pub use routes::{router, serve};
