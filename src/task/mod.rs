//! Task lifecycle management.
//!
//! Tasks move between `new` and `completed`. Partial updates overwrite only
//! the fields that actually change, and an update that changes nothing
//! issues no write. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
