//! Authenticated session handling.
//!
//! The session is an explicit object with a defined lifecycle (`login`,
//! `logout`, `current_user`) that is injected into the adapters needing a
//! bearer token. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
