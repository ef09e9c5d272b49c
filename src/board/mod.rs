//! Kanban content board of a workspace.
//!
//! Content items are shown in five status columns. Cards move between
//! columns by drag and drop or a quick status change, and each move is
//! persisted to the backend with a refetch-based rollback on failure.
//! Reordering inside a column is local and recorded best-effort. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
