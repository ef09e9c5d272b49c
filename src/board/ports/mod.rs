//! Port contracts for the content board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod notifier;
pub mod repository;

#[cfg(test)]
pub use repository::MockContentRepository;
pub use notifier::{Notice, NoticeLevel, Notifier};
pub use repository::{
    ContentRepository, ContentRepositoryError, ContentRepositoryResult, FetchedItems, PageMeta,
};
