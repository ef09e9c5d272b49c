//! REST adapter for the content board.

mod repository;
mod wire;

pub use repository::HttpContentRepository;
