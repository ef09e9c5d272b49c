//! Adapter implementations for session ports.

pub mod http;
pub mod memory;

pub use http::HttpAuthGateway;
pub use memory::InMemoryTokenStore;
