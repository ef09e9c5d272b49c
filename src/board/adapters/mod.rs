//! Adapter implementations for board ports.

pub mod http;
pub mod memory;
mod tracing_notifier;

pub use http::HttpContentRepository;
pub use memory::{InMemoryContentRepository, RecordingNotifier};
pub use tracing_notifier::TracingNotifier;
