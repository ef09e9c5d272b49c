//! In-memory adapters for the content board.

mod content;
mod notifier;

pub use content::InMemoryContentRepository;
pub use notifier::RecordingNotifier;
