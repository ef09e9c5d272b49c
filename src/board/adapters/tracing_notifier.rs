//! Notifier that forwards notices to the log.

use crate::board::ports::{Notice, NoticeLevel, Notifier};
use tracing::{info, warn};

/// Writes notices as `tracing` events; used by headless clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(message = %notice.message, "board notice"),
            NoticeLevel::Error => warn!(message = %notice.message, "board notice"),
        }
    }
}
