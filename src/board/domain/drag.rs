//! Drag gesture state and outcomes.

use super::{ContentId, ContentStatus};

/// What the pointer is over while dragging or when the card is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// Another card; the dragged card lands at its position.
    Item(ContentId),
    /// The body of a column; the dragged card lands at the end.
    Column(ContentStatus),
}

impl DropTarget {
    /// Parses a droppable identifier as emitted by the drag layer.
    ///
    /// Numeric identifiers name cards, status names name columns. Anything
    /// else yields `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Ok(id) = trimmed.parse::<u64>() {
            return Some(Self::Item(ContentId::new(id)));
        }
        ContentStatus::try_from(trimmed).ok().map(Self::Column)
    }
}

/// Drag state machine of the board controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A card is being dragged.
    Dragging {
        /// Card being dragged.
        item: ContentId,
        /// Column the card occupied when the gesture started.
        origin: ContentStatus,
    },
}

impl DragState {
    /// Returns the dragged card, if a gesture is in progress.
    #[must_use]
    pub const fn active_item(self) -> Option<ContentId> {
        match self {
            Self::Idle => None,
            Self::Dragging { item, .. } => Some(item),
        }
    }
}

/// Result of finishing a drag gesture or a quick status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing changed.
    NoOp,
    /// The card changed position inside its column.
    Reordered {
        /// Column that was reordered.
        status: ContentStatus,
        /// Previous index of the card.
        from: usize,
        /// New index of the card.
        to: usize,
    },
    /// The card changed column and the backend accepted the move.
    Moved {
        /// Card that moved.
        item: ContentId,
        /// Column the card left.
        from: ContentStatus,
        /// Column the card entered.
        to: ContentStatus,
    },
    /// The backend rejected the move and the card went back to where it
    /// started.
    RolledBack {
        /// Card whose move was rejected.
        item: ContentId,
        /// Column the move targeted.
        to: ContentStatus,
    },
}
