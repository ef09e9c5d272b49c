//! Board columns, item lookup and the pure mutation primitives.
//!
//! Every mutation borrows the current board and returns a new one, so the
//! controller can keep the previous value around or discard the result.
//! After any mutation completes, each item sits in exactly one column and
//! its status equals that column's status.

use super::{ContentId, ContentItem, ContentStatus, DropTarget};
use serde::{Deserialize, Serialize};

/// Ordered list of items sharing one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    status: ContentStatus,
    items: Vec<ContentItem>,
}

impl Column {
    /// Creates an empty column for `status`.
    #[must_use]
    pub const fn empty(status: ContentStatus) -> Self {
        Self {
            status,
            items: Vec::new(),
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn status(&self) -> ContentStatus {
        self.status
    }

    /// Returns the column heading.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.status.title()
    }

    /// Returns the items in display order.
    #[must_use]
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Returns the item identifiers in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<ContentId> {
        self.items.iter().map(ContentItem::id).collect()
    }

    /// Returns the number of items in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the column holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position_of(&self, id: ContentId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

/// The five status columns of a workspace board, in fixed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: [Column; 5],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Creates a board with five empty columns.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            columns: ContentStatus::ALL.map(Column::empty),
        }
    }

    /// Groups a flat item list into columns by status.
    ///
    /// Relative input order is preserved inside each column.
    #[must_use]
    pub fn partition(items: impl IntoIterator<Item = ContentItem>) -> Self {
        let mut board = Self::empty();
        for item in items {
            board.column_mut(item.status()).items.push(item);
        }
        board
    }

    /// Concatenates all columns into one list, in column order.
    #[must_use]
    pub fn flatten(&self) -> Vec<ContentItem> {
        self.columns
            .iter()
            .flat_map(|column| column.items.iter().cloned())
            .collect()
    }

    /// Returns the columns in board order.
    #[must_use]
    pub const fn columns(&self) -> &[Column; 5] {
        &self.columns
    }

    /// Returns the column for `status`.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "the column array holds exactly one slot per status"
    )]
    pub const fn column(&self, status: ContentStatus) -> &Column {
        &self.columns[slot(status)]
    }

    /// Returns the item identifiers of the column for `status`.
    #[must_use]
    pub fn ids_in(&self, status: ContentStatus) -> Vec<ContentId> {
        self.column(status).ids()
    }

    /// Returns the total number of items on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Returns `true` when no column holds an item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Column::is_empty)
    }

    /// Returns the column currently holding `id`.
    #[must_use]
    pub fn find_column_of(&self, id: ContentId) -> Option<ContentStatus> {
        self.columns
            .iter()
            .find(|column| column.position_of(id).is_some())
            .map(Column::status)
    }

    /// Returns the item with identifier `id`.
    #[must_use]
    pub fn find_item(&self, id: ContentId) -> Option<&ContentItem> {
        self.columns
            .iter()
            .flat_map(|column| column.items.iter())
            .find(|item| item.id() == id)
    }

    /// Returns the position of `id` inside the column for `status`.
    #[must_use]
    pub fn index_of(&self, status: ContentStatus, id: ContentId) -> Option<usize> {
        self.column(status).position_of(id)
    }

    /// Resolves a drop target into its column and, for card drops, the card
    /// the dragged item should land before.
    ///
    /// Returns `None` when the target card is not on the board.
    #[must_use]
    pub fn resolve_target(
        &self,
        target: DropTarget,
    ) -> Option<(ContentStatus, Option<ContentId>)> {
        match target {
            DropTarget::Item(id) => self.find_column_of(id).map(|status| (status, Some(id))),
            DropTarget::Column(status) => Some((status, None)),
        }
    }

    /// Returns a board without `id`. Unchanged when `id` is absent.
    #[must_use]
    pub fn remove_item(&self, id: ContentId) -> Self {
        let mut next = self.clone();
        for column in &mut next.columns {
            column.items.retain(|item| item.id() != id);
        }
        next
    }

    /// Returns a board with `item` inserted into the column for `status`.
    ///
    /// `index` is clamped into `0..=len`. The inserted copy carries `status`.
    #[must_use]
    pub fn insert_at(&self, status: ContentStatus, index: usize, item: &ContentItem) -> Self {
        let mut next = self.clone();
        let column = next.column_mut(status);
        let clamped = index.min(column.items.len());
        column.items.insert(clamped, item.with_status(status));
        next
    }

    /// Moves `id` into the column for `to`.
    ///
    /// With `before` set and present in the target column, the item takes
    /// that card's position; otherwise it is appended. Unknown `id` returns
    /// the board unchanged.
    #[must_use]
    pub fn move_across(
        &self,
        id: ContentId,
        to: ContentStatus,
        before: Option<ContentId>,
    ) -> Self {
        let Some(moving) = self.find_item(id).cloned() else {
            return self.clone();
        };
        let cleaned = self.remove_item(id);
        let target = cleaned.column(to);
        let index = before
            .and_then(|before_id| target.position_of(before_id))
            .unwrap_or(target.len());
        cleaned.insert_at(to, index, &moving)
    }

    /// Moves the item at `from` to `to` within one column.
    ///
    /// Out-of-range indices return the board unchanged.
    #[must_use]
    pub fn reorder(&self, status: ContentStatus, from: usize, to: usize) -> Self {
        let column = self.column(status);
        if from >= column.len() || to >= column.len() || from == to {
            return self.clone();
        }
        let mut next = self.clone();
        let items = &mut next.column_mut(status).items;
        let moving = items.remove(from);
        items.insert(to, moving);
        next
    }

    /// Rebuilds one column in the order given by `ordered`.
    ///
    /// Identifiers not in the column are ignored; column items missing from
    /// `ordered` keep their relative order and are appended.
    #[must_use]
    pub fn reorder_by_ids(&self, status: ContentStatus, ordered: &[ContentId]) -> Self {
        let mut next = self.clone();
        let column = next.column_mut(status);
        let mut remaining = std::mem::take(&mut column.items);
        let mut items = Vec::with_capacity(remaining.len());
        for id in ordered {
            if let Some(position) = remaining.iter().position(|item| item.id() == *id) {
                items.push(remaining.remove(position));
            }
        }
        items.append(&mut remaining);
        column.items = items;
        next
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "the column array holds exactly one slot per status"
    )]
    const fn column_mut(&mut self, status: ContentStatus) -> &mut Column {
        &mut self.columns[slot(status)]
    }
}

/// Position of the column for `status`; matches `ContentStatus::ALL`.
const fn slot(status: ContentStatus) -> usize {
    match status {
        ContentStatus::Idea => 0,
        ContentStatus::Production => 1,
        ContentStatus::Review => 2,
        ContentStatus::Scheduled => 3,
        ContentStatus::Published => 4,
    }
}
