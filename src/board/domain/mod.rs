//! Domain model for the content board.
//!
//! Pure types and functions only: statuses and items, the five-column
//! board with its lookup and mutation primitives, drag gesture state and
//! the content creation form. Nothing here performs I/O.

mod board;
mod drag;
mod error;
mod form;
mod ids;
mod item;
mod status;

pub use board::{Board, Column};
pub use drag::{DragOutcome, DragState, DropTarget};
pub use error::{BoardDomainError, ParseContentStatusError};
pub use form::{
    ContentForm, FIELD_CONTENT_TYPE, FIELD_DUE_AT, FIELD_PLATFORM, FIELD_SCHEDULED_AT,
    FIELD_TITLE, FieldErrors, NewContent, combine_date_time,
};
pub use ids::{ContentId, UserId, WorkspaceId};
pub use item::{
    ContentCopy, ContentItem, HiddenItem, Platform, Priority, ScheduleLabel, UserSummary,
};
pub use status::ContentStatus;
