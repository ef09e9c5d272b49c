//! Content items and their descriptive value types.

use super::{BoardDomainError, ContentId, ContentStatus, UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Social platform a content item targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// Instagram.
    #[serde(rename = "ig")]
    Instagram,
    /// `TikTok`.
    #[serde(rename = "tiktok")]
    TikTok,
    /// `YouTube`.
    #[serde(rename = "youtube")]
    YouTube,
}

impl Platform {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instagram => "ig",
            Self::TikTok => "tiktok",
            Self::YouTube => "youtube",
        }
    }
}

impl TryFrom<&str> for Platform {
    type Error = BoardDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ig" | "instagram" => Ok(Self::Instagram),
            "tiktok" => Ok(Self::TikTok),
            "youtube" => Ok(Self::YouTube),
            _ => Err(BoardDomainError::UnknownPlatform(value.to_owned())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editorial priority of a content item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Low priority.
    #[serde(rename = "low")]
    Low,
    /// Medium priority, the default for new content.
    #[default]
    #[serde(rename = "med")]
    Medium,
    /// High priority.
    #[serde(rename = "high")]
    High,
}

impl Priority {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "med",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = BoardDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "med" | "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(BoardDomainError::UnknownPriority(value.to_owned())),
        }
    }
}

/// Compact user reference embedded in content items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact e-mail.
    pub email: String,
}

/// Free-form copy attached to a content item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCopy {
    /// Opening hook.
    pub hook: Option<String>,
    /// Production script.
    pub script: Option<String>,
    /// Publication caption.
    pub caption: Option<String>,
    /// Hashtag line.
    pub hashtags: Option<String>,
}

/// Which date a card displays, depending on its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleLabel {
    /// Publication slot of a scheduled item.
    Schedule(DateTime<Utc>),
    /// Due date of any other item.
    Due(DateTime<Utc>),
}

impl ScheduleLabel {
    /// Returns the label prefix shown next to the date.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Schedule(_) => "Schedule",
            Self::Due(_) => "Due",
        }
    }

    /// Returns the labelled timestamp.
    #[must_use]
    pub const fn at(self) -> DateTime<Utc> {
        match self {
            Self::Schedule(at) | Self::Due(at) => at,
        }
    }
}

/// A piece of planned content shown as one card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    id: ContentId,
    workspace_id: WorkspaceId,
    platform: Platform,
    content_type: String,
    title: String,
    copy: ContentCopy,
    status: ContentStatus,
    priority: Option<Priority>,
    tags: Vec<String>,
    assignee_id: Option<UserId>,
    assignee: Option<UserSummary>,
    creator: Option<UserSummary>,
    due_at: Option<DateTime<Utc>>,
    scheduled_at: Option<DateTime<Utc>>,
    published_at: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl ContentItem {
    /// Creates an item with the required fields; everything else is empty.
    #[must_use]
    pub fn new(
        id: ContentId,
        workspace_id: WorkspaceId,
        platform: Platform,
        content_type: impl Into<String>,
        title: impl Into<String>,
        status: ContentStatus,
    ) -> Self {
        Self {
            id,
            workspace_id,
            platform,
            content_type: content_type.into(),
            title: title.into(),
            copy: ContentCopy::default(),
            status,
            priority: None,
            tags: Vec::new(),
            assignee_id: None,
            assignee: None,
            creator: None,
            due_at: None,
            scheduled_at: None,
            published_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets the free-form copy.
    #[must_use]
    pub fn with_copy(mut self, copy: ContentCopy) -> Self {
        self.copy = copy;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the assignee identifier without an embedded summary.
    #[must_use]
    pub const fn with_assignee_id(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the assignee summary and its identifier.
    #[must_use]
    pub fn with_assignee(mut self, assignee: UserSummary) -> Self {
        self.assignee_id = Some(assignee.id);
        self.assignee = Some(assignee);
        self
    }

    /// Sets the creator summary.
    #[must_use]
    pub fn with_creator(mut self, creator: UserSummary) -> Self {
        self.creator = Some(creator);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Sets the publication slot.
    #[must_use]
    pub const fn with_scheduled_at(mut self, scheduled_at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(scheduled_at);
        self
    }

    /// Sets the publication timestamp.
    #[must_use]
    pub const fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    /// Sets the server bookkeeping timestamps.
    #[must_use]
    pub const fn with_timestamps(
        mut self,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    /// Returns a copy of this item carrying `status`.
    #[must_use]
    pub fn with_status(&self, status: ContentStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Returns the item identifier.
    #[must_use]
    pub const fn id(&self) -> ContentId {
        self.id
    }

    /// Returns the owning workspace.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the target platform.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the content type, for example `reel` or `short`.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the free-form copy.
    #[must_use]
    pub const fn copy(&self) -> &ContentCopy {
        &self.copy
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> ContentStatus {
        self.status
    }

    /// Returns the priority, if set.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the assignee identifier, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns the embedded assignee summary, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&UserSummary> {
        self.assignee.as_ref()
    }

    /// Returns the assignee's display name, or `Unassigned`.
    #[must_use]
    pub fn assignee_name(&self) -> &str {
        self.assignee
            .as_ref()
            .map_or("Unassigned", |user| user.name.as_str())
    }

    /// Returns the embedded creator summary, if any.
    #[must_use]
    pub const fn creator(&self) -> Option<&UserSummary> {
        self.creator.as_ref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns the publication slot, if any.
    #[must_use]
    pub const fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        self.scheduled_at
    }

    /// Returns the publication timestamp, if any.
    #[must_use]
    pub const fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    /// Returns the creation timestamp, if the server sent one.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the last update timestamp, if the server sent one.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the date a card shows: the slot for scheduled items, the due
    /// date otherwise.
    #[must_use]
    pub fn schedule_label(&self) -> Option<ScheduleLabel> {
        match self.status {
            ContentStatus::Scheduled => self.scheduled_at.map(ScheduleLabel::Schedule),
            _ => self.due_at.map(ScheduleLabel::Due),
        }
    }
}

/// Server item whose status matches no board column.
///
/// Such items cannot be placed on the board. They are kept aside so callers
/// can surface them instead of silently losing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenItem {
    /// Item identifier.
    pub id: ContentId,
    /// Item title, when the server sent one.
    pub title: Option<String>,
    /// Raw status value as received.
    pub status: String,
}
