//! Wire schema of the content endpoints.
//!
//! Listing: `{ "data": [Content, ...], "meta": PageMeta? }`.
//! Single item: `{ "data": Content }`.
//! Content: `id`, `workspace_id`, `platform`, `content_type`, `title` and
//! `status` are required; every other field may be absent or `null`.
//! Listing rows are decoded one at a time, so a row that breaks the schema
//! is reported as hidden instead of failing the listing.
//! Timestamps are RFC 3339 or `YYYY-MM-DD HH:MM:SS` (read as UTC).
//!
//! This is the only place response bodies are interpreted; the rest of the
//! crate sees domain types.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{
    domain::{
        ContentCopy, ContentId, ContentItem, ContentStatus, HiddenItem, NewContent, Platform,
        Priority, UserId, UserSummary, WorkspaceId,
    },
    ports::{ContentRepositoryError, FetchedItems, PageMeta},
};

const WIRE_DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";

/// Body of the listing endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope {
    data: Vec<serde_json::Value>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

/// Body of the create endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ItemEnvelope {
    data: WireContent,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: u64,
    name: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
struct WireContent {
    id: u64,
    workspace_id: u64,
    platform: String,
    content_type: String,
    title: String,
    status: String,
    #[serde(default)]
    hook: Option<String>,
    #[serde(default)]
    script: Option<String>,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    hashtags: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    assignee_id: Option<u64>,
    #[serde(default)]
    assignee: Option<WireUser>,
    #[serde(default)]
    creator: Option<WireUser>,
    #[serde(default)]
    due_at: Option<String>,
    #[serde(default)]
    scheduled_at: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

/// Body of the create endpoint request.
#[derive(Debug, Serialize)]
pub(crate) struct CreateBody<'a> {
    platform: Platform,
    content_type: &'a str,
    title: &'a str,
    status: ContentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scheduled_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a [String]>,
}

impl<'a> CreateBody<'a> {
    pub(crate) fn new(content: &'a NewContent) -> Self {
        Self {
            platform: content.platform,
            content_type: &content.content_type,
            title: &content.title,
            status: ContentStatus::Idea,
            priority: content.priority,
            due_at: content.due_at.map(format_wire_date_time),
            scheduled_at: content.scheduled_at.map(format_wire_date_time),
            assignee_id: content.assignee_id,
            tags: (!content.tags.is_empty()).then_some(content.tags.as_slice()),
        }
    }
}

/// Body of the move endpoint request.
#[derive(Debug, Serialize)]
pub(crate) struct MoveBody {
    status: ContentStatus,
}

impl MoveBody {
    pub(crate) const fn new(status: ContentStatus) -> Self {
        Self { status }
    }
}

fn format_wire_date_time(value: NaiveDateTime) -> String {
    value.format(WIRE_DATE_TIME).to_string()
}

fn parse_timestamp(field: &str, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let text = raw?.trim();
    if text.is_empty() {
        return None;
    }
    let parsed = DateTime::parse_from_rfc3339(text)
        .map(|stamp| stamp.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(text, WIRE_DATE_TIME).map(|naive| naive.and_utc()));
    match parsed {
        Ok(stamp) => Some(stamp),
        Err(err) => {
            debug!(field, value = text, error = %err, "ignoring unparsable timestamp");
            None
        }
    }
}

fn user_summary(user: WireUser) -> UserSummary {
    UserSummary {
        id: UserId::new(user.id),
        name: user.name,
        email: user.email,
    }
}

impl WireContent {
    fn hidden(&self, reason: &str) -> HiddenItem {
        warn!(
            id = self.id,
            status = %self.status,
            platform = %self.platform,
            reason,
            "content item cannot be placed on the board"
        );
        HiddenItem {
            id: ContentId::new(self.id),
            title: Some(self.title.clone()),
            status: self.status.clone(),
        }
    }

    fn into_domain(self) -> Result<ContentItem, Self> {
        let Ok(status) = ContentStatus::try_from(self.status.as_str()) else {
            return Err(self);
        };
        let Ok(platform) = Platform::try_from(self.platform.as_str()) else {
            return Err(self);
        };

        let mut item = ContentItem::new(
            ContentId::new(self.id),
            WorkspaceId::new(self.workspace_id),
            platform,
            self.content_type,
            self.title,
            status,
        )
        .with_copy(ContentCopy {
            hook: self.hook,
            script: self.script,
            caption: self.caption,
            hashtags: self.hashtags,
        })
        .with_tags(self.tags.unwrap_or_default())
        .with_timestamps(
            parse_timestamp("created_at", self.created_at.as_deref()),
            parse_timestamp("updated_at", self.updated_at.as_deref()),
        );

        if let Some(priority) = self
            .priority
            .as_deref()
            .and_then(|raw| Priority::try_from(raw).ok())
        {
            item = item.with_priority(priority);
        }
        if let Some(assignee) = self.assignee {
            item = item.with_assignee(user_summary(assignee));
        } else if let Some(assignee_id) = self.assignee_id {
            item = item.with_assignee_id(UserId::new(assignee_id));
        }
        if let Some(creator) = self.creator {
            item = item.with_creator(user_summary(creator));
        }
        if let Some(due_at) = parse_timestamp("due_at", self.due_at.as_deref()) {
            item = item.with_due_at(due_at);
        }
        if let Some(scheduled_at) = parse_timestamp("scheduled_at", self.scheduled_at.as_deref()) {
            item = item.with_scheduled_at(scheduled_at);
        }
        if let Some(published_at) = parse_timestamp("published_at", self.published_at.as_deref()) {
            item = item.with_published_at(published_at);
        }
        Ok(item)
    }
}

/// Describes a listing row that does not match [`WireContent`].
///
/// Rows without a numeric `id` cannot be referred to and yield `None`.
fn malformed_row(row: &serde_json::Value, err: &serde_json::Error) -> Option<HiddenItem> {
    let Some(id) = row.get("id").and_then(serde_json::Value::as_u64) else {
        warn!(error = %err, "dropping content row without an id");
        return None;
    };
    let status = match row.get("status") {
        Some(serde_json::Value::String(raw)) => raw.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    warn!(id, status = %status, error = %err, "content row does not match the wire schema");
    Some(HiddenItem {
        id: ContentId::new(id),
        title: row
            .get("title")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned),
        status,
    })
}

impl ListEnvelope {
    /// Splits the listing into placeable and hidden items.
    pub(crate) fn into_fetched(self) -> FetchedItems {
        let mut items = Vec::with_capacity(self.data.len());
        let mut hidden = Vec::new();
        for row in &self.data {
            match WireContent::deserialize(row) {
                Ok(wire) => match wire.into_domain() {
                    Ok(item) => items.push(item),
                    Err(rejected) => hidden.push(rejected.hidden("unknown status or platform")),
                },
                Err(err) => hidden.extend(malformed_row(row, &err)),
            }
        }
        FetchedItems {
            items,
            hidden,
            meta: self.meta,
        }
    }
}

impl ItemEnvelope {
    /// Converts a created item.
    ///
    /// # Errors
    ///
    /// Returns [`ContentRepositoryError::Decode`] when the status or
    /// platform is unknown.
    pub(crate) fn into_item(self) -> Result<ContentItem, ContentRepositoryError> {
        self.data.into_domain().map_err(|rejected| {
            ContentRepositoryError::Decode(format!(
                "created item {} has status '{}' and platform '{}'",
                rejected.id, rejected.status, rejected.platform
            ))
        })
    }
}
