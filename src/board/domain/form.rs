//! Content creation form and its validation.

use super::{Platform, Priority, UserId};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field name of the title input.
pub const FIELD_TITLE: &str = "title";
/// Field name of the platform input.
pub const FIELD_PLATFORM: &str = "platform";
/// Field name of the content type input.
pub const FIELD_CONTENT_TYPE: &str = "content_type";
/// Field name of the due date input.
pub const FIELD_DUE_AT: &str = "due_at";
/// Field name of the publication slot input.
pub const FIELD_SCHEDULED_AT: &str = "scheduled_at";

/// Fields whose messages are reported first, in this order.
const REPORT_ORDER: [&str; 3] = [FIELD_TITLE, FIELD_PLATFORM, FIELD_CONTENT_TYPE];

const DEFAULT_TIME: &str = "09:00";

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` against `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Returns the messages recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` when `field` has at least one message.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    /// Returns the field names that carry messages.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns `true` when no field has a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Returns the message to show a user: title, platform and content type
    /// first, then any other field.
    #[must_use]
    pub fn first_message(&self) -> Option<&str> {
        REPORT_ORDER
            .iter()
            .find_map(|field| self.get(field).first())
            .or_else(|| self.0.values().find_map(|messages| messages.first()))
            .map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.first_message().unwrap_or("validation failed"))
    }
}

/// Raw input of the "new content" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentForm {
    /// Title as typed.
    pub title: String,
    /// Selected platform.
    pub platform: Option<Platform>,
    /// Selected content type.
    pub content_type: String,
    /// Selected priority; `Medium` when unset.
    pub priority: Option<Priority>,
    /// Selected assignee.
    pub assignee: Option<UserId>,
    /// Due date as `YYYY-MM-DD`.
    pub due_date: String,
    /// Due time as `HH:MM`; `09:00` when blank.
    pub due_time: String,
    /// Publication date as `YYYY-MM-DD`.
    pub scheduled_date: String,
    /// Publication time as `HH:MM`; `09:00` when blank.
    pub scheduled_time: String,
    /// Selected tags.
    pub tags: Vec<String>,
}

impl ContentForm {
    /// Creates a form with the required text inputs filled in.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        platform: Platform,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            platform: Some(platform),
            content_type: content_type.into(),
            ..Self::default()
        }
    }

    /// Sets the due date and time inputs.
    #[must_use]
    pub fn with_due(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.due_date = date.into();
        self.due_time = time.into();
        self
    }

    /// Sets the publication date and time inputs.
    #[must_use]
    pub fn with_schedule(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.scheduled_date = date.into();
        self.scheduled_time = time.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Checks the form and builds the create payload.
    ///
    /// # Errors
    ///
    /// Returns every failing field: a blank title, a missing platform or
    /// content type, unparsable dates or times, or neither a due date nor a
    /// publication date.
    pub fn validate(&self) -> Result<NewContent, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = self.title.trim();
        if title.is_empty() {
            errors.add(FIELD_TITLE, "title is required");
        }
        if self.platform.is_none() {
            errors.add(FIELD_PLATFORM, "select a platform");
        }
        let content_type = self.content_type.trim();
        if content_type.is_empty() {
            errors.add(FIELD_CONTENT_TYPE, "select a content type");
        }

        let due_at = parse_slot(&mut errors, FIELD_DUE_AT, &self.due_date, &self.due_time);
        let scheduled_at = parse_slot(
            &mut errors,
            FIELD_SCHEDULED_AT,
            &self.scheduled_date,
            &self.scheduled_time,
        );
        if self.due_date.trim().is_empty() && self.scheduled_date.trim().is_empty() {
            errors.add(FIELD_DUE_AT, "set a due date or a schedule");
            errors.add(FIELD_SCHEDULED_AT, "set a due date or a schedule");
        }

        match self.platform {
            Some(platform) if errors.is_empty() => Ok(NewContent {
                platform,
                content_type: content_type.to_owned(),
                title: title.to_owned(),
                priority: Some(self.priority.unwrap_or_default()),
                due_at,
                scheduled_at,
                assignee_id: self.assignee,
                tags: self.tags.clone(),
            }),
            _ => Err(errors),
        }
    }
}

fn parse_slot(
    errors: &mut FieldErrors,
    field: &str,
    date: &str,
    time: &str,
) -> Option<NaiveDateTime> {
    match combine_date_time(date, time) {
        Ok(slot) => slot,
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

/// Combines a `YYYY-MM-DD` date and an `HH:MM` time.
///
/// A blank date yields `Ok(None)`; a blank time means `09:00`.
///
/// # Errors
///
/// Returns a user-facing message when either part does not parse.
pub fn combine_date_time(date: &str, time: &str) -> Result<Option<NaiveDateTime>, String> {
    let date_text = date.trim();
    if date_text.is_empty() {
        return Ok(None);
    }
    let time_text = match time.trim() {
        "" => DEFAULT_TIME,
        other => other,
    };
    let day = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{date_text}', expected YYYY-MM-DD"))?;
    let clock = NaiveTime::parse_from_str(time_text, "%H:%M")
        .map_err(|_| format!("invalid time '{time_text}', expected HH:MM"))?;
    Ok(Some(day.and_time(clock)))
}

/// Validated payload for creating a content item.
///
/// New items always start in the `idea` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContent {
    /// Target platform.
    pub platform: Platform,
    /// Content type.
    pub content_type: String,
    /// Trimmed title.
    pub title: String,
    /// Priority.
    pub priority: Option<Priority>,
    /// Due date in workspace local time.
    pub due_at: Option<NaiveDateTime>,
    /// Publication slot in workspace local time.
    pub scheduled_at: Option<NaiveDateTime>,
    /// Assignee.
    pub assignee_id: Option<UserId>,
    /// Tags.
    pub tags: Vec<String>,
}
