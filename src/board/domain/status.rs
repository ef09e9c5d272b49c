//! Content status and the fixed column order of the board.

use super::ParseContentStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow status of a content item. Each status is one board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    /// Raw idea, the entry column for new content.
    Idea,
    /// Content is being produced.
    Production,
    /// Content is awaiting review.
    Review,
    /// Content has a publication slot.
    Scheduled,
    /// Content is live.
    Published,
}

impl ContentStatus {
    /// Every status in board column order.
    pub const ALL: [Self; 5] = [
        Self::Idea,
        Self::Production,
        Self::Review,
        Self::Scheduled,
        Self::Published,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::Production => "production",
            Self::Review => "review",
            Self::Scheduled => "scheduled",
            Self::Published => "published",
        }
    }

    /// Returns the column heading shown on the board.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Idea => "Idea",
            Self::Production => "Production",
            Self::Review => "Review",
            Self::Scheduled => "Scheduled",
            Self::Published => "Published",
        }
    }
}

impl TryFrom<&str> for ContentStatus {
    type Error = ParseContentStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "idea" => Ok(Self::Idea),
            "production" => Ok(Self::Production),
            "review" => Ok(Self::Review),
            "scheduled" => Ok(Self::Scheduled),
            "published" => Ok(Self::Published),
            _ => Err(ParseContentStatusError(value.to_owned())),
        }
    }
}

impl FromStr for ContentStatus {
    type Err = ParseContentStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
