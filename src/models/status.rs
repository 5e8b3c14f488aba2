use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use uuid::Uuid;

use super::ContentId;

/// Watch-progress state of a user's relationship with a piece of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKey {
    ToWatch,
    Watching,
    Watched,
}

impl StatusKey {
    pub const ALL: [StatusKey; 3] = [StatusKey::ToWatch, StatusKey::Watching, StatusKey::Watched];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKey::ToWatch => "to_watch",
            StatusKey::Watching => "watching",
            StatusKey::Watched => "watched",
        }
    }

    /// Whether reaching this status means the user has begun watching
    pub fn is_started(&self) -> bool {
        matches!(self, StatusKey::Watching | StatusKey::Watched)
    }
}

impl Display for StatusKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to_watch" => Ok(StatusKey::ToWatch),
            "watching" => Ok(StatusKey::Watching),
            "watched" => Ok(StatusKey::Watched),
            other => Err(format!("Invalid status '{}'", other)),
        }
    }
}

impl TryFrom<String> for StatusKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Glyphs a user may pick for a status
pub const ICON_PALETTE: [&str; 10] = [
    "📌", "▶️", "✅", "⭐", "❤️", "👀", "🎬", "📺", "🍿", "🎭",
];

/// Color names a user may pick for a status
pub const COLOR_PALETTE: [&str; 8] = [
    "blue", "green", "yellow", "red", "purple", "pink", "indigo", "orange",
];

/// User-facing presentation of a status key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPreference {
    pub status_key: StatusKey,
    pub custom_label: String,
    pub icon: String,
    pub color: String,
}

impl StatusPreference {
    /// Built-in presentation used when the user has not customized `key`
    pub fn default_for(key: StatusKey) -> Self {
        let (label, icon, color) = match key {
            StatusKey::ToWatch => ("Want to Watch", "📌", "blue"),
            StatusKey::Watching => ("Watching", "▶️", "yellow"),
            StatusKey::Watched => ("Watched", "✅", "green"),
        };

        Self {
            status_key: key,
            custom_label: label.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }
}

/// Presentation for every status key.
///
/// One field per key, so a consumer never has to handle a missing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPreferences {
    pub to_watch: StatusPreference,
    pub watching: StatusPreference,
    pub watched: StatusPreference,
}

impl ResolvedPreferences {
    pub fn get(&self, key: StatusKey) -> &StatusPreference {
        match key {
            StatusKey::ToWatch => &self.to_watch,
            StatusKey::Watching => &self.watching,
            StatusKey::Watched => &self.watched,
        }
    }
}

impl Default for ResolvedPreferences {
    fn default() -> Self {
        Self {
            to_watch: StatusPreference::default_for(StatusKey::ToWatch),
            watching: StatusPreference::default_for(StatusKey::Watching),
            watched: StatusPreference::default_for(StatusKey::Watched),
        }
    }
}

/// A user's tracked status for one piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentStatusRecord {
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub status: StatusKey,
    pub rating: Option<f64>,
    pub notes: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Status as returned to the caller, addressed by the external content id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusView {
    pub content_id: ContentId,
    pub status: StatusKey,
    pub rating: Option<f64>,
    pub notes: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl StatusView {
    pub fn new(content_id: ContentId, record: ContentStatusRecord) -> Self {
        Self {
            content_id,
            status: record.status,
            rating: record.rating,
            notes: record.notes,
            started_at: record.started_at,
            completed_at: record.completed_at,
            updated_at: record.updated_at,
        }
    }
}

/// Validated status change requested by a user
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub status: StatusKey,
    pub rating: Option<f64>,
    pub notes: Option<String>,
}
