use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Kind of content a user can track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Movie,
    Series,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Series => "series",
        }
    }

    /// Path segment TMDB uses for this kind
    pub fn tmdb_path(&self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Series => "tv",
        }
    }

    /// Maps TMDB's `media_type` discriminator onto a local kind.
    ///
    /// Anything other than `movie` and `tv` (people, collections) has no local kind.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "movie" => Some(ContentKind::Movie),
            "tv" => Some(ContentKind::Series),
            _ => None,
        }
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = ContentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(ContentKind::Movie),
            "series" => Ok(ContentKind::Series),
            other => Err(ContentIdError::UnknownKind(other.to_string())),
        }
    }
}

/// Reasons a raw content identifier is rejected
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentIdError {
    #[error("Invalid content ID '{0}'. Expected: {{tmdbId}}-{{movie|series}}")]
    MissingKind(String),

    #[error("Invalid content ID: '{0}' is not a numeric TMDB id")]
    InvalidNumericId(String),

    #[error("Invalid content kind '{0}'. Expected: movie or series")]
    UnknownKind(String),
}

/// External identity of a piece of content: `{tmdbId}-{kind}`, e.g. `550-movie`.
///
/// TMDB ids are plain digits and never contain `-`, so decoding splits on the
/// first `-` only and the remainder must be exactly a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId {
    pub tmdb_id: u64,
    pub kind: ContentKind,
}

impl ContentId {
    pub fn new(tmdb_id: u64, kind: ContentKind) -> Self {
        Self { tmdb_id, kind }
    }

    /// Canonical string form
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parses the canonical string form
    pub fn decode(raw: &str) -> Result<Self, ContentIdError> {
        raw.parse()
    }
}

impl Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.tmdb_id, self.kind)
    }
}

impl FromStr for ContentId {
    type Err = ContentIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (id, kind) = raw
            .split_once('-')
            .ok_or_else(|| ContentIdError::MissingKind(raw.to_string()))?;

        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ContentIdError::InvalidNumericId(id.to_string()));
        }
        let tmdb_id = id
            .parse::<u64>()
            .map_err(|_| ContentIdError::InvalidNumericId(id.to_string()))?;

        Ok(Self {
            tmdb_id,
            kind: kind.parse()?,
        })
    }
}

impl Serialize for ContentId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
