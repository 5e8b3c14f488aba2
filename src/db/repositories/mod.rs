//! Row storage ports and their Postgres implementations.
//!
//! Every user-scoped query filters on `user_id`, so one user can never read
//! or modify another user's rows through these traits.

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        ContentDetails, ContentId, ContentStatusRecord, Platform, PlatformAvailability,
        StatusPreference,
    },
};

pub mod content;
pub mod preferences;
pub mod status;

pub use content::PgContentRepository;
pub use preferences::PgPreferenceRepository;
pub use status::PgStatusRepository;

/// Locally cached content rows, platforms and availability
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
    /// Inserts or refreshes the row for `details`, returning its internal id
    async fn upsert_content(&self, details: &ContentDetails) -> AppResult<Uuid>;

    /// Internal id of the content addressed by `id`, if it has been stored
    async fn find_content_id(&self, id: &ContentId) -> AppResult<Option<Uuid>>;

    /// Platforms the content is recorded as available on
    async fn availability(&self, content_id: Uuid) -> AppResult<Vec<PlatformAvailability>>;

    /// Every known platform, ordered by name
    async fn list_platforms(&self) -> AppResult<Vec<Platform>>;
}

/// Per-user watch status rows, keyed on `(user_id, content_id)`
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait StatusRepository: Send + Sync {
    async fn get_status(
        &self,
        user_id: Uuid,
        content_id: Uuid,
    ) -> AppResult<Option<ContentStatusRecord>>;

    /// Insert-or-update on `(user_id, content_id)`; an existing `started_at` is kept
    async fn upsert_status(&self, record: &ContentStatusRecord) -> AppResult<ContentStatusRecord>;

    /// Removes the row if present
    async fn delete_status(&self, user_id: Uuid, content_id: Uuid) -> AppResult<()>;
}

/// Per-user status presentation overrides, keyed on `(user_id, status_key)`
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PreferenceRepository: Send + Sync {
    async fn list_preferences(&self, user_id: Uuid) -> AppResult<Vec<StatusPreference>>;

    async fn upsert_preference(
        &self,
        user_id: Uuid,
        preference: &StatusPreference,
    ) -> AppResult<StatusPreference>;

    /// Deletes every override of the user, returning how many were removed
    async fn delete_preferences(&self, user_id: Uuid) -> AppResult<u64>;
}
