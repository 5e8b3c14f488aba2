/// Metadata provider abstraction
///
/// The service never talks to TMDB directly from handlers; everything goes
/// through [`MetadataProvider`] so handlers and services can be exercised
/// against fakes.
use crate::{
    error::AppResult,
    models::{
        CombinedCredits, ContentId, PersonDetails, TmdbDetails, TmdbRegionProviders,
        TmdbSearchPage,
    },
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie/TV metadata sources
///
/// Implementations return the provider's raw shapes; normalization into the
/// service's own types happens in the calling services. A missing item is
/// reported as `AppError::NotFound`, any other upstream failure as
/// `AppError::ExternalApi`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Multi-search across movies, TV and people
    async fn search_multi(&self, query: &str, page: u32) -> AppResult<TmdbSearchPage>;

    /// Movie or series details with credits and videos appended
    async fn content_details(&self, id: &ContentId) -> AppResult<TmdbDetails>;

    async fn person(&self, person_id: u64) -> AppResult<PersonDetails>;

    async fn combined_credits(&self, person_id: u64) -> AppResult<CombinedCredits>;

    /// Watch providers for one region, `None` when the title has none there
    async fn watch_providers(
        &self,
        id: &ContentId,
        region: &str,
    ) -> AppResult<Option<TmdbRegionProviders>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
