/// TMDB v3 metadata provider
///
/// Every response is cached in Redis for 24 hours, keyed by request.
///
/// API Flow:
/// 1. Search: /search/multi → movies, TV and people mixed
/// 2. Details: /{movie|tv}/{id}?append_to_response=credits,videos
/// 3. Person: /person/{id} and /person/{id}/combined_credits
/// 4. Availability: /{movie|tv}/{id}/watch/providers → per-region providers
use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{
        CombinedCredits, ContentId, PersonDetails, TmdbDetails, TmdbRegionProviders,
        TmdbSearchPage, TmdbWatchProviders,
    },
    services::providers::MetadataProvider,
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;

/// 24 hours
pub const METADATA_CACHE_TTL: u64 = 86_400;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Cache,
}

impl TmdbProvider {
    pub fn new(cache: Cache, api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// GETs `path` and decodes the JSON body; 404 maps to `NotFound`
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(self.url(path))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("TMDB resource {} not found", path)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(error = %e, path = %path, "Failed to deserialize TMDB response");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    #[instrument(skip(self), fields(provider = "tmdb"))]
    async fn search_multi(&self, query: &str, page: u32) -> AppResult<TmdbSearchPage> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        cached!(
            self.cache,
            CacheKey::Search {
                query: query.to_string(),
                page,
            },
            METADATA_CACHE_TTL,
            async move {
                let params = [
                    ("query", query.to_string()),
                    ("page", page.to_string()),
                    ("include_adult", "false".to_string()),
                ];
                let results: TmdbSearchPage = self.get_json("/search/multi", &params).await?;

                tracing::info!(
                    query = %query,
                    page = page,
                    results = results.results.len(),
                    "Search completed"
                );

                Ok::<_, AppError>(results)
            }
        )
    }

    #[instrument(skip(self), fields(provider = "tmdb"))]
    async fn content_details(&self, id: &ContentId) -> AppResult<TmdbDetails> {
        cached!(
            self.cache,
            CacheKey::Content(*id),
            METADATA_CACHE_TTL,
            async move {
                let path = format!("/{}/{}", id.kind.tmdb_path(), id.tmdb_id);
                let params = [("append_to_response", "credits,videos".to_string())];
                let details: TmdbDetails = self.get_json(&path, &params).await?;

                tracing::info!(content_id = %id, "Details fetched");

                Ok::<_, AppError>(details)
            }
        )
    }

    #[instrument(skip(self), fields(provider = "tmdb"))]
    async fn person(&self, person_id: u64) -> AppResult<PersonDetails> {
        cached!(
            self.cache,
            CacheKey::Person(person_id),
            METADATA_CACHE_TTL,
            async move {
                let path = format!("/person/{}", person_id);
                self.get_json::<PersonDetails>(&path, &[]).await
            }
        )
    }

    #[instrument(skip(self), fields(provider = "tmdb"))]
    async fn combined_credits(&self, person_id: u64) -> AppResult<CombinedCredits> {
        cached!(
            self.cache,
            CacheKey::PersonCredits(person_id),
            METADATA_CACHE_TTL,
            async move {
                let path = format!("/person/{}/combined_credits", person_id);
                self.get_json::<CombinedCredits>(&path, &[]).await
            }
        )
    }

    #[instrument(skip(self), fields(provider = "tmdb"))]
    async fn watch_providers(
        &self,
        id: &ContentId,
        region: &str,
    ) -> AppResult<Option<TmdbRegionProviders>> {
        let region = region.to_uppercase();
        let all: AppResult<TmdbWatchProviders> = cached!(
            self.cache,
            CacheKey::WatchProviders {
                id: *id,
                region: region.clone(),
            },
            METADATA_CACHE_TTL,
            async move {
                let path = format!("/{}/{}/watch/providers", id.kind.tmdb_path(), id.tmdb_id);
                self.get_json::<TmdbWatchProviders>(&path, &[]).await
            }
        );

        let mut all = all?;
        Ok(all.results.remove(&region))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider(api_url: &str) -> TmdbProvider {
        let client = redis::Client::open("redis://localhost:6379").unwrap();
        let (cache, _handle) = Cache::new(client);
        TmdbProvider::new(cache, "test_key".to_string(), api_url.to_string())
    }

    #[tokio::test]
    async fn test_url_trims_trailing_slash() {
        let provider = create_test_provider("http://test.local/3/");
        assert_eq!(provider.url("/search/multi"), "http://test.local/3/search/multi");
    }

    #[tokio::test]
    async fn test_empty_query_rejected_before_any_io() {
        let provider = create_test_provider("http://test.local/3");
        let result = provider.search_multi("   ", 1).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_unreachable_cache_does_not_fail_lookup() {
        // Neither Redis nor TMDB is listening; the error must come from the HTTP call
        let client = redis::Client::open("redis://127.0.0.1:1").unwrap();
        let (cache, _handle) = Cache::new(client);
        let provider =
            TmdbProvider::new(cache, "test_key".to_string(), "http://127.0.0.1:1/3".to_string());

        let result = provider.search_multi("fight", 1).await;
        assert!(matches!(result, Err(AppError::HttpClient(_))));
    }

    #[tokio::test]
    async fn test_provider_name() {
        let provider = create_test_provider("http://test.local/3");
        assert_eq!(provider.name(), "tmdb");
    }
}
