#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue};
use axum_test::TestServer;
use serde_json::Map;
use tokio::sync::RwLock;
use uuid::Uuid;

use watch_buddy_api::{
    auth::{AuthUser, SessionVerifier},
    create_router,
    db::repositories::{ContentRepository, PreferenceRepository, StatusRepository},
    error::{AppError, AppResult},
    models::{
        CastMember, CombinedCredits, ContentDetails, ContentId, ContentKind,
        ContentStatusRecord, CreditEntry, Genre, PersonDetails, Platform, PlatformAvailability,
        StatusKey, StatusPreference, TmdbCredits, TmdbDetails, TmdbProvider,
        TmdbRegionProviders, TmdbSearchItem, TmdbSearchPage, TmdbVideo, TmdbVideos,
    },
    services::MetadataProvider,
    AppState,
};

pub const TOKEN_ALICE: &str = "token-alice";
pub const TOKEN_BOB: &str = "token-bob";

pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    )
}

// ============================================================================
// Sessions
// ============================================================================

pub struct FakeSessions {
    users: HashMap<String, AuthUser>,
}

impl FakeSessions {
    pub fn new() -> Self {
        let mut users = HashMap::new();
        for (token, email) in [(TOKEN_ALICE, "alice@example.com"), (TOKEN_BOB, "bob@example.com")] {
            users.insert(
                token.to_string(),
                AuthUser {
                    id: Uuid::new_v4(),
                    email: Some(email.to_string()),
                },
            );
        }
        Self { users }
    }
}

#[async_trait::async_trait]
impl SessionVerifier for FakeSessions {
    async fn lookup(&self, token: &str) -> AppResult<Option<AuthUser>> {
        Ok(self.users.get(token).cloned())
    }
}

// ============================================================================
// Metadata
// ============================================================================

pub struct FakeMetadata;

fn credit(id: u64, title: &str, popularity: f64, vote_average: f64, votes: u64) -> CreditEntry {
    let mut extra = Map::new();
    extra.insert("title".to_string(), title.into());
    extra.insert("media_type".to_string(), "movie".into());
    CreditEntry {
        id,
        popularity,
        vote_average: Some(vote_average),
        vote_count: Some(votes),
        extra,
    }
}

#[async_trait::async_trait]
impl MetadataProvider for FakeMetadata {
    async fn search_multi(&self, query: &str, page: u32) -> AppResult<TmdbSearchPage> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput("Search query cannot be empty".to_string()));
        }

        Ok(TmdbSearchPage {
            page,
            total_pages: 5,
            total_results: 97,
            results: vec![
                TmdbSearchItem {
                    id: 550,
                    media_type: "movie".to_string(),
                    title: Some("Fight Club".to_string()),
                    original_title: Some("Fight Club".to_string()),
                    release_date: Some("1999-10-15".to_string()),
                    vote_average: Some(8.4),
                    genre_ids: vec![18],
                    ..Default::default()
                },
                TmdbSearchItem {
                    id: 287,
                    media_type: "person".to_string(),
                    name: Some("Brad Pitt".to_string()),
                    ..Default::default()
                },
                TmdbSearchItem {
                    id: 1399,
                    media_type: "tv".to_string(),
                    name: Some("Game of Thrones".to_string()),
                    original_name: Some("Game of Thrones".to_string()),
                    first_air_date: Some("2011-04-17".to_string()),
                    vote_average: Some(8.5),
                    ..Default::default()
                },
            ],
        })
    }

    async fn content_details(&self, id: &ContentId) -> AppResult<TmdbDetails> {
        match (id.tmdb_id, id.kind) {
            (550, ContentKind::Movie) => Ok(TmdbDetails {
                id: 550,
                imdb_id: Some("tt0137523".to_string()),
                title: Some("Fight Club".to_string()),
                original_title: Some("Fight Club".to_string()),
                release_date: Some("1999-10-15".to_string()),
                runtime: Some(139),
                genres: vec![Genre {
                    id: 18,
                    name: "Drama".to_string(),
                }],
                vote_average: Some(8.4),
                credits: Some(TmdbCredits {
                    cast: vec![CastMember {
                        id: 287,
                        name: "Brad Pitt".to_string(),
                        character: Some("Tyler Durden".to_string()),
                        profile_path: None,
                        order: 1,
                    }],
                    crew: vec![],
                }),
                videos: Some(TmdbVideos {
                    results: vec![TmdbVideo {
                        key: "qtRKdVHc-cE".to_string(),
                        name: "Trailer".to_string(),
                        site: "YouTube".to_string(),
                        video_type: "Trailer".to_string(),
                        official: true,
                    }],
                }),
                ..Default::default()
            }),
            (1399, ContentKind::Series) => Ok(TmdbDetails {
                id: 1399,
                name: Some("Game of Thrones".to_string()),
                first_air_date: Some("2011-04-17".to_string()),
                episode_run_time: vec![60],
                vote_average: Some(8.5),
                ..Default::default()
            }),
            _ => Err(AppError::NotFound(format!("TMDB resource {} not found", id))),
        }
    }

    async fn person(&self, person_id: u64) -> AppResult<PersonDetails> {
        if person_id != 287 {
            return Err(AppError::NotFound(format!("Person {} not found", person_id)));
        }

        Ok(PersonDetails {
            id: 287,
            name: "Brad Pitt".to_string(),
            biography: Some("An actor.".to_string()),
            profile_path: None,
            known_for_department: Some("Acting".to_string()),
            extra: Map::new(),
        })
    }

    async fn combined_credits(&self, _person_id: u64) -> AppResult<CombinedCredits> {
        Ok(CombinedCredits {
            cast: vec![
                credit(1, "Low Rated", 10.0, 5.0, 20),
                credit(2, "High Rated", 10.0, 8.0, 50),
                credit(3, "Most Popular", 20.0, 1.0, 15),
                credit(4, "Obscure", 500.0, 9.9, 5),
            ],
            crew: vec![credit(5, "Produced", 3.0, 6.0, 40)],
        })
    }

    async fn watch_providers(
        &self,
        id: &ContentId,
        region: &str,
    ) -> AppResult<Option<TmdbRegionProviders>> {
        if id.tmdb_id != 550 || region != "IN" {
            return Ok(None);
        }

        Ok(Some(TmdbRegionProviders {
            link: Some("https://www.themoviedb.org/movie/550/watch?locale=IN".to_string()),
            flatrate: vec![TmdbProvider {
                provider_id: 119,
                provider_name: "Amazon Prime Video".to_string(),
                logo_path: None,
                display_priority: 1,
            }],
            rent: vec![],
            buy: vec![TmdbProvider {
                provider_id: 2,
                provider_name: "Apple TV".to_string(),
                logo_path: None,
                display_priority: 4,
            }],
        }))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

// ============================================================================
// Store
// ============================================================================

#[derive(Default)]
struct StoreInner {
    content: HashMap<(u64, ContentKind), Uuid>,
    platforms: Vec<Platform>,
    availability: HashMap<Uuid, Vec<PlatformAvailability>>,
    statuses: HashMap<(Uuid, Uuid), ContentStatusRecord>,
    preferences: HashMap<(Uuid, StatusKey), StatusPreference>,
}

pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        let platforms = ["Netflix", "Amazon Prime Video", "Zee5", "Apple TV+"]
            .iter()
            .map(|name| Platform {
                id: Uuid::new_v4(),
                name: name.to_string(),
                logo_url: None,
                website_url: None,
            })
            .collect();

        Self {
            inner: RwLock::new(StoreInner {
                platforms,
                ..Default::default()
            }),
        }
    }
}

#[async_trait::async_trait]
impl ContentRepository for InMemoryStore {
    async fn upsert_content(&self, details: &ContentDetails) -> AppResult<Uuid> {
        let mut inner = self.inner.write().await;
        let key = (details.tmdb_id, details.content_type);
        if let Some(id) = inner.content.get(&key) {
            return Ok(*id);
        }

        let id = Uuid::new_v4();
        inner.content.insert(key, id);

        // Every stored title is recorded as streaming on the first platform
        let platform = inner.platforms[0].clone();
        inner.availability.insert(
            id,
            vec![PlatformAvailability {
                platform,
                availability_type: "subscription".to_string(),
                url: None,
            }],
        );

        Ok(id)
    }

    async fn find_content_id(&self, id: &ContentId) -> AppResult<Option<Uuid>> {
        let inner = self.inner.read().await;
        Ok(inner.content.get(&(id.tmdb_id, id.kind)).copied())
    }

    async fn availability(&self, content_id: Uuid) -> AppResult<Vec<PlatformAvailability>> {
        let inner = self.inner.read().await;
        Ok(inner.availability.get(&content_id).cloned().unwrap_or_default())
    }

    async fn list_platforms(&self) -> AppResult<Vec<Platform>> {
        let inner = self.inner.read().await;
        let mut platforms = inner.platforms.clone();
        platforms.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(platforms)
    }
}

#[async_trait::async_trait]
impl StatusRepository for InMemoryStore {
    async fn get_status(
        &self,
        user_id: Uuid,
        content_id: Uuid,
    ) -> AppResult<Option<ContentStatusRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.statuses.get(&(user_id, content_id)).cloned())
    }

    async fn upsert_status(&self, record: &ContentStatusRecord) -> AppResult<ContentStatusRecord> {
        let mut inner = self.inner.write().await;
        let key = (record.user_id, record.content_id);

        let mut stored = record.clone();
        if let Some(existing) = inner.statuses.get(&key) {
            stored.started_at = existing.started_at.or(record.started_at);
        }
        inner.statuses.insert(key, stored.clone());

        Ok(stored)
    }

    async fn delete_status(&self, user_id: Uuid, content_id: Uuid) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.statuses.remove(&(user_id, content_id));
        Ok(())
    }
}

#[async_trait::async_trait]
impl PreferenceRepository for InMemoryStore {
    async fn list_preferences(&self, user_id: Uuid) -> AppResult<Vec<StatusPreference>> {
        let inner = self.inner.read().await;
        let mut preferences: Vec<StatusPreference> = inner
            .preferences
            .iter()
            .filter(|((owner, _), _)| *owner == user_id)
            .map(|(_, p)| p.clone())
            .collect();
        preferences.sort_by_key(|p| p.status_key);
        Ok(preferences)
    }

    async fn upsert_preference(
        &self,
        user_id: Uuid,
        preference: &StatusPreference,
    ) -> AppResult<StatusPreference> {
        let mut inner = self.inner.write().await;
        inner
            .preferences
            .insert((user_id, preference.status_key), preference.clone());
        Ok(preference.clone())
    }

    async fn delete_preferences(&self, user_id: Uuid) -> AppResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.preferences.len();
        inner.preferences.retain(|(owner, _), _| *owner != user_id);
        Ok((before - inner.preferences.len()) as u64)
    }
}

// ============================================================================
// Server
// ============================================================================

pub fn create_test_server() -> TestServer {
    let store = Arc::new(InMemoryStore::new());

    let state = Arc::new(AppState {
        metadata: Arc::new(FakeMetadata),
        sessions: Arc::new(FakeSessions::new()),
        content: store.clone(),
        statuses: store.clone(),
        preferences: store,
        watch_region: "IN".to_string(),
    });

    TestServer::new(create_router(state)).unwrap()
}
