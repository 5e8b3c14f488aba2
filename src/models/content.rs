use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ContentId, ContentKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    pub tmdb: f64,
}

/// Normalized movie or series details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDetails {
    pub tmdb_id: u64,
    pub imdb_id: Option<String>,
    pub title: String,
    pub original_title: Option<String>,
    pub content_type: ContentKind,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub genres: Vec<Genre>,
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
    pub ratings: Ratings,
    pub trailer_url: Option<String>,
}

/// Uniform projection of a movie or series search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: u64,
    pub tmdb_id: u64,
    pub title: String,
    pub original_title: Option<String>,
    pub content_type: ContentKind,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f64,
    pub genre_ids: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResultItem>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: usize,
}

/// Streaming platform known to the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
}

/// Locally recorded availability of a content item on a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformAvailability {
    pub platform: Platform,
    pub availability_type: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchProvider {
    pub provider_id: u64,
    pub provider_name: String,
    pub logo_path: Option<String>,
    pub display_priority: i32,
    /// Local platform name this provider corresponds to
    pub platform_name: String,
}

/// Where a title can be watched in one region, as reported by TMDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalProviders {
    pub region: String,
    pub link: Option<String>,
    pub streaming: Vec<WatchProvider>,
    pub rent: Vec<WatchProvider>,
    pub buy: Vec<WatchProvider>,
}

/// Response body of the content detail endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ContentResponse {
    pub id: ContentId,
    #[serde(flatten)]
    pub details: ContentDetails,
    pub availability: Vec<PlatformAvailability>,
    pub watch_providers: Option<RegionalProviders>,
}
