// ============================================================================
// TMDB API Types
// ============================================================================
//
// Raw response shapes. TMDB names the same concept differently for movies and
// TV (`title`/`name`, `release_date`/`first_air_date`); nothing outside the
// normalizers should read those fields directly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::content::{CastMember, CrewMember, Genre};
use super::ContentKind;

/// Picks the movie or series variant of a dual-named TMDB field
pub fn by_kind<T>(kind: ContentKind, movie: T, series: T) -> T {
    match kind {
        ContentKind::Movie => movie,
        ContentKind::Series => series,
    }
}

/// `/search/multi` response page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbSearchPage {
    pub page: u32,
    #[serde(default)]
    pub results: Vec<TmdbSearchItem>,
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// One heterogeneous `/search/multi` hit (movie, tv or person)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TmdbSearchItem {
    pub id: u64,
    #[serde(default)]
    pub media_type: String,
    pub title: Option<String>,
    pub name: Option<String>,
    pub original_title: Option<String>,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
}

/// `/movie/{id}` or `/tv/{id}` with `append_to_response=credits,videos`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TmdbDetails {
    pub id: u64,
    pub imdb_id: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub original_title: Option<String>,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub vote_average: Option<f64>,
    pub credits: Option<TmdbCredits>,
    pub videos: Option<TmdbVideos>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbVideo {
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
}

/// `/{movie|tv}/{id}/watch/providers`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TmdbWatchProviders {
    #[serde(default)]
    pub results: HashMap<String, TmdbRegionProviders>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TmdbRegionProviders {
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Vec<TmdbProvider>,
    #[serde(default)]
    pub rent: Vec<TmdbProvider>,
    #[serde(default)]
    pub buy: Vec<TmdbProvider>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbProvider {
    pub provider_id: u64,
    pub provider_name: String,
    pub logo_path: Option<String>,
    #[serde(default)]
    pub display_priority: i32,
}
