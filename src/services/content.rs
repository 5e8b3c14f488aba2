use crate::{
    db::repositories::ContentRepository,
    error::AppResult,
    models::{
        tmdb::by_kind, ContentDetails, ContentId, ContentKind, ContentResponse, Ratings,
        RegionalProviders, TmdbDetails, TmdbProvider, TmdbRegionProviders, TmdbVideo,
        WatchProvider,
    },
    services::providers::MetadataProvider,
};

/// TMDB provider names that differ from the local platform names
const PROVIDER_ALIASES: &[(&str, &str)] = &[
    ("Disney Plus", "Disney+ Hotstar"),
    ("Apple TV Plus", "Apple TV+"),
    ("Apple TV", "Apple TV+"),
    ("Paramount Plus", "Paramount+"),
    ("Sony Liv", "Sony LIV"),
    ("SonyLIV", "Sony LIV"),
    ("ZEE5", "Zee5"),
];

/// Local platform name for a TMDB provider name
pub fn platform_name_for(provider_name: &str) -> &str {
    PROVIDER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == provider_name)
        .map(|(_, platform)| *platform)
        .unwrap_or(provider_name)
}

/// First official YouTube trailer or teaser
pub fn trailer_url(videos: &[TmdbVideo]) -> Option<String> {
    videos
        .iter()
        .find(|v| {
            v.site == "YouTube" && (v.video_type == "Trailer" || v.video_type == "Teaser") && v.official
        })
        .map(|v| format!("https://www.youtube.com/watch?v={}", v.key))
}

/// Normalizes raw TMDB details for `kind` into the service's shape
pub fn normalize_details(kind: ContentKind, raw: TmdbDetails) -> ContentDetails {
    let trailer_url = raw.videos.as_ref().and_then(|v| trailer_url(&v.results));
    let credits = raw.credits.unwrap_or_default();
    let runtime = by_kind(kind, raw.runtime, raw.episode_run_time.first().copied());

    ContentDetails {
        tmdb_id: raw.id,
        imdb_id: raw.imdb_id,
        title: by_kind(kind, raw.title, raw.name).unwrap_or_default(),
        original_title: by_kind(kind, raw.original_title, raw.original_name),
        content_type: kind,
        overview: raw.overview,
        poster_path: raw.poster_path,
        backdrop_path: raw.backdrop_path,
        release_date: by_kind(kind, raw.release_date, raw.first_air_date),
        runtime,
        genres: raw.genres,
        cast: credits.cast,
        crew: credits.crew,
        ratings: Ratings {
            tmdb: raw.vote_average.unwrap_or(0.0),
        },
        trailer_url,
    }
}

fn to_watch_providers(providers: Vec<TmdbProvider>) -> Vec<WatchProvider> {
    providers
        .into_iter()
        .map(|p| WatchProvider {
            platform_name: platform_name_for(&p.provider_name).to_string(),
            provider_id: p.provider_id,
            provider_name: p.provider_name,
            logo_path: p.logo_path,
            display_priority: p.display_priority,
        })
        .collect()
}

pub fn normalize_providers(region: &str, raw: TmdbRegionProviders) -> RegionalProviders {
    RegionalProviders {
        region: region.to_uppercase(),
        link: raw.link,
        streaming: to_watch_providers(raw.flatrate),
        rent: to_watch_providers(raw.rent),
        buy: to_watch_providers(raw.buy),
    }
}

/// Content details, refreshed into the local store, with local availability
/// and the region's watch providers attached.
///
/// A failed watch-provider lookup degrades to no providers.
pub async fn get_content(
    provider: &dyn MetadataProvider,
    repo: &dyn ContentRepository,
    id: &ContentId,
    region: &str,
) -> AppResult<ContentResponse> {
    let raw = provider.content_details(id).await?;
    let details = normalize_details(id.kind, raw);

    let content_id = repo.upsert_content(&details).await?;
    let availability = repo.availability(content_id).await?;

    let watch_providers = match provider.watch_providers(id, region).await {
        Ok(providers) => providers.map(|p| normalize_providers(region, p)),
        Err(e) => {
            tracing::warn!(
                error = %e,
                content = %id,
                region = %region,
                provider = provider.name(),
                "Watch provider lookup failed"
            );
            None
        }
    };

    Ok(ContentResponse {
        id: *id,
        details,
        availability,
        watch_providers,
    })
}
