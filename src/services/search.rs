//! Search result normalization and filmography ranking.

use std::cmp::Ordering;

use crate::{
    error::AppResult,
    models::{
        tmdb::by_kind, ContentKind, CreditEntry, SearchResponse, SearchResultItem,
        TmdbSearchItem, TmdbSearchPage,
    },
    services::providers::MetadataProvider,
};

/// Filmography entries with this many votes or fewer are dropped from rankings
pub const MIN_VOTE_COUNT: u64 = 10;

/// Projects one raw hit into the uniform shape.
///
/// Returns `None` for hits that are neither movies nor series.
pub fn normalize_item(item: TmdbSearchItem) -> Option<SearchResultItem> {
    let kind = ContentKind::from_media_type(&item.media_type)?;

    let title = by_kind(kind, item.title, item.name).unwrap_or_default();
    let original_title = by_kind(kind, item.original_title, item.original_name);
    let release_date = by_kind(kind, item.release_date, item.first_air_date);

    Some(SearchResultItem {
        id: item.id,
        tmdb_id: item.id,
        title,
        original_title,
        content_type: kind,
        overview: item.overview,
        poster_path: item.poster_path,
        backdrop_path: item.backdrop_path,
        release_date,
        vote_average: item.vote_average.unwrap_or(0.0),
        genre_ids: item.genre_ids,
    })
}

/// Drops people and other non-content hits, applies the optional kind
/// filter and projects the rest. Paging fields pass through untouched.
pub fn normalize_search(page: TmdbSearchPage, kind: Option<ContentKind>) -> SearchResponse {
    let results: Vec<SearchResultItem> = page
        .results
        .into_iter()
        .filter_map(normalize_item)
        .filter(|item| kind.map_or(true, |k| item.content_type == k))
        .collect();

    SearchResponse {
        total_results: results.len(),
        results,
        page: page.page,
        total_pages: page.total_pages,
    }
}

/// Relevance order for a filmography: popularity first, rating only breaks ties.
fn compare_relevance(a: &CreditEntry, b: &CreditEntry) -> Ordering {
    b.popularity.total_cmp(&a.popularity).then_with(|| {
        let a_vote = a.vote_average.unwrap_or(0.0);
        let b_vote = b.vote_average.unwrap_or(0.0);
        b_vote.total_cmp(&a_vote)
    })
}

/// Keeps entries with more than [`MIN_VOTE_COUNT`] votes, most relevant first
pub fn rank_credits(entries: Vec<CreditEntry>) -> Vec<CreditEntry> {
    let mut ranked: Vec<CreditEntry> = entries
        .into_iter()
        .filter(|entry| entry.vote_count.unwrap_or(0) > MIN_VOTE_COUNT)
        .collect();
    ranked.sort_by(compare_relevance);
    ranked
}

/// Searches the provider and normalizes the page
pub async fn search_content(
    provider: &dyn MetadataProvider,
    query: &str,
    page: u32,
    kind: Option<ContentKind>,
) -> AppResult<SearchResponse> {
    let raw = provider.search_multi(query, page).await?;
    Ok(normalize_search(raw, kind))
}
