use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{ContentKind, SearchResponse},
    routes::AppState,
    services::search,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
    page: Option<u32>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Handler for content search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Extension(request_id): Extension<RequestId>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> AppResult<Json<SearchResponse>> {
    let Query(params) = params?;

    let query = params
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Query parameter is required".to_string()))?;

    let page = params.page.unwrap_or(1);
    if page == 0 {
        return Err(AppError::InvalidInput("Page must be at least 1".to_string()));
    }

    // Anything other than movie or series (e.g. `all`) searches every kind
    let kind = params
        .kind
        .as_deref()
        .and_then(|k| k.parse::<ContentKind>().ok());

    tracing::info!(
        request_id = %request_id,
        user_id = %user.id,
        query = %query,
        page = page,
        kind = ?kind,
        "Processing search request"
    );

    let response = search::search_content(state.metadata.as_ref(), &query, page, kind).await?;
    Ok(Json(response))
}
