use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    auth::AuthUser,
    error::AppResult,
    middleware::request_id::RequestId,
    models::{ContentId, ContentResponse, StatusView},
    routes::AppState,
    services::{content, status},
};

/// Handler for content detail by `{tmdbId}-{kind}`
pub async fn get_content(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> AppResult<Json<ContentResponse>> {
    let id = ContentId::decode(&id)?;

    tracing::info!(request_id = %request_id, content = %id, "Fetching content details");

    let response = content::get_content(
        state.metadata.as_ref(),
        state.content.as_ref(),
        &id,
        &state.watch_region,
    )
    .await?;

    Ok(Json(response))
}

/// Handler returning the caller's status for a content item, `null` if untracked
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let id = ContentId::decode(&id)?;
    let record =
        status::get_status(state.content.as_ref(), state.statuses.as_ref(), user.id, &id).await?;
    let view = record.map(|r| StatusView::new(id, r));

    Ok(Json(json!({ "status": view })))
}

/// Handler creating or updating the caller's status for a content item
pub async fn set_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
    payload: Result<Json<status::StatusInput>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let id = ContentId::decode(&id)?;
    let Json(input) = payload?;

    tracing::info!(
        request_id = %request_id,
        user_id = %user.id,
        content = %id,
        "Updating watch status"
    );

    let record = status::set_status(
        state.content.as_ref(),
        state.statuses.as_ref(),
        user.id,
        &id,
        input,
    )
    .await?;

    Ok(Json(json!({ "status": StatusView::new(id, record) })))
}

/// Handler removing the caller's status for a content item
pub async fn delete_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let id = ContentId::decode(&id)?;
    status::delete_status(state.content.as_ref(), state.statuses.as_ref(), user.id, &id).await?;

    Ok(Json(json!({ "success": true })))
}
