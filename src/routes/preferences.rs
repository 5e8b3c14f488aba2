use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    auth::AuthUser,
    error::AppResult,
    routes::AppState,
    services::preferences::{self, PreferenceInput, PreferencesView},
};

/// Handler returning stored overrides and the resolved mapping
pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<PreferencesView>> {
    let view = preferences::get_preferences(state.preferences.as_ref(), user.id).await?;
    Ok(Json(view))
}

/// Handler upserting one status override
pub async fn save_preference(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<PreferenceInput>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(input) = payload?;
    let preference =
        preferences::save_preference(state.preferences.as_ref(), user.id, input).await?;
    Ok(Json(json!({ "preference": preference })))
}

/// Handler resetting every override back to the defaults
pub async fn reset_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<Value>> {
    preferences::reset_preferences(state.preferences.as_ref(), user.id).await?;
    Ok(Json(json!({ "success": true })))
}
