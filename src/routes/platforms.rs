use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{error::AppResult, routes::AppState};

/// Handler listing every streaming platform by name
pub async fn list_platforms(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    let platforms = state.content.list_platforms().await?;
    Ok(Json(json!({ "platforms": platforms })))
}
