use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{error::AppResult, models::PersonResponse, routes::AppState, services::person};

/// Handler for person detail with ranked filmography
pub async fn get_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<PersonResponse>> {
    let person_id = person::parse_person_id(&id)?;
    let response = person::get_person(state.metadata.as_ref(), person_id).await?;
    Ok(Json(response))
}
