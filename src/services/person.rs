use crate::{
    error::{AppError, AppResult},
    models::{CombinedCredits, PersonResponse},
    services::{providers::MetadataProvider, search::rank_credits},
};

/// Parses a person id from a path segment
pub fn parse_person_id(raw: &str) -> AppResult<u64> {
    raw.parse()
        .map_err(|_| AppError::InvalidInput("Invalid person ID".to_string()))
}

/// Person details with cast and crew credits ranked by relevance
pub async fn get_person(provider: &dyn MetadataProvider, person_id: u64) -> AppResult<PersonResponse> {
    let person = provider.person(person_id).await?;
    let credits = provider.combined_credits(person_id).await?;

    let credits = CombinedCredits {
        cast: rank_credits(credits.cast),
        crew: rank_credits(credits.crew),
    };

    tracing::debug!(
        person_id = person_id,
        cast = credits.cast.len(),
        crew = credits.crew.len(),
        "Person filmography ranked"
    );

    Ok(PersonResponse { person, credits })
}
