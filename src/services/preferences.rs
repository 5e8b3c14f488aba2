//! Status presentation preferences: validation, persistence and resolution
//! against the built-in defaults.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::repositories::PreferenceRepository,
    error::{AppError, AppResult},
    models::{ResolvedPreferences, StatusKey, StatusPreference, COLOR_PALETTE, ICON_PALETTE},
};

/// Merges user overrides over the defaults. Total over every status key.
pub fn resolve(overrides: &HashMap<StatusKey, StatusPreference>) -> ResolvedPreferences {
    let pick = |key: StatusKey| {
        overrides
            .get(&key)
            .map(|custom| StatusPreference {
                status_key: key,
                ..custom.clone()
            })
            .unwrap_or_else(|| StatusPreference::default_for(key))
    };

    ResolvedPreferences {
        to_watch: pick(StatusKey::ToWatch),
        watching: pick(StatusKey::Watching),
        watched: pick(StatusKey::Watched),
    }
}

/// Raw preference write as received from a client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferenceInput {
    pub status_key: Option<String>,
    pub custom_label: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl PreferenceInput {
    /// Checks every field against the fixed key set and palettes.
    ///
    /// The label is stored trimmed; out-of-palette values are rejected rather
    /// than replaced.
    pub fn validate(self) -> AppResult<StatusPreference> {
        let (Some(status_key), Some(custom_label), Some(icon), Some(color)) =
            (self.status_key, self.custom_label, self.icon, self.color)
        else {
            return Err(AppError::InvalidInput("Missing required fields".to_string()));
        };

        let status_key: StatusKey = status_key
            .parse()
            .map_err(|_| AppError::InvalidInput("Invalid status_key".to_string()))?;

        let label = custom_label.trim();
        if label.is_empty() {
            return Err(AppError::InvalidInput("Label cannot be empty".to_string()));
        }

        if !ICON_PALETTE.contains(&icon.as_str()) {
            return Err(AppError::InvalidInput(format!("Unsupported icon '{}'", icon)));
        }

        if !COLOR_PALETTE.contains(&color.as_str()) {
            return Err(AppError::InvalidInput(format!("Unsupported color '{}'", color)));
        }

        Ok(StatusPreference {
            status_key,
            custom_label: label.to_string(),
            icon,
            color,
        })
    }
}

/// Stored overrides plus the fully resolved mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferencesView {
    pub preferences: Vec<StatusPreference>,
    pub resolved: ResolvedPreferences,
}

pub async fn get_preferences(
    repo: &dyn PreferenceRepository,
    user_id: Uuid,
) -> AppResult<PreferencesView> {
    let preferences = repo.list_preferences(user_id).await?;
    let overrides: HashMap<StatusKey, StatusPreference> = preferences
        .iter()
        .map(|p| (p.status_key, p.clone()))
        .collect();

    Ok(PreferencesView {
        resolved: resolve(&overrides),
        preferences,
    })
}

pub async fn save_preference(
    repo: &dyn PreferenceRepository,
    user_id: Uuid,
    input: PreferenceInput,
) -> AppResult<StatusPreference> {
    let preference = input.validate()?;
    let saved = repo.upsert_preference(user_id, &preference).await?;

    tracing::info!(
        user_id = %user_id,
        status_key = %saved.status_key,
        "Status preference saved"
    );

    Ok(saved)
}

/// Drops every override of the user; there is no per-key reset
pub async fn reset_preferences(repo: &dyn PreferenceRepository, user_id: Uuid) -> AppResult<()> {
    let removed = repo.delete_preferences(user_id).await?;
    tracing::info!(user_id = %user_id, removed = removed, "Status preferences reset");
    Ok(())
}
