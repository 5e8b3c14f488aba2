use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::PreferenceRepository;
use crate::{
    error::{AppError, AppResult},
    models::StatusPreference,
};

#[derive(Clone, Debug)]
pub struct PgPreferenceRepository {
    pool: PgPool,
}

impl PgPreferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PreferenceRow {
    status_key: String,
    custom_label: String,
    icon: String,
    color: String,
}

impl TryFrom<PreferenceRow> for StatusPreference {
    type Error = AppError;

    fn try_from(row: PreferenceRow) -> Result<Self, Self::Error> {
        Ok(StatusPreference {
            status_key: row.status_key.parse().map_err(AppError::Internal)?,
            custom_label: row.custom_label,
            icon: row.icon,
            color: row.color,
        })
    }
}

#[async_trait::async_trait]
impl PreferenceRepository for PgPreferenceRepository {
    async fn list_preferences(&self, user_id: Uuid) -> AppResult<Vec<StatusPreference>> {
        let rows: Vec<PreferenceRow> = sqlx::query_as(
            r#"
            SELECT status_key, custom_label, icon, color
            FROM user_status_preferences
            WHERE user_id = $1
            ORDER BY status_key
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(StatusPreference::try_from).collect()
    }

    async fn upsert_preference(
        &self,
        user_id: Uuid,
        preference: &StatusPreference,
    ) -> AppResult<StatusPreference> {
        let row: PreferenceRow = sqlx::query_as(
            r#"
            INSERT INTO user_status_preferences (user_id, status_key, custom_label, icon, color)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, status_key) DO UPDATE SET
                custom_label = EXCLUDED.custom_label,
                icon = EXCLUDED.icon,
                color = EXCLUDED.color,
                updated_at = NOW()
            RETURNING status_key, custom_label, icon, color
            "#,
        )
        .bind(user_id)
        .bind(preference.status_key.as_str())
        .bind(&preference.custom_label)
        .bind(&preference.icon)
        .bind(&preference.color)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn delete_preferences(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM user_status_preferences WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatusKey;

    fn preference(key: StatusKey, label: &str) -> StatusPreference {
        StatusPreference {
            status_key: key,
            custom_label: label.to_string(),
            icon: "⭐".to_string(),
            color: "purple".to_string(),
        }
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    async fn test_upsert_keeps_one_row_per_status_key(pool: PgPool) {
        let repo = PgPreferenceRepository::new(pool);
        let user = Uuid::new_v4();

        repo.upsert_preference(user, &preference(StatusKey::Watched, "Done"))
            .await
            .unwrap();
        let saved = repo
            .upsert_preference(user, &preference(StatusKey::Watched, "Finished"))
            .await
            .unwrap();
        assert_eq!(saved.custom_label, "Finished");

        let stored = repo.list_preferences(user).await.unwrap();
        assert_eq!(stored, vec![preference(StatusKey::Watched, "Finished")]);
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    async fn test_reset_removes_only_the_users_rows(pool: PgPool) {
        let repo = PgPreferenceRepository::new(pool);
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();

        repo.upsert_preference(user, &preference(StatusKey::ToWatch, "Later"))
            .await
            .unwrap();
        repo.upsert_preference(user, &preference(StatusKey::Watching, "On it"))
            .await
            .unwrap();
        repo.upsert_preference(other, &preference(StatusKey::Watched, "Seen"))
            .await
            .unwrap();

        assert_eq!(repo.delete_preferences(user).await.unwrap(), 2);
        assert!(repo.list_preferences(user).await.unwrap().is_empty());
        assert_eq!(repo.list_preferences(other).await.unwrap().len(), 1);
    }
}
