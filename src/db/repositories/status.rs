use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::StatusRepository;
use crate::{
    error::{AppError, AppResult},
    models::ContentStatusRecord,
};

#[derive(Clone, Debug)]
pub struct PgStatusRepository {
    pool: PgPool,
}

impl PgStatusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct StatusRow {
    user_id: Uuid,
    content_id: Uuid,
    status: String,
    rating: Option<f64>,
    notes: Option<String>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StatusRow> for ContentStatusRecord {
    type Error = AppError;

    fn try_from(row: StatusRow) -> Result<Self, Self::Error> {
        Ok(ContentStatusRecord {
            user_id: row.user_id,
            content_id: row.content_id,
            status: row.status.parse().map_err(AppError::Internal)?,
            rating: row.rating,
            notes: row.notes,
            started_at: row.started_at,
            completed_at: row.completed_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait::async_trait]
impl StatusRepository for PgStatusRepository {
    async fn get_status(
        &self,
        user_id: Uuid,
        content_id: Uuid,
    ) -> AppResult<Option<ContentStatusRecord>> {
        let row: Option<StatusRow> = sqlx::query_as(
            r#"
            SELECT user_id, content_id, status, rating, notes, started_at, completed_at, updated_at
            FROM user_content_status
            WHERE user_id = $1 AND content_id = $2
            "#,
        )
        .bind(user_id)
        .bind(content_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ContentStatusRecord::try_from).transpose()
    }

    async fn upsert_status(&self, record: &ContentStatusRecord) -> AppResult<ContentStatusRecord> {
        // An existing started_at always wins
        let row: StatusRow = sqlx::query_as(
            r#"
            INSERT INTO user_content_status (
                user_id, content_id, status, rating, notes, started_at, completed_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, content_id) DO UPDATE SET
                status = EXCLUDED.status,
                rating = EXCLUDED.rating,
                notes = EXCLUDED.notes,
                started_at = COALESCE(user_content_status.started_at, EXCLUDED.started_at),
                completed_at = EXCLUDED.completed_at,
                updated_at = EXCLUDED.updated_at
            RETURNING user_id, content_id, status, rating, notes, started_at, completed_at, updated_at
            "#,
        )
        .bind(record.user_id)
        .bind(record.content_id)
        .bind(record.status.as_str())
        .bind(record.rating)
        .bind(&record.notes)
        .bind(record.started_at)
        .bind(record.completed_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn delete_status(&self, user_id: Uuid, content_id: Uuid) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM user_content_status
            WHERE user_id = $1 AND content_id = $2
            "#,
        )
        .bind(user_id)
        .bind(content_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
