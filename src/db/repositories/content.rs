use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::ContentRepository;
use crate::{
    error::{AppError, AppResult},
    models::{ContentDetails, ContentId, Platform, PlatformAvailability},
};

#[derive(Clone, Debug)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// TMDB ids are stored as BIGINT; larger ids cannot exist there
fn tmdb_key(tmdb_id: u64) -> AppResult<i64> {
    i64::try_from(tmdb_id)
        .map_err(|_| AppError::InvalidInput(format!("TMDB id {} is out of range", tmdb_id)))
}

#[derive(FromRow)]
struct PlatformRow {
    id: Uuid,
    name: String,
    logo_url: Option<String>,
    website_url: Option<String>,
}

impl From<PlatformRow> for Platform {
    fn from(row: PlatformRow) -> Self {
        Platform {
            id: row.id,
            name: row.name,
            logo_url: row.logo_url,
            website_url: row.website_url,
        }
    }
}

#[derive(FromRow)]
struct AvailabilityRow {
    availability_type: String,
    url: Option<String>,
    platform_id: Uuid,
    platform_name: String,
    logo_url: Option<String>,
    website_url: Option<String>,
}

impl From<AvailabilityRow> for PlatformAvailability {
    fn from(row: AvailabilityRow) -> Self {
        PlatformAvailability {
            platform: Platform {
                id: row.platform_id,
                name: row.platform_name,
                logo_url: row.logo_url,
                website_url: row.website_url,
            },
            availability_type: row.availability_type,
            url: row.url,
        }
    }
}

#[async_trait::async_trait]
impl ContentRepository for PgContentRepository {
    async fn upsert_content(&self, details: &ContentDetails) -> AppResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO content (
                tmdb_id, imdb_id, content_type, title, original_title, overview,
                poster_path, backdrop_path, release_date, runtime, tmdb_rating, trailer_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (tmdb_id, content_type) DO UPDATE SET
                imdb_id = EXCLUDED.imdb_id,
                title = EXCLUDED.title,
                original_title = EXCLUDED.original_title,
                overview = EXCLUDED.overview,
                poster_path = EXCLUDED.poster_path,
                backdrop_path = EXCLUDED.backdrop_path,
                release_date = EXCLUDED.release_date,
                runtime = EXCLUDED.runtime,
                tmdb_rating = EXCLUDED.tmdb_rating,
                trailer_url = EXCLUDED.trailer_url,
                updated_at = NOW()
            RETURNING id
            "#,
        )
        .bind(tmdb_key(details.tmdb_id)?)
        .bind(&details.imdb_id)
        .bind(details.content_type.as_str())
        .bind(&details.title)
        .bind(&details.original_title)
        .bind(&details.overview)
        .bind(&details.poster_path)
        .bind(&details.backdrop_path)
        .bind(&details.release_date)
        .bind(details.runtime.map(|r| r as i32))
        .bind(details.ratings.tmdb)
        .bind(&details.trailer_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_content_id(&self, id: &ContentId) -> AppResult<Option<Uuid>> {
        let found: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT id FROM content
            WHERE tmdb_id = $1 AND content_type = $2
            "#,
        )
        .bind(tmdb_key(id.tmdb_id)?)
        .bind(id.kind.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(found)
    }

    async fn availability(&self, content_id: Uuid) -> AppResult<Vec<PlatformAvailability>> {
        let rows: Vec<AvailabilityRow> = sqlx::query_as(
            r#"
            SELECT ca.availability_type, ca.url,
                   p.id AS platform_id, p.name AS platform_name, p.logo_url, p.website_url
            FROM content_availability ca
            JOIN ott_platforms p ON p.id = ca.platform_id
            WHERE ca.content_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(content_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PlatformAvailability::from).collect())
    }

    async fn list_platforms(&self) -> AppResult<Vec<Platform>> {
        let rows: Vec<PlatformRow> = sqlx::query_as(
            r#"
            SELECT id, name, logo_url, website_url
            FROM ott_platforms
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Platform::from).collect())
    }
}
