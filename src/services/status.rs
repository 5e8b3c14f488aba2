//! Per-user watch status for a content item.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    db::repositories::{ContentRepository, StatusRepository},
    error::{AppError, AppResult},
    models::{ContentId, ContentStatusRecord, StatusKey, StatusUpdate},
};

/// Raw status write as received from a client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusInput {
    pub status: Option<String>,
    pub rating: Option<f64>,
    pub notes: Option<String>,
}

impl StatusInput {
    pub fn validate(self) -> AppResult<StatusUpdate> {
        let status: StatusKey = self
            .status
            .as_deref()
            .ok_or_else(|| AppError::InvalidInput("Invalid status".to_string()))?
            .parse()
            .map_err(|_| AppError::InvalidInput("Invalid status".to_string()))?;

        if let Some(rating) = self.rating {
            if !(0.0..=10.0).contains(&rating) {
                return Err(AppError::InvalidInput(
                    "Rating must be between 0 and 10".to_string(),
                ));
            }
        }

        Ok(StatusUpdate {
            status,
            rating: self.rating,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        })
    }
}

/// Produces the record to store for `update` on top of `existing`.
///
/// `started_at` is stamped once, the first time the status reaches watching or
/// watched. `completed_at` is stamped on every move to watched and otherwise
/// kept. Rating and notes are only replaced when supplied.
pub fn apply_update(
    user_id: Uuid,
    content_id: Uuid,
    existing: Option<&ContentStatusRecord>,
    update: StatusUpdate,
    now: DateTime<Utc>,
) -> ContentStatusRecord {
    let previous_started = existing.and_then(|r| r.started_at);
    let previous_completed = existing.and_then(|r| r.completed_at);

    let started_at = previous_started.or(update.status.is_started().then_some(now));
    let completed_at = if update.status == StatusKey::Watched {
        Some(now)
    } else {
        previous_completed
    };

    ContentStatusRecord {
        user_id,
        content_id,
        status: update.status,
        rating: update.rating.or(existing.and_then(|r| r.rating)),
        notes: update.notes.or_else(|| existing.and_then(|r| r.notes.clone())),
        started_at,
        completed_at,
        updated_at: now,
    }
}

/// Current status, `None` when the content is unknown locally or untracked
pub async fn get_status(
    content: &dyn ContentRepository,
    statuses: &dyn StatusRepository,
    user_id: Uuid,
    id: &ContentId,
) -> AppResult<Option<ContentStatusRecord>> {
    let Some(content_id) = content.find_content_id(id).await? else {
        return Ok(None);
    };

    statuses.get_status(user_id, content_id).await
}

pub async fn set_status(
    content: &dyn ContentRepository,
    statuses: &dyn StatusRepository,
    user_id: Uuid,
    id: &ContentId,
    input: StatusInput,
) -> AppResult<ContentStatusRecord> {
    let update = input.validate()?;

    let content_id = content
        .find_content_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Content not found".to_string()))?;

    let existing = statuses.get_status(user_id, content_id).await?;
    let record = apply_update(user_id, content_id, existing.as_ref(), update, Utc::now());
    let stored = statuses.upsert_status(&record).await?;

    tracing::info!(
        user_id = %user_id,
        content = %id,
        status = %stored.status,
        "Watch status updated"
    );

    Ok(stored)
}

pub async fn delete_status(
    content: &dyn ContentRepository,
    statuses: &dyn StatusRepository,
    user_id: Uuid,
    id: &ContentId,
) -> AppResult<()> {
    let content_id = content
        .find_content_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Content not found".to_string()))?;

    statuses.delete_status(user_id, content_id).await?;
    tracing::info!(user_id = %user_id, content = %id, "Watch status deleted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{MockContentRepository, MockStatusRepository};
    use crate::models::ContentKind;
    use chrono::Duration;
    use tokio_test::{assert_err, assert_ok};

    fn update(status: StatusKey) -> StatusUpdate {
        StatusUpdate {
            status,
            rating: None,
            notes: None,
        }
    }

    fn ids() -> (Uuid, Uuid) {
        (Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn test_to_watch_stamps_nothing() {
        let (user, content) = ids();
        let now = Utc::now();
        let record = apply_update(user, content, None, update(StatusKey::ToWatch), now);
        assert_eq!(record.started_at, None);
        assert_eq!(record.completed_at, None);
    }

    #[test]
    fn test_watching_stamps_started_at() {
        let (user, content) = ids();
        let now = Utc::now();
        let record = apply_update(user, content, None, update(StatusKey::Watching), now);
        assert_eq!(record.started_at, Some(now));
        assert_eq!(record.completed_at, None);
    }

    #[test]
    fn test_first_watched_stamps_both() {
        let (user, content) = ids();
        let now = Utc::now();
        let record = apply_update(user, content, None, update(StatusKey::Watched), now);
        assert_eq!(record.started_at, Some(now));
        assert_eq!(record.completed_at, Some(now));
    }

    #[test]
    fn test_second_watched_keeps_started_refreshes_completed() {
        let (user, content) = ids();
        let first = Utc::now();
        let second = first + Duration::hours(3);

        let record = apply_update(user, content, None, update(StatusKey::Watched), first);
        let again = apply_update(user, content, Some(&record), update(StatusKey::Watched), second);

        assert_eq!(again.started_at, Some(first));
        assert_eq!(again.completed_at, Some(second));
    }

    #[test]
    fn test_watching_after_to_watch_stamps_later_time() {
        let (user, content) = ids();
        let queued = Utc::now();
        let began = queued + Duration::days(2);

        let record = apply_update(user, content, None, update(StatusKey::ToWatch), queued);
        let watching = apply_update(user, content, Some(&record), update(StatusKey::Watching), began);
        assert_eq!(watching.started_at, Some(began));
    }

    #[test]
    fn test_leaving_watched_keeps_completed_at() {
        let (user, content) = ids();
        let done = Utc::now();
        let rewatch = done + Duration::days(30);

        let record = apply_update(user, content, None, update(StatusKey::Watched), done);
        let back = apply_update(user, content, Some(&record), update(StatusKey::Watching), rewatch);
        assert_eq!(back.started_at, Some(done));
        assert_eq!(back.completed_at, Some(done));
        assert_eq!(back.status, StatusKey::Watching);
    }

    #[test]
    fn test_rating_and_notes_kept_when_omitted() {
        let (user, content) = ids();
        let now = Utc::now();
        let rated = StatusUpdate {
            status: StatusKey::Watched,
            rating: Some(8.5),
            notes: Some("Great ending".to_string()),
        };

        let record = apply_update(user, content, None, rated, now);
        let again = apply_update(user, content, Some(&record), update(StatusKey::Watching), now);
        assert_eq!(again.rating, Some(8.5));
        assert_eq!(again.notes.as_deref(), Some("Great ending"));
    }

    #[test]
    fn test_validate_input() {
        let ok = assert_ok!(StatusInput {
            status: Some("watching".to_string()),
            rating: Some(7.0),
            notes: Some("  ".to_string()),
        }
        .validate());
        assert_eq!(ok.status, StatusKey::Watching);
        assert_eq!(ok.notes, None);

        assert_err!(StatusInput::default().validate());
        assert_err!(StatusInput {
            status: Some("paused".to_string()),
            ..Default::default()
        }
        .validate());
        assert_err!(StatusInput {
            status: Some("watched".to_string()),
            rating: Some(11.0),
            ..Default::default()
        }
        .validate());
        assert_ok!(StatusInput {
            status: Some("watched".to_string()),
            rating: Some(10.0),
            ..Default::default()
        }
        .validate());
    }

    #[tokio::test]
    async fn test_get_status_unknown_content_is_none() {
        let mut content = MockContentRepository::new();
        content.expect_find_content_id().returning(|_| Ok(None));
        let mut statuses = MockStatusRepository::new();
        statuses.expect_get_status().never();

        let id = ContentId::new(550, ContentKind::Movie);
        let result = get_status(&content, &statuses, Uuid::new_v4(), &id).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_set_status_unknown_content_is_not_found() {
        let mut content = MockContentRepository::new();
        content.expect_find_content_id().returning(|_| Ok(None));
        let mut statuses = MockStatusRepository::new();
        statuses.expect_upsert_status().never();

        let id = ContentId::new(550, ContentKind::Movie);
        let input = StatusInput {
            status: Some("watched".to_string()),
            ..Default::default()
        };
        let err = set_status(&content, &statuses, Uuid::new_v4(), &id, input)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_set_status_upserts_computed_record() {
        let content_uuid = Uuid::new_v4();
        let mut content = MockContentRepository::new();
        content
            .expect_find_content_id()
            .returning(move |_| Ok(Some(content_uuid)));

        let mut statuses = MockStatusRepository::new();
        statuses.expect_get_status().returning(|_, _| Ok(None));
        statuses
            .expect_upsert_status()
            .withf(|record| {
                record.status == StatusKey::Watched
                    && record.started_at.is_some()
                    && record.completed_at.is_some()
            })
            .times(1)
            .returning(|record| Ok(record.clone()));

        let id = ContentId::new(550, ContentKind::Movie);
        let input = StatusInput {
            status: Some("watched".to_string()),
            ..Default::default()
        };
        let stored = set_status(&content, &statuses, Uuid::new_v4(), &id, input)
            .await
            .unwrap();
        assert_eq!(stored.content_id, content_uuid);
    }
}
