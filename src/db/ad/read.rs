use uuid::Uuid;

use crate::errors::AppError;
use crate::models::db::{AdAsset, AdSlot};

use super::AdRepository;

impl AdRepository {
    /// The active ad slot (joined with its asset) for the given quiz at
    /// `question_after`, if one is configured.
    pub async fn active_slot_after(
        &self,
        quiz_id: Uuid,
        question_after: i32,
    ) -> Result<Option<(AdSlot, AdAsset)>, AppError> {
        let row = sqlx::query_as::<_, (Uuid, Uuid, i32, Uuid, bool, Uuid, String, String, i32)>(
            "SELECT s.id, s.quiz_id, s.question_after, s.ad_asset_id, s.is_active,
                a.id, a.media_kind::text, a.url, a.duration_seconds
            FROM ad_slots s
            JOIN ad_assets a ON a.id = s.ad_asset_id
            WHERE s.quiz_id = $1 AND s.question_after = $2 AND s.is_active = true
            LIMIT 1",
        )
        .bind(quiz_id)
        .bind(question_after)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("failed to load ad slot: {e}")))?;

        let Some((slot_id, slot_quiz_id, q_after, asset_id, is_active, asset_id2, media_kind, url, duration_seconds)) = row
        else {
            return Ok(None);
        };

        let media_kind = media_kind
            .parse()
            .map_err(|_| AppError::DatabaseError(format!("unknown media kind: {media_kind}")))?;

        Ok(Some((
            AdSlot {
                id: slot_id,
                quiz_id: slot_quiz_id,
                question_after: q_after,
                ad_asset_id: asset_id,
                is_active,
            },
            AdAsset {
                id: asset_id2,
                media_kind,
                url,
                duration_seconds,
            },
        )))
    }
}
