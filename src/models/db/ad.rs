use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::models::enums::MediaKind;

/// Maps to the `ad_slots` table: when an active slot exists for
/// `question_after = i`, the Question Runner inserts an ad break after
/// question `i`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdSlot {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub question_after: i32,
    pub ad_asset_id: Uuid,
    pub is_active: bool,
}

/// Maps to the `ad_assets` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdAsset {
    pub id: Uuid,
    pub media_kind: MediaKind,
    pub url: String,
    pub duration_seconds: i32,
}
