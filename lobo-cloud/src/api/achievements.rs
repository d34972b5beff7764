//! Achievement API: catalog, family level, unlocked badges, manual checks

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::achievement::{achievement_progress, all_badges, find_badge};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    AchievementCheckContext, AchievementCheckRequest, AchievementCheckResult, ActionType, Badge,
    BadgeCategory, FamilyAchievementsResponse, FamilyLevel, Rarity,
};

use super::{ApiResult, db_error};
use crate::auth::FamilyIdentity;
use crate::db::{achievements, levels};
use crate::services::achievements::{check_achievements, into_unlocked};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BadgeQuery {
    pub category: Option<BadgeCategory>,
    pub rarity: Option<Rarity>,
}

/// GET /api/achievements/badges
pub async fn list_badges(Query(query): Query<BadgeQuery>) -> ApiResult<Vec<Badge>> {
    let badges = all_badges()
        .iter()
        .filter(|b| query.category.is_none_or(|c| b.category == c))
        .filter(|b| query.rarity.is_none_or(|r| b.rarity == r))
        .cloned()
        .collect();
    Ok(Json(badges))
}

/// GET /api/achievements/badges/{id}
pub async fn get_badge(Path(badge_id): Path<String>) -> ApiResult<Badge> {
    match find_badge(&badge_id) {
        Some(badge) => Ok(Json(badge.clone())),
        None => Err(AppError::new(ErrorCode::BadgeNotFound).with_detail("id", badge_id)),
    }
}

/// GET /api/achievements/family-level
pub async fn family_level(
    State(state): State<AppState>,
    Extension(identity): Extension<FamilyIdentity>,
) -> ApiResult<FamilyLevel> {
    let level = levels::find_or_create(
        &state.pool,
        identity.family_id,
        shared::util::now_millis(),
    )
    .await
    .map_err(db_error)?;
    Ok(Json(level))
}

/// GET /api/achievements/family-achievements
pub async fn family_achievements(
    State(state): State<AppState>,
    Extension(identity): Extension<FamilyIdentity>,
) -> ApiResult<FamilyAchievementsResponse> {
    let rows = achievements::list(&state.pool, identity.family_id)
        .await
        .map_err(db_error)?;

    let known = rows.iter().filter(|r| find_badge(&r.badge_id).is_some()).count();
    Ok(Json(FamilyAchievementsResponse {
        progress: achievement_progress(known),
        achievements: rows.into_iter().map(into_unlocked).collect(),
    }))
}

/// POST /api/achievements/check
pub async fn check(
    State(state): State<AppState>,
    Extension(identity): Extension<FamilyIdentity>,
    Json(req): Json<AchievementCheckRequest>,
) -> ApiResult<AchievementCheckResult> {
    let action: ActionType = req.action.parse()?;
    let result = run_check(&state, identity, action, without_event_time(req.data)).await?;
    Ok(Json(result))
}

/// Manual checks run at server time: a client `completedAt` is dropped.
fn without_event_time(data: Option<serde_json::Value>) -> Option<serde_json::Value> {
    data.map(|mut data| {
        if let Some(fields) = data.as_object_mut() {
            fields.remove("completedAt");
        }
        data
    })
}

/// Run an achievement check for an action performed by `identity` now.
pub(crate) async fn run_check(
    state: &AppState,
    identity: FamilyIdentity,
    action: ActionType,
    data: Option<serde_json::Value>,
) -> Result<AchievementCheckResult, AppError> {
    let context = AchievementCheckContext {
        family_id: identity.family_id,
        user_id: identity.user_id,
        action,
        data,
        timestamp: chrono::Utc::now(),
    };
    Ok(check_achievements(&state.pool, &context, state.check_settings()).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_manual_check_drops_client_time() {
        let data = without_event_time(Some(json!({
            "taskId": 9,
            "completedAt": "2025-03-15T06:00:00+00:00",
        })));
        assert_eq!(data, Some(json!({ "taskId": 9 })));
    }

    #[test]
    fn test_manual_check_keeps_other_payloads() {
        assert_eq!(without_event_time(None), None);
        assert_eq!(without_event_time(Some(json!("note"))), Some(json!("note")));
    }
}
