//! Shopping list API

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{ActionType, ActivityResponse, ShoppingList, ShoppingListCreate};
use shared::util::{now_millis, snowflake_id};

use super::achievements::run_check;
use super::{ApiResult, db_error, validate_name};
use crate::auth::FamilyIdentity;
use crate::db::lists;
use crate::state::AppState;

/// GET /api/lists
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<FamilyIdentity>,
) -> ApiResult<Vec<ShoppingList>> {
    let lists = lists::list(&state.pool, identity.family_id)
        .await
        .map_err(db_error)?;
    Ok(Json(lists))
}

/// POST /api/lists
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<FamilyIdentity>,
    Json(data): Json<ShoppingListCreate>,
) -> ApiResult<ActivityResponse<ShoppingList>> {
    let name = validate_name("name", &data.name)?;

    let list = lists::create(
        &state.pool,
        snowflake_id(),
        identity.family_id,
        name,
        identity.user_id,
        now_millis(),
    )
    .await
    .map_err(db_error)?;

    let achievements = run_check(
        &state,
        identity,
        ActionType::ListCreated,
        Some(serde_json::json!({ "listId": list.id })),
    )
    .await?;

    Ok(Json(ActivityResponse {
        item: list,
        achievements,
    }))
}

/// POST /api/lists/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    Extension(identity): Extension<FamilyIdentity>,
    Path(list_id): Path<i64>,
) -> ApiResult<ActivityResponse<ShoppingList>> {
    let list = lists::complete(&state.pool, identity.family_id, list_id, now_millis())
        .await
        .map_err(db_error)?;

    let Some(list) = list else {
        let exists = lists::find(&state.pool, identity.family_id, list_id)
            .await
            .map_err(db_error)?
            .is_some();
        return Err(if exists {
            AppError::new(ErrorCode::ListAlreadyCompleted)
        } else {
            AppError::new(ErrorCode::ListNotFound).with_detail("id", list_id)
        });
    };

    let achievements = run_check(
        &state,
        identity,
        ActionType::ListCompleted,
        Some(serde_json::json!({ "listId": list.id })),
    )
    .await?;

    Ok(Json(ActivityResponse {
        item: list,
        achievements,
    }))
}
