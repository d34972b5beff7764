//! Task API
//!
//! Creating and completing tasks runs an achievement check; the result is
//! returned alongside the task.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{ActionType, ActivityResponse, Task, TaskComplete, TaskCreate};
use shared::util::{now_millis, snowflake_id};

use super::achievements::run_check;
use super::{ApiResult, db_error, validate_name};
use crate::auth::FamilyIdentity;
use crate::db::tasks;
use crate::state::AppState;

/// GET /api/tasks
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<FamilyIdentity>,
) -> ApiResult<Vec<Task>> {
    let tasks = tasks::list(&state.pool, identity.family_id)
        .await
        .map_err(db_error)?;
    Ok(Json(tasks))
}

/// POST /api/tasks
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<FamilyIdentity>,
    Json(data): Json<TaskCreate>,
) -> ApiResult<ActivityResponse<Task>> {
    let title = validate_name("title", &data.title)?;

    let task = tasks::create(
        &state.pool,
        snowflake_id(),
        identity.family_id,
        title,
        identity.user_id,
        now_millis(),
    )
    .await
    .map_err(db_error)?;

    let achievements = run_check(
        &state,
        identity,
        ActionType::TaskCreated,
        Some(serde_json::json!({ "taskId": task.id })),
    )
    .await?;

    Ok(Json(ActivityResponse {
        item: task,
        achievements,
    }))
}

/// POST /api/tasks/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    Extension(identity): Extension<FamilyIdentity>,
    Path(task_id): Path<i64>,
    body: Option<Json<TaskComplete>>,
) -> ApiResult<ActivityResponse<Task>> {
    let data = body.map(|Json(d)| d).unwrap_or_default();
    let completed_at = data
        .completed_at
        .unwrap_or_else(|| chrono::Utc::now().with_timezone(&state.family_offset));

    let task = tasks::complete(
        &state.pool,
        identity.family_id,
        task_id,
        identity.user_id,
        completed_at.timestamp_millis(),
    )
    .await
    .map_err(db_error)?;

    let Some(task) = task else {
        let exists = tasks::find(&state.pool, identity.family_id, task_id)
            .await
            .map_err(db_error)?
            .is_some();
        return Err(if exists {
            AppError::new(ErrorCode::TaskAlreadyCompleted)
        } else {
            AppError::new(ErrorCode::TaskNotFound).with_detail("id", task_id)
        });
    };

    let achievements = run_check(
        &state,
        identity,
        ActionType::TaskCompleted,
        Some(serde_json::json!({
            "taskId": task.id,
            "completedAt": completed_at.to_rfc3339(),
        })),
    )
    .await?;

    Ok(Json(ActivityResponse {
        item: task,
        achievements,
    }))
}
