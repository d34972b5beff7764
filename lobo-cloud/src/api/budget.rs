//! Budget transaction API

use axum::{Extension, Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::models::{ActionType, ActivityResponse, BudgetTransaction, BudgetTransactionCreate};
use shared::util::{now_millis, snowflake_id};

use super::achievements::run_check;
use super::{ApiResult, db_error};
use crate::auth::FamilyIdentity;
use crate::db::budget;
use crate::state::AppState;

const MAX_DESCRIPTION_LEN: usize = 500;

/// GET /api/budget/transactions
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<FamilyIdentity>,
) -> ApiResult<Vec<BudgetTransaction>> {
    let transactions = budget::list(&state.pool, identity.family_id)
        .await
        .map_err(db_error)?;
    Ok(Json(transactions))
}

/// POST /api/budget/transactions
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<FamilyIdentity>,
    Json(data): Json<BudgetTransactionCreate>,
) -> ApiResult<ActivityResponse<BudgetTransaction>> {
    if data.amount_cents == 0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidTransactionAmount,
            "Amount must not be zero",
        ));
    }
    let description = data
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    if description.is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN) {
        return Err(AppError::validation(format!(
            "description must be at most {MAX_DESCRIPTION_LEN} characters"
        ))
        .with_detail("field", "description"));
    }

    let transaction = budget::create(
        &state.pool,
        snowflake_id(),
        identity.family_id,
        identity.user_id,
        data.amount_cents,
        description,
        now_millis(),
    )
    .await
    .map_err(db_error)?;

    let achievements = run_check(
        &state,
        identity,
        ActionType::BudgetTransaction,
        Some(serde_json::json!({
            "transactionId": transaction.id,
            "amountCents": transaction.amount_cents,
        })),
    )
    .await?;

    Ok(Json(ActivityResponse {
        item: transaction,
        achievements,
    }))
}
