use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use mokki_entity::types::Expense;
use mokki_surrealdb::repository::{ExpenseRepository, MemberBalance, MembershipRepository};
use serde::Deserialize;

use crate::api::houses::by_house_id::require_member;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub description: String,
    pub amount_cents: i64,
    pub spent_on: NaiveDate,
}

/// GET /api/houses/{house_id}/expenses — newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(house_id): Path<String>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    require_member(&state, &house_id, &user.user_id).await?;
    let expenses = ExpenseRepository::new(state.db.clone())
        .list_for_house(&house_id)
        .await?;
    Ok(Json(expenses))
}

/// POST /api/houses/{house_id}/expenses — the caller fronted the cost.
pub async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(house_id): Path<String>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    require_member(&state, &house_id, &user.user_id).await?;
    let expense = ExpenseRepository::new(state.db.clone())
        .create(
            &house_id,
            &user.user_id,
            &request.description,
            request.amount_cents,
            request.spent_on,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET /api/houses/{house_id}/expenses/balances — equal split across the
/// current member list.
pub async fn balances(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(house_id): Path<String>,
) -> Result<Json<Vec<MemberBalance>>, ApiError> {
    require_member(&state, &house_id, &user.user_id).await?;
    let member_ids = MembershipRepository::new(state.db.clone())
        .member_ids(&house_id)
        .await?;
    let balances = ExpenseRepository::new(state.db.clone())
        .balances(&house_id, &member_ids)
        .await?;
    Ok(Json(balances))
}
