use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use mokki_entity::types::Stay;
use mokki_surrealdb::repository::StayRepository;
use serde::Deserialize;

use crate::api::houses::by_house_id::require_member;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateStayRequest {
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub note: Option<String>,
}

/// GET /api/houses/{house_id}/stays — calendar order.
pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(house_id): Path<String>,
) -> Result<Json<Vec<Stay>>, ApiError> {
    require_member(&state, &house_id, &user.user_id).await?;
    let stays = StayRepository::new(state.db.clone())
        .list_for_house(&house_id)
        .await?;
    Ok(Json(stays))
}

/// POST /api/houses/{house_id}/stays
pub async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(house_id): Path<String>,
    Json(request): Json<CreateStayRequest>,
) -> Result<(StatusCode, Json<Stay>), ApiError> {
    require_member(&state, &house_id, &user.user_id).await?;
    let stay = StayRepository::new(state.db.clone())
        .create(
            &house_id,
            &user.user_id,
            request.starts_on,
            request.ends_on,
            request.note,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(stay)))
}

/// DELETE /api/houses/{house_id}/stays/{stay_id} — the stay's author or the
/// house owner.
pub async fn remove(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((house_id, stay_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let house = require_member(&state, &house_id, &user.user_id).await?;
    let stays = StayRepository::new(state.db.clone());
    let stay = stays
        .get(&stay_id)
        .await?
        .filter(|stay| stay.house_id == house_id)
        .ok_or(ApiError::NotFound)?;
    if stay.user_id != user.user_id && house.owner_id != user.user_id {
        return Err(ApiError::Forbidden);
    }
    stays.delete(&stay_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
