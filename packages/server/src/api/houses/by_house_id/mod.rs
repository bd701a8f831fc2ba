pub mod expenses;
pub mod invites;
pub mod media;
pub mod members;
pub mod stays;
pub mod weather;

use axum::{
    Json,
    extract::{Path, State},
};
use mokki_entity::types::House;
use mokki_surrealdb::repository::{HouseRepository, MembershipRepository};

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Loads the house and checks the caller belongs to it (owner or accepted
/// invitee). Shared by every house-scoped handler.
pub(crate) async fn require_member(
    state: &AppState,
    house_id: &str,
    user_id: &str,
) -> Result<House, ApiError> {
    let house = HouseRepository::new(state.db.clone())
        .get(house_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    let is_member = MembershipRepository::new(state.db.clone())
        .is_member(house_id, user_id)
        .await?;
    if !is_member {
        return Err(ApiError::Forbidden);
    }
    Ok(house)
}

/// GET /api/houses/{house_id}
pub async fn get(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(house_id): Path<String>,
) -> Result<Json<House>, ApiError> {
    let house = require_member(&state, &house_id, &user.user_id).await?;
    Ok(Json(house))
}
