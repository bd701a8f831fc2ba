use axum::{
    Json,
    extract::{Path, State},
};
use mokki_surrealdb::repository::{HouseMember, MembershipRepository};

use crate::api::houses::by_house_id::require_member;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/houses/{house_id}/members — the owner plus everyone who joined
/// through an accepted invitation.
pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(house_id): Path<String>,
) -> Result<Json<Vec<HouseMember>>, ApiError> {
    require_member(&state, &house_id, &user.user_id).await?;
    let members = MembershipRepository::new(state.db.clone())
        .members_of(&house_id)
        .await?;
    Ok(Json(members))
}
