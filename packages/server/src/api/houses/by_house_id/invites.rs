use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use mokki_entity::types::Invitation;
use mokki_entity::utils::normalize_email;
use mokki_surrealdb::repository::{InvitationRepository, MembershipRepository};
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::houses::by_house_id::require_member;
use crate::auth::AuthenticatedUser;
use crate::email::signup_link;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendInviteRequest {
    pub email: String,
}

/// POST /api/houses/{house_id}/invites — owner-only. Creates a pending
/// invitation and emails the join link. Re-inviting an email with an invite
/// already pending is allowed; the matcher takes the most recent row.
pub async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(house_id): Path<String>,
    Json(request): Json<SendInviteRequest>,
) -> Result<(StatusCode, Json<Invitation>), ApiError> {
    let house = require_member(&state, &house_id, &user.user_id).await?;
    if house.owner_id != user.user_id {
        return Err(ApiError::Forbidden);
    }

    let email = normalize_email(&request.email);
    if !email.contains('@') {
        return Err(ApiError::BadRequest("invalid email address".to_string()));
    }

    let members = MembershipRepository::new(state.db.clone())
        .members_of(&house_id)
        .await?;
    if members.iter().any(|member| member.email == email) {
        return Err(ApiError::Conflict("already a member of this house".to_string()));
    }

    let invitation = InvitationRepository::new(state.db.clone())
        .create(&house_id, &email, &user.user_id)
        .await?;

    match &state.email_service {
        Some(email_service) => {
            if let Err(e) = email_service
                .send_invitation_email(&email, &house.name, &user.display_name, &house_id)
                .await
            {
                warn!("failed to send invitation email to {email}: {e}");
            }
        },
        None => info!(
            "invite link for {email}: {}",
            signup_link(&state.config.base_url, &house_id)
        ),
    }

    Ok((StatusCode::CREATED, Json(invitation)))
}

/// GET /api/houses/{house_id}/invites — member-only listing, newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(house_id): Path<String>,
) -> Result<Json<Vec<Invitation>>, ApiError> {
    require_member(&state, &house_id, &user.user_id).await?;
    let invitations = InvitationRepository::new(state.db.clone())
        .list_for_house(&house_id)
        .await?;
    Ok(Json(invitations))
}
