use axum::{
    Json,
    extract::{Query, State},
};
use mokki_entity::utils::normalize_email;
use mokki_surrealdb::repository::UserRepository;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::email::confirm_link_for_code;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MagicLinkRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct MagicLinkQuery {
    pub house: Option<String>,
    pub next: Option<String>,
}

/// POST /auth/magic-link — emails a single-use sign-in link carrying an
/// authorization code. Responds identically whether or not the account
/// exists.
pub async fn post(
    State(state): State<AppState>,
    Query(query): Query<MagicLinkQuery>,
    Json(request): Json<MagicLinkRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = normalize_email(&request.email);
    let users = UserRepository::new(state.db.clone());

    if let Some(user) = users.get_by_email(&email).await? {
        let auth_code = state
            .session_service
            .issue_auth_code(&user.user_id, state.config.auth_code_ttl_secs)
            .await?;
        let sign_in_url = confirm_link_for_code(
            &state.config.base_url,
            &auth_code.code,
            query.house.as_deref(),
            query.next.as_deref(),
        );

        match &state.email_service {
            Some(email_service) => {
                if let Err(e) = email_service
                    .send_magic_link_email(&user.email, &sign_in_url)
                    .await
                {
                    warn!("failed to send magic link to {}: {e}", user.email);
                }
            },
            None => info!("magic link for {}: {sign_in_url}", user.email),
        }
    }

    Ok(Json(json!({ "status": "sent" })))
}
