use axum::{Json, extract::State};
use mokki_entity::utils::normalize_email;
use mokki_surrealdb::repository::UserRepository;
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use crate::auth::{AuthError, set_session_cookie};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user_id: String,
    pub email: String,
    pub display_name: String,
}

/// POST /auth/login — password sign-in. Sets the session cookie and returns
/// the same token for bearer use.
pub async fn post(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let users = UserRepository::new(state.db.clone());
    let user = users
        .get_by_email(&normalize_email(&request.email))
        .await?
        .filter(|user| user.verify_password(&request.password))
        .ok_or(AuthError::InvalidCredentials)?;

    let token = state.session_service.create_session_token(&user)?;
    set_session_cookie(&cookies, token.clone());

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        user_id: user.user_id,
        email: user.email,
        display_name: user.display_name,
    }))
}
