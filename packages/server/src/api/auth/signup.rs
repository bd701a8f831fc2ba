use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use mokki_entity::types::{OtpKind, User};
use mokki_entity::utils::normalize_email;
use mokki_surrealdb::repository::UserRepository;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_cookies::{Cookie, Cookies, cookie::SameSite};
use tracing::{info, warn};

use crate::api::invites::PENDING_INVITE_COOKIE;
use crate::email::confirm_link_for_token;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupQuery {
    pub house: Option<String>,
    pub next: Option<String>,
}

/// POST /auth/signup
///
/// Creates the account and emails a confirmation link. When the sign-up was
/// reached through an invite deep link (`?house=`), the invite intent is also
/// stashed in the pending-invite cookie so the recovery path can replay it if
/// the emailed link is opened somewhere the query context got lost.
pub async fn post(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<SignupQuery>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let email = normalize_email(&request.email);
    if !email.contains('@') {
        return Err(ApiError::BadRequest("invalid email address".to_string()));
    }
    if request.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if request.display_name.trim().is_empty() {
        return Err(ApiError::BadRequest("display name must not be empty".to_string()));
    }

    let users = UserRepository::new(state.db.clone());
    if users.get_by_email(&email).await?.is_some() {
        return Err(ApiError::Conflict("an account with this email already exists".to_string()));
    }

    let password_hash = User::hash_password(&request.password).map_err(|e| {
        warn!("password hashing failed: {e}");
        ApiError::Internal
    })?;
    let user = users
        .create(&email, request.display_name.trim(), &password_hash)
        .await?;

    let one_time = state
        .session_service
        .issue_one_time_code(OtpKind::Signup, &user, state.config.one_time_code_ttl_secs)
        .await?;
    let confirm_url = confirm_link_for_token(
        &state.config.base_url,
        &one_time.token_hash,
        OtpKind::Signup,
        query.house.as_deref(),
        query.next.as_deref(),
    );

    match &state.email_service {
        Some(email_service) => {
            if let Err(e) = email_service
                .send_signup_confirmation_email(&user.email, &confirm_url)
                .await
            {
                warn!("failed to send confirmation email to {}: {e}", user.email);
            }
        },
        None => info!("confirmation link for {}: {confirm_url}", user.email),
    }

    if let Some(house_id) = query.house.as_deref() {
        set_pending_invite_cookie(&cookies, house_id, &user.email);
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "user_id": user.user_id,
            "status": "confirmation_email_sent",
        })),
    ))
}

/// The cross-redirect handoff channel: written here, consumed once by the
/// pending-invite recovery endpoint.
fn set_pending_invite_cookie(cookies: &Cookies, house_id: &str, email: &str) {
    let intent = json!({ "houseId": house_id, "email": email }).to_string();
    let cookie = Cookie::build((PENDING_INVITE_COOKIE, intent))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookies.add(cookie);
}
