use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use mokki_surrealdb::repository::UserRepository;
use tower_cookies::Cookies;

use crate::auth::{AuthenticatedUser, SESSION_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;

/// Resolves the current session, if any, and stashes the identity in the
/// request extensions. Never rejects — unauthenticated requests pass through
/// anonymously.
pub async fn auth_middleware(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(user) = resolve_user(&state, &cookies, request.headers()).await {
        request.extensions_mut().insert(user);
    }
    next.run(request).await
}

/// Gate for routes that require an established session.
pub async fn require_auth_middleware(request: Request, next: Next) -> Response {
    if request.extensions().get::<AuthenticatedUser>().is_none() {
        return ApiError::Unauthorized.into_response();
    }
    next.run(request).await
}

/// The session resolver: a bearer token or the session cookie, validated and
/// mapped to a live account. `None` covers missing, malformed, expired, and
/// orphaned tokens alike.
pub async fn resolve_user(
    state: &AppState,
    cookies: &Cookies,
    headers: &HeaderMap,
) -> Option<AuthenticatedUser> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);
    let token =
        bearer.or_else(|| cookies.get(SESSION_COOKIE).map(|c| c.value().to_string()))?;

    let claims = state.session_service.validate_token(&token).ok()?;
    let user = UserRepository::new(state.db.clone())
        .get_by_id(&claims.sub)
        .await
        .ok()
        .flatten()?;

    Some(AuthenticatedUser {
        user_id: user.user_id,
        email: user.email,
        display_name: user.display_name,
    })
}
