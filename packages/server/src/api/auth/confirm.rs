use axum::{
    extract::{Query, State},
    response::Redirect,
};
use mokki_entity::types::{OtpKind, User};
use mokki_surrealdb::repository::InvitationService;
use serde::Deserialize;
use tower_cookies::Cookies;
use tracing::{debug, warn};

use crate::auth::{AuthenticatedUser, set_session_cookie};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConfirmParams {
    pub code: Option<String>,
    pub token_hash: Option<String>,
    #[serde(rename = "type")]
    pub token_type: Option<String>,
    pub house: Option<String>,
    pub next: Option<String>,
}

/// GET /auth/confirm
///
/// Completes whichever authentication handshake the link carries, ordered,
/// first success wins: authorization-code exchange, then one-time token-hash
/// verification, then an already-established session. On success, a pending
/// invitation for the carried house is reconciled before the redirect; on
/// failure the request terminates with an error redirect. No retries.
pub async fn get(
    State(state): State<AppState>,
    cookies: Cookies,
    session_user: Option<AuthenticatedUser>,
    Query(params): Query<ConfirmParams>,
) -> Redirect {
    let next = params
        .next
        .unwrap_or_else(|| state.config.dashboard_path.clone());
    let house = params.house.as_deref();

    // 1. PKCE-style authorization code exchange
    if let Some(code) = params.code.as_deref() {
        return match state.session_service.exchange_code(code).await {
            Ok(user) => finish_sign_in(&state, &cookies, &user, house, &next).await,
            Err(e) => error_redirect(&e.to_string()),
        };
    }

    // 2. One-time token-hash verification
    if let Some(token_hash) = params.token_hash.as_deref() {
        if let Some(raw_kind) = params.token_type.as_deref() {
            let Ok(kind) = raw_kind.parse::<OtpKind>() else {
                return error_redirect("invalid verification type");
            };
            return match state.session_service.verify_one_time(token_hash, kind).await {
                Ok(user) => finish_sign_in(&state, &cookies, &user, house, &next).await,
                Err(e) => error_redirect(&e.to_string()),
            };
        }
    }

    // 3. A session established before this handler ran
    if let Some(user) = session_user {
        if let Some(house_id) = house {
            reconcile_best_effort(&state, house_id, &user.email, &user.user_id).await;
        }
        return Redirect::to(&next);
    }

    error_redirect("Unable to verify authentication")
}

async fn finish_sign_in(
    state: &AppState,
    cookies: &Cookies,
    user: &User,
    house: Option<&str>,
    next: &str,
) -> Redirect {
    match state.session_service.create_session_token(user) {
        Ok(token) => set_session_cookie(cookies, token),
        Err(e) => return error_redirect(&e.to_string()),
    }
    if let Some(house_id) = house {
        reconcile_best_effort(state, house_id, &user.email, &user.user_id).await;
    }
    Redirect::to(next)
}

/// Invite reconciliation never blocks the redirect: lookup and update
/// failures are logged and swallowed.
async fn reconcile_best_effort(state: &AppState, house_id: &str, email: &str, user_id: &str) {
    let service = InvitationService::new(state.db.clone());
    match service.reconcile(house_id, email, user_id).await {
        Ok(outcome) => debug!("invite reconciliation for house {house_id}: {outcome:?}"),
        Err(e) => warn!("invite reconciliation failed for house {house_id}: {e}"),
    }
}

fn error_redirect(message: &str) -> Redirect {
    Redirect::to(&format!("/auth/error?error={}", urlencoding::encode(message)))
}
