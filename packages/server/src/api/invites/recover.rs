use axum::{Json, extract::State};
use mokki_entity::utils::normalize_email;
use mokki_surrealdb::repository::InvitationService;
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies};
use tracing::{debug, warn};

use crate::api::invites::PENDING_INVITE_COOKIE;
use crate::auth::AuthenticatedUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct PendingInvite {
    #[serde(rename = "houseId")]
    house_id: String,
    email: String,
}

#[derive(Debug, Serialize)]
pub struct RecoverResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// POST /api/invites/recover
///
/// Replays a stored invite intent once a session exists — the fallback for
/// sign-ups whose emailed link was opened without the original query context.
/// The dashboard calls this once per mount. Best-effort throughout: the
/// intent is deleted before acting, reconciliation failures are logged and
/// swallowed, and the caller is always moved forward.
pub async fn post(
    State(state): State<AppState>,
    cookies: Cookies,
    session_user: Option<AuthenticatedUser>,
) -> Json<RecoverResponse> {
    // Key absent is the common case.
    let Some(cookie) = cookies.get(PENDING_INVITE_COOKIE) else {
        return Json(RecoverResponse { status: "idle", redirect: None });
    };

    let intent: PendingInvite = match serde_json::from_str(cookie.value()) {
        Ok(intent) => intent,
        Err(e) => {
            warn!("discarding unreadable pending invite intent: {e}");
            remove_intent(&cookies);
            return Json(RecoverResponse { status: "discarded", redirect: None });
        },
    };

    // No session yet: keep the intent stored for a later attempt.
    let Some(user) = session_user else {
        return Json(RecoverResponse { status: "idle", redirect: None });
    };

    // A different account is now signed in: the intent is not theirs.
    if normalize_email(&intent.email) != user.email {
        debug!("pending invite intent belongs to another account, discarding");
        remove_intent(&cookies);
        return Json(RecoverResponse { status: "discarded", redirect: None });
    }

    // Delete-then-act so the intent is never replayed twice.
    remove_intent(&cookies);
    match InvitationService::new(state.db.clone())
        .reconcile(&intent.house_id, &user.email, &user.user_id)
        .await
    {
        Ok(outcome) => debug!("recovered invite for house {}: {outcome:?}", intent.house_id),
        Err(e) => warn!("invite recovery failed for house {}: {e}", intent.house_id),
    }

    Json(RecoverResponse {
        status: "processed",
        redirect: Some(state.config.dashboard_path.clone()),
    })
}

fn remove_intent(cookies: &Cookies) {
    cookies.remove(Cookie::build((PENDING_INVITE_COOKIE, "")).path("/").build());
}
