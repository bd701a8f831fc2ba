use axum::Json;
use serde_json::{Value, json};
use tower_cookies::Cookies;

use crate::auth::clear_session_cookie;

/// POST /auth/logout — stateless sessions, so signing out is clearing the
/// cookie.
pub async fn post(cookies: Cookies) -> Json<Value> {
    clear_session_cookie(&cookies);
    Json(json!({ "status": "signed_out" }))
}
