use axum::Json;
use serde_json::{Value, json};

use crate::auth::AuthenticatedUser;

/// GET /auth/whoami
pub async fn get(user: AuthenticatedUser) -> Json<Value> {
    Json(json!({
        "user_id": user.user_id,
        "email": user.email,
        "display_name": user.display_name,
    }))
}
