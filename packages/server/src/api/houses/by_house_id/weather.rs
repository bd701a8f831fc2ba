use axum::{
    Json,
    extract::{Path, State},
};
use tracing::error;

use crate::api::houses::by_house_id::require_member;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::weather::SnowReport;

/// GET /api/houses/{house_id}/weather — snow report for the house's
/// coordinates.
pub async fn get(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(house_id): Path<String>,
) -> Result<Json<SnowReport>, ApiError> {
    let house = require_member(&state, &house_id, &user.user_id).await?;
    let (latitude, longitude) = house
        .latitude
        .zip(house.longitude)
        .ok_or_else(|| ApiError::BadRequest("house has no coordinates".to_string()))?;

    let report = state
        .weather_service
        .snow_report(latitude, longitude)
        .await
        .map_err(|e| {
            error!("snow report fetch failed for house {house_id}: {e}");
            ApiError::Internal
        })?;
    Ok(Json(report))
}
