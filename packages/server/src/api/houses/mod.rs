pub mod by_house_id;

use axum::{Json, extract::State, http::StatusCode};
use mokki_entity::types::House;
use mokki_surrealdb::repository::HouseRepository;
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateHouseRequest {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// POST /api/houses — the caller becomes the owner.
pub async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateHouseRequest>,
) -> Result<(StatusCode, Json<House>), ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("house name must not be empty".to_string()));
    }
    let coordinates = match (request.latitude, request.longitude) {
        (Some(latitude), Some(longitude)) => Some((latitude, longitude)),
        (None, None) => None,
        _ => {
            return Err(ApiError::BadRequest(
                "latitude and longitude must be given together".to_string(),
            ));
        },
    };

    let house = HouseRepository::new(state.db.clone())
        .create(name, &user.user_id, coordinates)
        .await?;
    Ok((StatusCode::CREATED, Json(house)))
}

/// GET /api/houses — houses the caller belongs to.
pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<House>>, ApiError> {
    let houses = HouseRepository::new(state.db.clone())
        .list_for_user(&user.user_id)
        .await?;
    Ok(Json(houses))
}
