use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use mokki_surrealdb::repository::{
    MediaInfo, MediaService, MediaUploadResult, ThumbnailMethod,
};
use serde::Deserialize;

use crate::api::houses::by_house_id::require_member;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ThumbnailQuery {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    "scale".to_string()
}

/// POST /api/houses/{house_id}/media — multipart upload of one b-roll item
/// under a `file` field.
pub async fn upload(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(house_id): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MediaUploadResult>), ApiError> {
    require_member(&state, &house_id, &user.user_id).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("missing content type".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let result = MediaService::new(state.db.clone())
            .upload(&house_id, &user.user_id, filename, &content_type, &data)
            .await?;
        return Ok((StatusCode::CREATED, Json(result)));
    }

    Err(ApiError::BadRequest("missing file field".to_string()))
}

/// GET /api/houses/{house_id}/media
pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(house_id): Path<String>,
) -> Result<Json<Vec<MediaInfo>>, ApiError> {
    require_member(&state, &house_id, &user.user_id).await?;
    let items = MediaService::new(state.db.clone()).list(&house_id).await?;
    Ok(Json(items))
}

/// GET /api/houses/{house_id}/media/{media_id} — raw content with the stored
/// content type.
pub async fn download(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((house_id, media_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    require_member(&state, &house_id, &user.user_id).await?;
    let (info, content) = MediaService::new(state.db.clone())
        .download(&house_id, &media_id)
        .await?;
    Ok(([(header::CONTENT_TYPE, info.content_type)], content).into_response())
}

/// GET /api/houses/{house_id}/media/{media_id}/thumbnail?width=&height=&method=
pub async fn thumbnail(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((house_id, media_id)): Path<(String, String)>,
    Query(query): Query<ThumbnailQuery>,
) -> Result<Response, ApiError> {
    require_member(&state, &house_id, &user.user_id).await?;
    let method = ThumbnailMethod::parse(&query.method)?;
    let result = MediaService::new(state.db.clone())
        .thumbnail(&house_id, &media_id, query.width, query.height, method)
        .await?;
    Ok(([(header::CONTENT_TYPE, result.content_type)], result.content).into_response())
}
