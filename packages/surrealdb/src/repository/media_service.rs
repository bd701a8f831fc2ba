use crate::repository::error::RepositoryError;
use crate::repository::media::{MediaInfo, MediaRepository};
use chrono::Utc;
use image::{ImageFormat, imageops::FilterType};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Cursor;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

const MAX_MEDIA_SIZE: u64 = 50_000_000; // 50MB
const MAX_THUMBNAIL_DIM: u32 = 2048;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Media not found")]
    NotFound,
    #[error("Content too large")]
    TooLarge,
    #[error("Unsupported format")]
    UnsupportedFormat,
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<RepositoryError> for MediaError {
    fn from(repo_error: RepositoryError) -> Self {
        match repo_error {
            RepositoryError::NotFound { .. } => MediaError::NotFound,
            RepositoryError::Validation { field, message } => {
                MediaError::Validation(format!("{}: {}", field, message))
            },
            _ => MediaError::Database(repo_error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaUploadResult {
    pub media_id: String,
    pub content_type: String,
    pub content_length: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// True when an identical payload already existed for this house and the
    /// existing item was returned instead of a new row.
    pub deduplicated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailResult {
    pub content: Vec<u8>,
    pub content_type: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy)]
pub enum ThumbnailMethod {
    Scale,
    Crop,
}

impl ThumbnailMethod {
    pub fn parse(s: &str) -> Result<Self, MediaError> {
        match s {
            "scale" => Ok(ThumbnailMethod::Scale),
            "crop" => Ok(ThumbnailMethod::Crop),
            _ => Err(MediaError::Validation("invalid thumbnail method".to_string())),
        }
    }
}

fn is_image(content_type: &str) -> bool {
    matches!(
        content_type,
        "image/jpeg" | "image/png" | "image/gif" | "image/webp"
    )
}

fn is_video(content_type: &str) -> bool {
    content_type.starts_with("video/")
}

/// Upload, download, and thumbnail logic over the media repository.
pub struct MediaService<C: Connection> {
    media: MediaRepository<C>,
}

impl<C: Connection> MediaService<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            media: MediaRepository::new(db),
        }
    }

    pub async fn upload(
        &self,
        house_id: &str,
        user_id: &str,
        filename: Option<String>,
        content_type: &str,
        content: &[u8],
    ) -> Result<MediaUploadResult, MediaError> {
        if !is_image(content_type) && !is_video(content_type) {
            return Err(MediaError::UnsupportedFormat);
        }
        if content.len() as u64 > MAX_MEDIA_SIZE {
            return Err(MediaError::TooLarge);
        }
        if content.is_empty() {
            return Err(MediaError::Validation("empty upload".to_string()));
        }

        let sha256 = format!("{:x}", Sha256::digest(content));
        if let Some(existing) = self.media.find_by_hash(house_id, &sha256).await? {
            return Ok(MediaUploadResult {
                media_id: existing.media_id,
                content_type: existing.content_type,
                content_length: existing.content_length,
                width: existing.width,
                height: existing.height,
                deduplicated: true,
            });
        }

        let (width, height) = if is_image(content_type) {
            let img = image::load_from_memory(content)
                .map_err(|_| MediaError::UnsupportedFormat)?;
            (Some(img.width()), Some(img.height()))
        } else {
            (None, None)
        };

        let info = MediaInfo {
            media_id: Uuid::new_v4().to_string(),
            house_id: house_id.to_string(),
            uploaded_by: user_id.to_string(),
            content_type: content_type.to_string(),
            content_length: content.len() as u64,
            filename,
            width,
            height,
            sha256,
            created_at: Utc::now(),
        };
        let stored = self.media.store(&info, content).await?;

        Ok(MediaUploadResult {
            media_id: stored.media_id,
            content_type: stored.content_type,
            content_length: stored.content_length,
            width: stored.width,
            height: stored.height,
            deduplicated: false,
        })
    }

    pub async fn download(
        &self,
        house_id: &str,
        media_id: &str,
    ) -> Result<(MediaInfo, Vec<u8>), MediaError> {
        let info = self
            .media
            .get_info(media_id)
            .await?
            .filter(|info| info.house_id == house_id)
            .ok_or(MediaError::NotFound)?;
        let content = self
            .media
            .get_content(media_id)
            .await?
            .ok_or(MediaError::NotFound)?;
        Ok((info, content))
    }

    /// Generate a JPEG thumbnail from an image original. `scale` preserves
    /// aspect ratio within the box, `crop` fills it.
    pub async fn thumbnail(
        &self,
        house_id: &str,
        media_id: &str,
        width: u32,
        height: u32,
        method: ThumbnailMethod,
    ) -> Result<ThumbnailResult, MediaError> {
        if width == 0 || height == 0 {
            return Err(MediaError::Validation("invalid thumbnail dimensions".to_string()));
        }
        if width > MAX_THUMBNAIL_DIM || height > MAX_THUMBNAIL_DIM {
            return Err(MediaError::TooLarge);
        }

        let (info, content) = self.download(house_id, media_id).await?;
        if !is_image(&info.content_type) {
            return Err(MediaError::UnsupportedFormat);
        }

        let img = image::load_from_memory(&content)
            .map_err(|_| MediaError::UnsupportedFormat)?;
        let thumbnail = match method {
            ThumbnailMethod::Crop => img.resize_to_fill(width, height, FilterType::Lanczos3),
            ThumbnailMethod::Scale => img.resize(width, height, FilterType::Lanczos3),
        };
        // JPEG carries no alpha channel
        let thumbnail = image::DynamicImage::ImageRgb8(thumbnail.into_rgb8());

        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);
        thumbnail
            .write_to(&mut cursor, ImageFormat::Jpeg)
            .map_err(|e| MediaError::Validation(format!("thumbnail encoding failed: {e}")))?;

        Ok(ThumbnailResult {
            width: thumbnail.width(),
            height: thumbnail.height(),
            content: buffer,
            content_type: "image/jpeg".to_string(),
        })
    }

    pub async fn list(&self, house_id: &str) -> Result<Vec<MediaInfo>, MediaError> {
        Ok(self.media.list_for_house(house_id).await?)
    }
}
