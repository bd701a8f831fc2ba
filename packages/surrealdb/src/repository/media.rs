use crate::repository::error::RepositoryError;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::{Connection, Surreal};

/// Metadata for one b-roll item. Content bytes live in a separate
/// `media_content` row keyed by the same `media_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    pub media_id: String,
    pub house_id: String,
    pub uploaded_by: String,
    pub content_type: String,
    pub content_length: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub sha256: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MediaContent {
    media_id: String,
    content: String, // base64
}

pub struct MediaRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> MediaRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    pub async fn store(
        &self,
        info: &MediaInfo,
        content: &[u8],
    ) -> Result<MediaInfo, RepositoryError> {
        let created: Option<MediaInfo> = self
            .db
            .create(("media_info", info.media_id.as_str()))
            .content(info.clone())
            .await?;
        let stored = created.ok_or_else(|| RepositoryError::DatabaseError {
            message: "Failed to store media info".to_string(),
            operation: "create".to_string(),
        })?;

        let content_row = MediaContent {
            media_id: info.media_id.clone(),
            content: BASE64.encode(content),
        };
        let _: Option<MediaContent> = self
            .db
            .create(("media_content", info.media_id.as_str()))
            .content(content_row)
            .await?;

        Ok(stored)
    }

    pub async fn get_info(
        &self,
        media_id: &str,
    ) -> Result<Option<MediaInfo>, RepositoryError> {
        let info: Option<MediaInfo> = self.db.select(("media_info", media_id)).await?;
        Ok(info)
    }

    pub async fn get_content(
        &self,
        media_id: &str,
    ) -> Result<Option<Vec<u8>>, RepositoryError> {
        let row: Option<MediaContent> = self.db.select(("media_content", media_id)).await?;
        match row {
            Some(content_row) => {
                let bytes = BASE64.decode(content_row.content).map_err(|e| {
                    RepositoryError::InvalidData {
                        message: format!("stored media content is not valid base64: {e}"),
                    }
                })?;
                Ok(Some(bytes))
            },
            None => Ok(None),
        }
    }

    pub async fn list_for_house(
        &self,
        house_id: &str,
    ) -> Result<Vec<MediaInfo>, RepositoryError> {
        let mut result = self
            .db
            .query("SELECT * FROM media_info WHERE house_id = $house_id ORDER BY created_at DESC")
            .bind(("house_id", house_id.to_string()))
            .await?;
        let infos: Vec<MediaInfo> = result.take(0)?;
        Ok(infos)
    }

    /// Dedup lookup: an identical payload already uploaded to this house.
    pub async fn find_by_hash(
        &self,
        house_id: &str,
        sha256: &str,
    ) -> Result<Option<MediaInfo>, RepositoryError> {
        let mut result = self
            .db
            .query(
                "SELECT * FROM media_info \
                 WHERE house_id = $house_id AND sha256 = $sha256 LIMIT 1",
            )
            .bind(("house_id", house_id.to_string()))
            .bind(("sha256", sha256.to_string()))
            .await?;
        let infos: Vec<MediaInfo> = result.take(0)?;
        Ok(infos.into_iter().next())
    }
}
