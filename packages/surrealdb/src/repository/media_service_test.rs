#[cfg(test)]
mod media_service_tests {
    use crate::repository::media_service::{MediaError, MediaService, ThumbnailMethod};
    use crate::test_utils::create_test_db;
    use image::ImageFormat;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::new_rgba8(width, height);
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .expect("Failed to encode test image");
        buffer
    }

    #[tokio::test]
    async fn test_upload_probes_image_dimensions() {
        let db = create_test_db().await.expect("Failed to create test database");
        let media = MediaService::new(db);

        let result = media
            .upload("H1", "user-1", Some("slope.png".to_string()), "image/png", &png_bytes(64, 48))
            .await
            .expect("Upload failed");

        assert!(!result.media_id.is_empty());
        assert_eq!(result.width, Some(64));
        assert_eq!(result.height, Some(48));
        assert!(!result.deduplicated);
    }

    #[tokio::test]
    async fn test_identical_payload_deduplicates_per_house() {
        let db = create_test_db().await.expect("Failed to create test database");
        let media = MediaService::new(db);
        let payload = png_bytes(32, 32);

        let first = media
            .upload("H1", "user-1", None, "image/png", &payload)
            .await
            .expect("Upload failed");
        let second = media
            .upload("H1", "user-2", None, "image/png", &payload)
            .await
            .expect("Upload failed");
        let other_house = media
            .upload("H2", "user-1", None, "image/png", &payload)
            .await
            .expect("Upload failed");

        assert_eq!(second.media_id, first.media_id);
        assert!(second.deduplicated);
        assert_ne!(other_house.media_id, first.media_id);
    }

    #[tokio::test]
    async fn test_rejects_non_media_content_types() {
        let db = create_test_db().await.expect("Failed to create test database");
        let media = MediaService::new(db);

        let result = media
            .upload("H1", "user-1", None, "application/pdf", b"not media")
            .await;
        assert!(matches!(result, Err(MediaError::UnsupportedFormat)));
    }

    #[tokio::test]
    async fn test_thumbnail_scales_within_bounds() {
        let db = create_test_db().await.expect("Failed to create test database");
        let media = MediaService::new(db);
        let uploaded = media
            .upload("H1", "user-1", None, "image/png", &png_bytes(200, 100))
            .await
            .expect("Upload failed");

        let thumbnail = media
            .thumbnail("H1", &uploaded.media_id, 50, 50, ThumbnailMethod::Scale)
            .await
            .expect("Thumbnail failed");

        assert_eq!(thumbnail.content_type, "image/jpeg");
        // Scale keeps aspect ratio inside the requested box
        assert!(thumbnail.width <= 50 && thumbnail.height <= 50);
        assert!(!thumbnail.content.is_empty());
    }

    #[tokio::test]
    async fn test_thumbnail_rejects_oversized_requests() {
        let db = create_test_db().await.expect("Failed to create test database");
        let media = MediaService::new(db);
        let uploaded = media
            .upload("H1", "user-1", None, "image/png", &png_bytes(16, 16))
            .await
            .expect("Upload failed");

        let result = media
            .thumbnail("H1", &uploaded.media_id, 4096, 4096, ThumbnailMethod::Crop)
            .await;
        assert!(matches!(result, Err(MediaError::TooLarge)));
    }

    #[tokio::test]
    async fn test_download_is_scoped_to_the_house() {
        let db = create_test_db().await.expect("Failed to create test database");
        let media = MediaService::new(db);
        let payload = png_bytes(8, 8);
        let uploaded = media
            .upload("H1", "user-1", None, "image/png", &payload)
            .await
            .expect("Upload failed");

        let (info, content) = media
            .download("H1", &uploaded.media_id)
            .await
            .expect("Download failed");
        assert_eq!(info.content_type, "image/png");
        assert_eq!(content, payload);

        let wrong_house = media.download("H2", &uploaded.media_id).await;
        assert!(matches!(wrong_house, Err(MediaError::NotFound)));
    }
}
