use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::instrument;

use crate::domain::{
    assessment::ports::{ImageFetcher, LLMClient},
    common::{entities::app_errors::CoreError, services::Service},
    diagnostics::ports::DiagnosticsRepository,
    health::ports::HealthCheckRepository,
    record::ports::RecordRepository,
    storage::{
        entities::UploadedImage,
        ports::{ImageUploadService, ObjectStoragePort},
        value_objects::{MAX_IMAGE_BYTES, UploadImageInput, object_key},
    },
};

impl<RR, LLM, IF, OS, HC, DG> ImageUploadService for Service<RR, LLM, IF, OS, HC, DG>
where
    RR: RecordRepository,
    LLM: LLMClient,
    IF: ImageFetcher,
    OS: ObjectStoragePort,
    HC: HealthCheckRepository,
    DG: DiagnosticsRepository,
{
    #[instrument(skip(self, input), fields(filename = %input.filename, size = input.data.len()))]
    async fn upload_image(&self, input: UploadImageInput) -> Result<UploadedImage, CoreError> {
        if input.filename.trim().is_empty() || input.data.is_empty() {
            return Err(CoreError::Invalid("Invalid file".to_string()));
        }

        if input.data.len() > MAX_IMAGE_BYTES {
            return Err(CoreError::FileTooLarge {
                max_bytes: MAX_IMAGE_BYTES,
            });
        }

        let content_type = input.content_type.trim().to_ascii_lowercase();
        if !content_type.starts_with("image/") {
            return Err(CoreError::UnsupportedMediaType(content_type));
        }

        let checksum_sha256 = hex::encode(Sha256::digest(&input.data));
        let size_bytes = input.data.len() as i64;
        let key = object_key(Utc::now().timestamp_millis(), &input.filename);
        let bucket = self.object_storage.bucket();

        tracing::info!(
            bucket = %bucket,
            object_key = %key,
            size = size_bytes,
            "Uploading image to storage"
        );

        self.object_storage
            .put_object(&bucket, &key, input.data, &content_type)
            .await?;

        let url = self.object_storage.public_url(&key);
        tracing::info!(url = %url, "Image uploaded successfully");

        Ok(UploadedImage {
            url,
            object_key: key,
            content_type,
            size_bytes,
            checksum_sha256,
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::domain::test_support::{InMemoryRecords, test_service};

    fn input(content_type: &str, data: &'static [u8]) -> UploadImageInput {
        UploadImageInput {
            filename: "my tongue.jpg".to_string(),
            content_type: content_type.to_string(),
            data: Bytes::from_static(data),
        }
    }

    #[tokio::test]
    async fn uploads_image_and_returns_public_url() {
        let service = test_service(InMemoryRecords::default());
        let uploaded = service.upload_image(input("image/jpeg", b"abc")).await.unwrap();

        assert!(uploaded.object_key.starts_with("health-tracker-"));
        assert!(uploaded.object_key.ends_with("-my_tongue.jpg"));
        assert_eq!(
            uploaded.url,
            format!("http://localhost:9000/health-images/{}", uploaded.object_key)
        );
        assert_eq!(
            uploaded.checksum_sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(uploaded.size_bytes, 3);

        let puts = service.object_storage.puts();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].0, "health-images");
        assert_eq!(puts[0].2, "image/jpeg");
    }

    #[tokio::test]
    async fn rejects_empty_payload() {
        let service = test_service(InMemoryRecords::default());
        let result = service.upload_image(input("image/png", b"")).await;
        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[tokio::test]
    async fn rejects_non_image_content() {
        let service = test_service(InMemoryRecords::default());
        let result = service.upload_image(input("application/pdf", b"%PDF")).await;
        assert_eq!(
            result,
            Err(CoreError::UnsupportedMediaType("application/pdf".to_string()))
        );
        assert!(service.object_storage.puts().is_empty());
    }

    #[tokio::test]
    async fn rejects_oversized_payload() {
        let service = test_service(InMemoryRecords::default());
        let result = service
            .upload_image(UploadImageInput {
                filename: "big.png".to_string(),
                content_type: "image/png".to_string(),
                data: Bytes::from(vec![0u8; MAX_IMAGE_BYTES + 1]),
            })
            .await;

        assert_eq!(
            result,
            Err(CoreError::FileTooLarge {
                max_bytes: MAX_IMAGE_BYTES
            })
        );
    }
}
