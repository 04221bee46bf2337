use std::future::Future;

use bytes::Bytes;

use crate::domain::{
    common::entities::app_errors::CoreError,
    storage::{entities::UploadedImage, value_objects::UploadImageInput},
};

/// Port for object storage operations (MinIO/S3)
#[cfg_attr(test, mockall::automock)]
pub trait ObjectStoragePort: Send + Sync {
    /// Bucket uploads are written to
    fn bucket(&self) -> String;

    /// Public URL of an object in the upload bucket
    fn public_url(&self, object_key: &str) -> String;

    /// Upload an object directly to storage
    fn put_object(
        &self,
        bucket: &str,
        object_key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Service trait for tongue photo uploads
pub trait ImageUploadService: Send + Sync {
    fn upload_image(
        &self,
        input: UploadImageInput,
    ) -> impl Future<Output = Result<UploadedImage, CoreError>> + Send;
}
