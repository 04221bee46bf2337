use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An image stored in the object store and readable at `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadedImage {
    pub url: String,
    pub object_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub checksum_sha256: String,
}
