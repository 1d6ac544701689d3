use crate::error::UploadError;
use crate::media::types::{MediaFile, UploadedMedia};
use async_trait::async_trait;

/// Stores bytes somewhere durable and hands back a URL
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, file: &MediaFile) -> Result<UploadedMedia, UploadError>;

    /// Name of the backing service, for logs
    fn provider_name(&self) -> &'static str;
}
