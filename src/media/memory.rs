use crate::error::UploadError;
use crate::media::traits::MediaUploader;
use crate::media::types::{MediaFile, UploadedMedia};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// Uploader that keeps files in memory and hands out `memory://` URLs.
///
/// Uploads of a file whose name is listed in `fail_on` are rejected, which
/// lets callers exercise the abort path.
#[derive(Default)]
pub struct MemoryUploader {
    uploaded: Mutex<Vec<(String, MediaFile)>>,
    counter: AtomicUsize,
    fail_on: Vec<String>,
}

impl MemoryUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(file_names: &[&str]) -> Self {
        Self {
            fail_on: file_names.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// URLs handed out so far, in upload order
    pub fn urls(&self) -> Vec<String> {
        let uploaded = self.uploaded.lock().unwrap_or_else(|p| p.into_inner());
        uploaded.iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn upload_count(&self) -> usize {
        self.urls().len()
    }
}

#[async_trait]
impl MediaUploader for MemoryUploader {
    async fn upload(&self, file: &MediaFile) -> Result<UploadedMedia, UploadError> {
        let kind = file.kind();

        if self.fail_on.iter().any(|name| name == &file.file_name) {
            return Err(UploadError::Rejected {
                kind,
                message: format!("{} upload failed", kind),
            });
        }

        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let url = format!("memory://{}/{}/{}", kind, n, file.file_name);
        debug!("Stored {} in memory as {}", file.file_name, url);

        let mut uploaded = self.uploaded.lock().unwrap_or_else(|p| p.into_inner());
        uploaded.push((url.clone(), file.clone()));

        Ok(UploadedMedia { url, kind })
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}
