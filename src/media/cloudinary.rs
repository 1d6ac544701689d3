use crate::error::UploadError;
use crate::media::traits::MediaUploader;
use crate::media::types::{MediaFile, MediaKind, UploadedMedia};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    #[serde(default)]
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Unsigned uploads to Cloudinary
pub struct CloudinaryUploader {
    client: Client,
    cloud_name: String,
    upload_preset: String,
}

impl CloudinaryUploader {
    pub fn new(cloud_name: impl Into<String>, upload_preset: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("dealership-catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            cloud_name: cloud_name.into(),
            upload_preset: upload_preset.into(),
        })
    }

    fn endpoint(&self, kind: MediaKind) -> String {
        format!("{}/{}/{}/upload", API_BASE, self.cloud_name, kind)
    }

    fn form_for(&self, file: &MediaFile) -> Result<Form, UploadError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;

        let mut form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        if file.kind() == MediaKind::Image {
            form = form.text("f_auto", "true").text("q_auto", "true");
        }

        Ok(form)
    }
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(&self, file: &MediaFile) -> Result<UploadedMedia, UploadError> {
        let kind = file.kind();
        let url = self.endpoint(kind);

        debug!("Uploading {} ({} bytes) to {}", file.file_name, file.bytes.len(), url);

        let response = self
            .client
            .post(&url)
            .multipart(self.form_for(file)?)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body: Option<ErrorResponse> = response.json().await.ok();
            let message = body
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("{} upload failed", kind));

            warn!("Cloudinary rejected {} with {}: {}", file.file_name, status, message);
            return Err(UploadError::Rejected { kind, message });
        }

        let uploaded: UploadResponse = response.json().await?;
        info!("Uploaded {} as {}", file.file_name, uploaded.public_id);

        Ok(UploadedMedia {
            url: uploaded.secure_url,
            kind,
        })
    }

    fn provider_name(&self) -> &'static str {
        "Cloudinary"
    }
}
