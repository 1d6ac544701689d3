//! Connection settings for the hosted services, read from the environment
//! (a `.env` file is loaded first when present).

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub firestore_project_id: String,
    pub firestore_database: String,
    pub firestore_api_key: Option<String>,
    /// Bearer token of a signed-in admin session
    pub firestore_auth_token: Option<String>,
    pub cloudinary_cloud_name: String,
    pub cloudinary_upload_preset: String,
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{} must be set", name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            firestore_project_id: required("FIRESTORE_PROJECT_ID")?,
            firestore_database: optional("FIRESTORE_DATABASE")
                .unwrap_or_else(|| "(default)".to_string()),
            firestore_api_key: optional("FIRESTORE_API_KEY"),
            firestore_auth_token: optional("FIRESTORE_AUTH_TOKEN"),
            cloudinary_cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
            cloudinary_upload_preset: required("CLOUDINARY_UPLOAD_PRESET")?,
        })
    }
}
