use crate::error::RepositoryError;
use crate::models::{SiteContent, SiteContentPatch};
use crate::store::{field_writes_of, DocumentStore, Fields, WriteMode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const SITE_CONTENT_COLLECTION: &str = "settings";
pub const SITE_CONTENT_KEY: &str = "siteContent";

/// The singleton site-content document
#[derive(Clone)]
pub struct SiteContentRepository {
    store: Arc<dyn DocumentStore>,
}

/// Decode one section field by field over its defaults. A stored field that
/// does not fit its slot is skipped with a warning; numbers stored in text
/// slots are kept as text.
fn section<T: Serialize + DeserializeOwned + Default>(fields: &Fields, name: &str) -> T {
    let stored = match fields.get(name) {
        None | Some(Value::Null) => return T::default(),
        Some(Value::Object(stored)) => stored,
        Some(other) => {
            warn!("Site content section `{}` is not an object, using defaults: {}", name, other);
            return T::default();
        }
    };

    let mut merged = match serde_json::to_value(T::default()) {
        Ok(Value::Object(defaults)) => defaults,
        _ => return T::default(),
    };

    for (key, value) in stored {
        let Some(slot) = merged.get(key) else {
            continue;
        };
        let value = match (slot, value) {
            (Value::String(_), Value::Number(n)) => Value::String(n.to_string()),
            _ => value.clone(),
        };

        let mut candidate = merged.clone();
        candidate.insert(key.clone(), value.clone());
        match serde_json::from_value::<T>(Value::Object(candidate)) {
            Ok(_) => {
                merged.insert(key.clone(), value);
            }
            Err(e) => warn!("Site content field `{}.{}` is malformed, using default: {}", name, key, e),
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_else(|e| {
        warn!("Site content section `{}` is malformed, using defaults: {}", name, e);
        T::default()
    })
}

impl SiteContentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Stored content with defaults for anything missing. Never fails: the
    /// public pages render from the defaults when the store is unreachable.
    pub async fn get_content(&self) -> SiteContent {
        match self.try_get_content().await {
            Ok(content) => content,
            Err(e) => {
                error!("Error fetching site content, using defaults: {}", e);
                SiteContent::default()
            }
        }
    }

    pub async fn try_get_content(&self) -> Result<SiteContent, RepositoryError> {
        let Some(doc) = self.store.get(SITE_CONTENT_COLLECTION, SITE_CONTENT_KEY).await? else {
            return Ok(SiteContent::default());
        };

        Ok(SiteContent {
            home: section(&doc.fields, "home"),
            about: section(&doc.fields, "about"),
            showroom: section(&doc.fields, "showroom"),
            contact: section(&doc.fields, "contact"),
        })
    }

    /// Write only the sections and fields present in `patch`
    pub async fn update_content(&self, patch: SiteContentPatch) -> Result<(), RepositoryError> {
        let writes = field_writes_of(&patch, 1)?;
        if writes.is_empty() {
            return Ok(());
        }

        let count = writes.len();
        self.store
            .update(SITE_CONTENT_COLLECTION, SITE_CONTENT_KEY, writes, WriteMode::Upsert)
            .await?;

        info!("Updated {} site content fields", count);
        Ok(())
    }
}
