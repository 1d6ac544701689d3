use crate::error::StoreError;
use crate::store::traits::DocumentStore;
use crate::store::types::{set_path, Document, FieldWrites, Fields, WriteMode};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

type Collection = HashMap<String, Fields>;

/// Document store held in process memory.
///
/// `set_offline(true)` makes every call fail with a 503, standing in for a
/// network outage.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, AtomicOrdering::SeqCst);
    }

    /// Put a document under a known id, replacing whatever was there
    pub async fn put(&self, collection: &str, id: &str, fields: Fields) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Status {
                status: 503,
                body: "store offline".to_string(),
            });
        }
        Ok(())
    }
}

/// Descending order, documents without the field last
fn compare_desc(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let a = a.as_f64().unwrap_or(0.0);
            let b = b.as_f64().unwrap_or(0.0);
            b.partial_cmp(&a).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str, order_by: &str) -> Result<Vec<Document>, StoreError> {
        self.check_online()?;
        let collections = self.collections.read().await;

        let mut documents: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        documents.sort_by(|a, b| compare_desc(a.fields.get(order_by), b.fields.get(order_by)));
        Ok(documents)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.check_online()?;
        let collections = self.collections.read().await;

        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document {
                id: id.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.check_online()?;
        let id = Uuid::new_v4().simple().to_string();
        self.put(collection, &id, fields).await;
        debug!("Inserted {}/{}", collection, id);
        Ok(id)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        writes: FieldWrites,
        mode: WriteMode,
    ) -> Result<(), StoreError> {
        self.check_online()?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if mode == WriteMode::MustExist && !docs.contains_key(id) {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        let fields = docs.entry(id.to_string()).or_default();

        for (path, value) in writes {
            set_path(fields, &path, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.check_online()?;
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
