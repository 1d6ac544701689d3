use crate::error::StoreError;
use crate::store::traits::DocumentStore;
use crate::store::types::{nest_writes, Document, FieldWrites, Fields, WriteMode};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Number, Value};
use tracing::{debug, info, warn};

const API_BASE: &str = "https://firestore.googleapis.com/v1";

/// Document as returned by the REST API
#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    document: Option<RawDocument>,
}

/// Cloud Firestore through its REST interface
pub struct FirestoreStore {
    client: Client,
    documents_url: String,
    api_key: Option<String>,
    auth_token: Option<String>,
}

impl FirestoreStore {
    pub fn new(project_id: &str, database: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("dealership-catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            documents_url: format!(
                "{}/projects/{}/databases/{}/documents",
                API_BASE, project_id, database
            ),
            api_key: None,
            auth_token: None,
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Bearer token of a signed-in admin session
    pub fn with_auth_token(mut self, auth_token: Option<String>) -> Self {
        self.auth_token = auth_token;
        self
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = match &self.api_key {
            Some(key) => request.query(&[("key", key)]),
            None => request,
        };
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.documents_url, collection, id)
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("Firestore returned {}: {}", status, body);
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Last path segment of a document resource name
fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

fn into_document(raw: RawDocument) -> Result<Document, StoreError> {
    let mut fields = Fields::new();
    for (key, value) in raw.fields {
        fields.insert(key, decode_value(&value)?);
    }
    Ok(Document {
        id: document_id(&raw.name).to_string(),
        fields,
    })
}

/// Plain JSON to a Firestore typed value
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => json!({ "integerValue": i.to_string() }),
            (None, Some(u)) => json!({ "integerValue": u.to_string() }),
            _ => json!({ "doubleValue": n.as_f64().unwrap_or(0.0) }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

pub fn encode_fields(fields: &Fields) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect();
    Value::Object(encoded)
}

/// Firestore typed value to plain JSON. Timestamps become RFC 3339 strings.
pub fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let (kind, v) = value
        .as_object()
        .and_then(|map| map.iter().next())
        .ok_or_else(|| StoreError::Malformed(format!("untyped value {}", value)))?;

    let decoded = match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => Value::Bool(v.as_bool().unwrap_or(false)),
        "integerValue" => {
            let parsed = match v {
                Value::String(s) => s.parse::<i64>().ok(),
                other => other.as_i64(),
            };
            parsed
                .map(|i| Value::Number(i.into()))
                .ok_or_else(|| StoreError::Malformed(format!("bad integer {}", v)))?
        }
        "doubleValue" => v
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" | "geoPointValue" => {
            v.clone()
        }
        "arrayValue" => {
            let items = v
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect::<Result<Vec<_>, _>>())
                .transpose()?
                .unwrap_or_default();
            Value::Array(items)
        }
        "mapValue" => {
            let mut map = Map::new();
            if let Some(fields) = v.get("fields").and_then(Value::as_object) {
                for (key, inner) in fields {
                    map.insert(key.clone(), decode_value(inner)?);
                }
            }
            Value::Object(map)
        }
        other => return Err(StoreError::Malformed(format!("unknown value type {}", other))),
    };

    Ok(decoded)
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn list(&self, collection: &str, order_by: &str) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}:runQuery", self.documents_url);
        let query = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "orderBy": [{ "field": { "fieldPath": order_by }, "direction": "DESCENDING" }],
            }
        });

        debug!("Querying {} ordered by {}", collection, order_by);
        let response = self.authorize(self.client.post(&url)).json(&query).send().await?;
        let rows: Vec<QueryRow> = Self::check(response).await?.json().await?;

        let documents = rows
            .into_iter()
            .filter_map(|row| row.document)
            .map(into_document)
            .collect::<Result<Vec<_>, _>>()?;

        info!("Fetched {} documents from {}", documents.len(), collection);
        Ok(documents)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let url = self.document_url(collection, id);
        let response = self.authorize(self.client.get(&url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let raw: RawDocument = Self::check(response).await?.json().await?;
        into_document(raw).map(Some)
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let url = format!("{}/{}", self.documents_url, collection);
        let body = json!({ "fields": encode_fields(&fields) });

        let response = self.authorize(self.client.post(&url)).json(&body).send().await?;
        let raw: RawDocument = Self::check(response).await?.json().await?;

        let id = document_id(&raw.name).to_string();
        info!("Created {}/{}", collection, id);
        Ok(id)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        writes: FieldWrites,
        mode: WriteMode,
    ) -> Result<(), StoreError> {
        let url = self.document_url(collection, id);

        let mut params: Vec<(&str, String)> = writes
            .keys()
            .map(|path| ("updateMask.fieldPaths", path.clone()))
            .collect();
        if mode == WriteMode::MustExist {
            params.push(("currentDocument.exists", "true".to_string()));
        }

        let body = json!({ "fields": encode_fields(&nest_writes(&writes)) });
        let response = self
            .authorize(self.client.patch(&url))
            .query(&params)
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Self::check(response).await?;

        debug!("Updated {}/{} ({} fields)", collection, id, writes.len());
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = self.document_url(collection, id);
        let response = self.authorize(self.client.delete(&url)).send().await?;
        Self::check(response).await?;

        info!("Deleted {}/{}", collection, id);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "Firestore"
    }
}
