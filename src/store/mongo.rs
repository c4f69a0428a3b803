//! MongoDB record store.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Bson, DateTime, Document};
use mongodb::{Client, Database};
use serde_json::{Map, Value};
use tracing::debug;

use super::{RecordSession, RecordStore, StoreError};
use crate::config::DatabaseConfig;
use crate::models::FinalTableRecord;

/// Database used when neither the config nor the URI names one.
const DEFAULT_DATABASE: &str = "test";

/// Opens a fresh client per session from a connection string.
#[derive(Debug, Clone)]
pub struct MongoStore {
    uri: String,
    database: Option<String>,
}

impl MongoStore {
    pub fn new(uri: impl Into<String>, database: Option<String>) -> Self {
        Self {
            uri: uri.into(),
            database,
        }
    }

    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(config.uri.clone(), config.name.clone())
    }
}

#[async_trait]
impl RecordStore for MongoStore {
    fn name(&self) -> &'static str {
        "mongodb"
    }

    async fn connect(&self) -> Result<Box<dyn RecordSession>, StoreError> {
        let client = Client::with_uri_str(&self.uri)
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;

        let db = match &self.database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        // The driver connects lazily; ping so connection failures surface here.
        if let Err(e) = db.run_command(doc! { "ping": 1 }).await {
            client.shutdown().await;
            return Err(StoreError::Connect(e.to_string()));
        }

        debug!("Connected to MongoDB database {}", db.name());
        Ok(Box::new(MongoSession { client, db }))
    }
}

struct MongoSession {
    client: Client,
    db: Database,
}

#[async_trait]
impl RecordSession for MongoSession {
    async fn find_all(&self, collection: &str) -> Result<Vec<FinalTableRecord>, StoreError> {
        let cursor = self
            .db
            .collection::<Document>(collection)
            .find(doc! {})
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(documents.into_iter().map(document_to_record).collect())
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}

/// Lower a BSON document to plain JSON: ids become hex strings and dates
/// RFC 3339 strings.
pub fn document_to_record(document: Document) -> FinalTableRecord {
    FinalTableRecord::new(lower_document(document))
}

fn lower_document(document: Document) -> Map<String, Value> {
    document
        .into_iter()
        .map(|(key, value)| (key, lower_bson(value)))
        .collect()
}

fn lower_bson(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match iso_millis_string(dt) {
            Some(s) => Value::String(s),
            None => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(inner) => Value::Object(lower_document(inner)),
        Bson::Array(items) => Value::Array(items.into_iter().map(lower_bson).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// UTC timestamp with exactly three fractional digits, e.g.
/// `2023-11-14T22:13:20.123Z`. `None` outside the RFC 3339 year range.
fn iso_millis_string(dt: DateTime) -> Option<String> {
    let rfc3339 = dt.try_to_rfc3339_string().ok()?;
    let seconds = rfc3339.split('.').next()?.trim_end_matches('Z');
    Some(format!(
        "{}.{:03}Z",
        seconds,
        dt.timestamp_millis().rem_euclid(1000)
    ))
}
