//! Access to the headless CMS that stores every portal document.

mod memory;
mod sanity;

pub use memory::MemoryCms;
pub use sanity::SanityClient;

use std::{fmt, str::FromStr};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::document::Document;

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("CMS request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("CMS responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("CMS returned an unreadable document: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("document '{0}' not found")]
    NotFound(String),
    #[error("CMS rejected the request: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    File,
}

impl AssetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::File => "file",
        }
    }

    /// Path segment of the assets endpoint.
    pub fn endpoint(self) -> &'static str {
        match self {
            AssetKind::Image => "images",
            AssetKind::File => "files",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(AssetKind::Image),
            "file" => Ok(AssetKind::File),
            other => Err(format!("unknown asset type '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssetUpload {
    pub kind: AssetKind,
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Stored asset as returned to the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
}

#[async_trait]
pub trait CmsClient: Send + Sync {
    /// Every document of `doc_type`, newest first.
    async fn documents(&self, doc_type: &str) -> Result<Vec<Value>, CmsError>;

    async fn document(&self, id: &str) -> Result<Option<Value>, CmsError>;

    /// Creates a document. A missing or empty `_id` is assigned by the CMS.
    async fn create(&self, doc_type: &str, doc: Map<String, Value>) -> Result<Value, CmsError>;

    async fn create_or_replace(
        &self,
        doc_type: &str,
        id: &str,
        doc: Map<String, Value>,
    ) -> Result<Value, CmsError>;

    /// Sets the given fields on an existing document.
    async fn patch(&self, id: &str, set: Map<String, Value>) -> Result<Value, CmsError>;

    async fn delete(&self, id: &str) -> Result<(), CmsError>;

    async fn upload(&self, upload: AssetUpload) -> Result<Asset, CmsError>;
}

fn to_object<T: Document>(doc: &T) -> Result<Map<String, Value>, CmsError> {
    match serde_json::to_value(doc)? {
        Value::Object(mut map) => {
            if map.get("_id").and_then(Value::as_str).is_some_and(str::is_empty) {
                map.remove("_id");
            }
            Ok(map)
        }
        other => Err(CmsError::Rejected(format!("expected an object, got {other}"))),
    }
}

/// Loads every document of `T`, skipping ones that no longer match the schema.
pub async fn all<T: Document>(cms: &dyn CmsClient) -> Result<Vec<T>, CmsError> {
    let raw = cms.documents(T::DOC_TYPE).await?;
    Ok(raw
        .into_iter()
        .filter_map(|doc| match serde_json::from_value::<T>(doc) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("skipping malformed {} document: {}", T::DOC_TYPE, e);
                None
            }
        })
        .collect())
}

pub async fn get<T: Document>(cms: &dyn CmsClient, id: &str) -> Result<Option<T>, CmsError> {
    match cms.document(id).await? {
        Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
        None => Ok(None),
    }
}

pub async fn create<T: Document>(cms: &dyn CmsClient, doc: &T) -> Result<T, CmsError> {
    let saved = cms.create(T::DOC_TYPE, to_object(doc)?).await?;
    Ok(serde_json::from_value(saved)?)
}

pub async fn upsert<T: Document>(cms: &dyn CmsClient, doc: &T) -> Result<T, CmsError> {
    let saved = cms
        .create_or_replace(T::DOC_TYPE, doc.id(), to_object(doc)?)
        .await?;
    Ok(serde_json::from_value(saved)?)
}

pub async fn patch<T: Document>(
    cms: &dyn CmsClient,
    id: &str,
    set: Map<String, Value>,
) -> Result<T, CmsError> {
    let saved = cms.patch(id, set).await?;
    Ok(serde_json::from_value(saved)?)
}
