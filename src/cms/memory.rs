use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Asset, AssetKind, AssetUpload, CmsClient, CmsError};
use crate::models::media::{asset_url, CdnConfig};

/// In-process document store with the same semantics as the hosted CMS.
/// Used when `CMS_BACKEND=memory` and by tests.
pub struct MemoryCms {
    cdn: CdnConfig,
    docs: RwLock<Vec<Value>>,
}

fn doc_id(doc: &Value) -> Option<&str> {
    doc.get("_id").and_then(Value::as_str)
}

impl MemoryCms {
    pub fn new(cdn: CdnConfig) -> Self {
        Self {
            cdn,
            docs: RwLock::new(Vec::new()),
        }
    }

    /// Seeds the store. Later documents count as newer.
    pub fn with_documents(cdn: CdnConfig, docs: Vec<Value>) -> Self {
        Self {
            cdn,
            docs: RwLock::new(docs),
        }
    }

    fn stamp(doc_type: &str, id: String, mut doc: Map<String, Value>) -> Value {
        let now = Utc::now().to_rfc3339();
        doc.insert("_id".into(), Value::String(id));
        doc.insert("_type".into(), Value::String(doc_type.to_string()));
        doc.entry("_createdAt").or_insert_with(|| Value::String(now.clone()));
        doc.insert("_updatedAt".into(), Value::String(now));
        doc.insert("_rev".into(), Value::String(Uuid::new_v4().simple().to_string()));
        Value::Object(doc)
    }
}

#[async_trait]
impl CmsClient for MemoryCms {
    async fn documents(&self, doc_type: &str) -> Result<Vec<Value>, CmsError> {
        let docs = self.docs.read().await;
        Ok(docs
            .iter()
            .rev()
            .filter(|d| d.get("_type").and_then(Value::as_str) == Some(doc_type))
            .cloned()
            .collect())
    }

    async fn document(&self, id: &str) -> Result<Option<Value>, CmsError> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|d| doc_id(d) == Some(id)).cloned())
    }

    async fn create(&self, doc_type: &str, doc: Map<String, Value>) -> Result<Value, CmsError> {
        let id = doc
            .get("_id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

        let mut docs = self.docs.write().await;
        if docs.iter().any(|d| doc_id(d) == Some(id.as_str())) {
            return Err(CmsError::Rejected(format!("document '{id}' already exists")));
        }
        let saved = Self::stamp(doc_type, id, doc);
        docs.push(saved.clone());
        Ok(saved)
    }

    async fn create_or_replace(
        &self,
        doc_type: &str,
        id: &str,
        doc: Map<String, Value>,
    ) -> Result<Value, CmsError> {
        let mut docs = self.docs.write().await;
        let saved = Self::stamp(doc_type, id.to_string(), doc);
        match docs.iter_mut().find(|d| doc_id(d) == Some(id)) {
            Some(existing) => *existing = saved.clone(),
            None => docs.push(saved.clone()),
        }
        Ok(saved)
    }

    async fn patch(&self, id: &str, set: Map<String, Value>) -> Result<Value, CmsError> {
        let mut docs = self.docs.write().await;
        let doc = docs
            .iter_mut()
            .find(|d| doc_id(d) == Some(id))
            .ok_or_else(|| CmsError::NotFound(id.to_string()))?;
        if let Value::Object(fields) = &mut *doc {
            for (key, value) in set {
                fields.insert(key, value);
            }
            fields.insert("_updatedAt".into(), Value::String(Utc::now().to_rfc3339()));
        }
        Ok(doc.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), CmsError> {
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|d| doc_id(d) != Some(id));
        if docs.len() == before {
            return Err(CmsError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn upload(&self, upload: AssetUpload) -> Result<Asset, CmsError> {
        let ext = Path::new(&upload.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "bin".to_string());
        let hash = Uuid::new_v4().simple().to_string();
        let id = match upload.kind {
            AssetKind::Image => format!("image-{hash}-0x0-{ext}"),
            AssetKind::File => format!("file-{hash}-{ext}"),
        };
        let url = asset_url(&id, &self.cdn).unwrap_or_default();

        let mut asset = Map::new();
        asset.insert("url".into(), Value::String(url.clone()));
        asset.insert("originalFilename".into(), Value::String(upload.filename));
        asset.insert("mimeType".into(), Value::String(upload.content_type));
        asset.insert("size".into(), Value::from(upload.bytes.len()));
        let doc_type = format!("sanity.{}Asset", upload.kind);
        self.docs.write().await.push(Self::stamp(&doc_type, id.clone(), asset));

        Ok(Asset { id, url })
    }
}
