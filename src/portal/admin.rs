use std::fmt;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use serde_json::{json, Map, Value};

use super::PortalError;
use crate::{
    cms::{Asset, AssetKind},
    models::{
        access::AccessTier,
        document::{Activatable, Document, SoftLimit},
        jwt::LoginResponse,
    },
};

/// Admin endpoints for one document type.
#[async_trait]
pub trait AdminApi<T: Document>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>, PortalError>;
    async fn create(&self, doc: &T) -> Result<T, PortalError>;
    async fn update(&self, id: &str, fields: Map<String, Value>) -> Result<T, PortalError>;
    async fn delete(&self, id: &str) -> Result<(), PortalError>;
}

/// Talks to `/api/admin/<resource>` with the session token.
#[derive(Clone)]
pub struct HttpAdminApi {
    http: Client,
    base_url: String,
    token: String,
}

impl HttpAdminApi {
    pub fn new(http: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Exchanges an admin password for a session.
    pub async fn login(
        http: Client,
        base_url: impl Into<String>,
        password: &str,
    ) -> Result<(Self, AccessTier), PortalError> {
        let mut api = Self::new(http, base_url, "");
        let res = api
            .http
            .post(api.endpoint("login"))
            .json(&json!({ "password": password }))
            .send()
            .await?;
        let session: LoginResponse = serde_json::from_value(Self::check(res).await?)
            .map_err(|e| PortalError::Invalid(e.to_string()))?;
        api.token = session.token;
        Ok((api, session.tier))
    }

    /// Sends a file as the multipart `file` field.
    pub async fn upload(
        &self,
        kind: AssetKind,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Asset, PortalError> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let res = self
            .http
            .post(self.endpoint("upload"))
            .bearer_auth(&self.token)
            .query(&[("type", kind.as_str())])
            .multipart(Form::new().part("file", part))
            .send()
            .await?;
        serde_json::from_value(Self::check(res).await?).map_err(|e| PortalError::Invalid(e.to_string()))
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/api/admin/{}", self.base_url, resource)
    }

    async fn check(res: Response) -> Result<Value, PortalError> {
        let status = res.status();
        let body: Value = res.json().await.unwrap_or(Value::Null);
        if status.is_success() {
            return Ok(body);
        }
        let message = body["message"]
            .as_str()
            .or_else(|| body["error"].as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Err(PortalError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn decode<T: Document>(body: Value) -> Result<T, PortalError> {
    serde_json::from_value(body).map_err(|e| PortalError::Invalid(e.to_string()))
}

#[async_trait]
impl<T: Document> AdminApi<T> for HttpAdminApi {
    async fn list(&self) -> Result<Vec<T>, PortalError> {
        let res = self
            .http
            .get(self.endpoint(T::RESOURCE))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let body = Self::check(res).await?;
        serde_json::from_value(body).map_err(|e| PortalError::Invalid(e.to_string()))
    }

    async fn create(&self, doc: &T) -> Result<T, PortalError> {
        let res = self
            .http
            .post(self.endpoint(T::RESOURCE))
            .bearer_auth(&self.token)
            .json(doc)
            .send()
            .await?;
        decode(Self::check(res).await?)
    }

    async fn update(&self, id: &str, mut fields: Map<String, Value>) -> Result<T, PortalError> {
        fields.insert("_id".into(), Value::String(id.to_string()));
        let res = self
            .http
            .patch(self.endpoint(T::RESOURCE))
            .bearer_auth(&self.token)
            .json(&fields)
            .send()
            .await?;
        decode(Self::check(res).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), PortalError> {
        let res = self
            .http
            .delete(self.endpoint(T::RESOURCE))
            .bearer_auth(&self.token)
            .query(&[("id", id)])
            .send()
            .await?;
        Self::check(res).await.map(|_| ())
    }
}

/// Message shown to the editor when an action fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminFailure(pub String);

impl fmt::Display for AdminFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The admin console's copy of one content type. Deletes and toggles apply
/// locally first and are rolled back when the server refuses them.
pub struct AdminCollection<T> {
    items: Vec<T>,
    limit: Option<SoftLimit<T>>,
}

impl<T: Document> Default for AdminCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn fields_of<T: Document>(doc: &T) -> Result<Map<String, Value>, AdminFailure> {
    match serde_json::to_value(doc) {
        Ok(Value::Object(mut map)) => {
            map.remove("_id");
            Ok(map)
        }
        Ok(_) => Err(AdminFailure("record is not an object".into())),
        Err(e) => Err(AdminFailure(format!("could not encode record: {e}"))),
    }
}

impl<T: Document> AdminCollection<T> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items,
            limit: T::soft_limit(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|d| d.id() == id)
    }

    pub async fn load(&mut self, api: &dyn AdminApi<T>) -> Result<(), AdminFailure> {
        self.items = api
            .list()
            .await
            .map_err(|e| AdminFailure(format!("Failed to load {}: {e}", T::RESOURCE)))?;
        Ok(())
    }

    /// Removes the record at once; puts it back at its old position if the
    /// server delete fails.
    pub async fn delete(&mut self, id: &str, api: &dyn AdminApi<T>) -> Result<(), AdminFailure> {
        let index = self
            .position(id)
            .ok_or_else(|| AdminFailure(format!("{id} is not in the list")))?;
        let removed = self.items.remove(index);

        if let Err(e) = api.delete(id).await {
            tracing::warn!("delete of {} {} failed: {}", T::DOC_TYPE, id, e);
            let index = index.min(self.items.len());
            self.items.insert(index, removed);
            return Err(AdminFailure(format!("Failed to delete: {e}")));
        }
        Ok(())
    }

    /// Creates new records and updates existing ones. The saved record
    /// replaces the local copy; no refetch happens.
    pub async fn save(&mut self, draft: T, api: &dyn AdminApi<T>) -> Result<T, AdminFailure> {
        if let Err(message) = draft.validate() {
            return Err(AdminFailure(message));
        }

        if draft.id().is_empty() {
            if let Some(limit) = self.limit.as_ref().filter(|l| l.exceeded_by(&self.items, &draft)) {
                return Err(AdminFailure(limit.message.to_string()));
            }
            let saved = api
                .create(&draft)
                .await
                .map_err(|e| AdminFailure(format!("Failed to create: {e}")))?;
            self.items.insert(0, saved.clone());
            return Ok(saved);
        }

        let saved = api
            .update(draft.id(), fields_of(&draft)?)
            .await
            .map_err(|e| AdminFailure(format!("Failed to update: {e}")))?;
        match self.position(saved.id()) {
            Some(index) => self.items[index] = saved.clone(),
            None => self.items.insert(0, saved.clone()),
        }
        Ok(saved)
    }
}

impl<T: Document + Activatable> AdminCollection<T> {
    /// Flips the active flag at once and reverts it if the server refuses.
    pub async fn toggle_active(&mut self, id: &str, api: &dyn AdminApi<T>) -> Result<(), AdminFailure> {
        let index = self
            .position(id)
            .ok_or_else(|| AdminFailure(format!("{id} is not in the list")))?;
        let active = !self.items[index].is_active();
        self.items[index].set_active(active);

        let mut fields = Map::new();
        fields.insert("active".into(), Value::Bool(active));
        match api.update(id, fields).await {
            Ok(saved) => {
                if let Some(index) = self.position(id) {
                    self.items[index] = saved;
                }
                Ok(())
            }
            Err(e) => {
                if let Some(index) = self.position(id) {
                    self.items[index].set_active(!active);
                }
                Err(AdminFailure(format!("Failed to update status: {e}")))
            }
        }
    }
}
