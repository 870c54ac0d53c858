use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Map, Value};

use super::{Asset, AssetUpload, CmsClient, CmsError};
use crate::utils::config::SanityConfig;

const LIST_QUERY: &str = "*[_type == $type] | order(_createdAt desc)";
const BY_ID_QUERY: &str = "*[_id == $id][0]";

/// Client for the Sanity HTTP query, mutation and asset APIs.
#[derive(Clone)]
pub struct SanityClient {
    http: Client,
    config: SanityConfig,
}

impl SanityClient {
    pub fn new(http: Client, config: SanityConfig) -> Self {
        Self { http, config }
    }

    fn api_base(&self) -> String {
        format!(
            "https://{}.api.sanity.io/v{}",
            self.config.project_id, self.config.api_version
        )
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn read_json(res: Response, subject: &str) -> Result<Value, CmsError> {
        let status = res.status();
        let body = res.text().await?;
        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                v["error"]["description"]
                    .as_str()
                    .or_else(|| v["message"].as_str())
                    .or_else(|| v["error"].as_str())
                    .map(str::to_string)
            })
            .unwrap_or(body);

        Err(match status {
            StatusCode::NOT_FOUND => CmsError::NotFound(subject.to_string()),
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT => CmsError::Rejected(message),
            _ => CmsError::Status {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn query(&self, groq: &str, params: &[(&str, &str)]) -> Result<Value, CmsError> {
        let url = format!("{}/data/query/{}", self.api_base(), self.config.dataset);
        let mut pairs: Vec<(String, String)> = vec![("query".into(), groq.into())];
        for (name, value) in params {
            pairs.push((format!("${name}"), Value::String((*value).to_string()).to_string()));
        }

        tracing::debug!("sanity query {} {:?}", groq, params);
        let res = self.authorized(self.http.get(url).query(&pairs)).send().await?;
        let mut body = Self::read_json(res, groq).await?;
        Ok(body["result"].take())
    }

    async fn mutate(&self, mutation: Value, subject: &str) -> Result<Value, CmsError> {
        let url = format!("{}/data/mutate/{}", self.api_base(), self.config.dataset);
        let res = self
            .authorized(self.http.post(url))
            .query(&[("returnIds", "true"), ("returnDocuments", "true")])
            .json(&json!({ "mutations": [mutation] }))
            .send()
            .await?;
        let mut body = Self::read_json(res, subject).await?;
        Ok(body["results"][0]["document"].take())
    }
}

#[async_trait]
impl CmsClient for SanityClient {
    async fn documents(&self, doc_type: &str) -> Result<Vec<Value>, CmsError> {
        match self.query(LIST_QUERY, &[("type", doc_type)]).await? {
            Value::Array(docs) => Ok(docs),
            Value::Null => Ok(Vec::new()),
            other => Err(CmsError::Rejected(format!(
                "expected a list of {doc_type} documents, got {other}"
            ))),
        }
    }

    async fn document(&self, id: &str) -> Result<Option<Value>, CmsError> {
        match self.query(BY_ID_QUERY, &[("id", id)]).await? {
            Value::Null => Ok(None),
            doc => Ok(Some(doc)),
        }
    }

    async fn create(&self, doc_type: &str, mut doc: Map<String, Value>) -> Result<Value, CmsError> {
        doc.insert("_type".into(), Value::String(doc_type.to_string()));
        self.mutate(json!({ "create": doc }), doc_type).await
    }

    async fn create_or_replace(
        &self,
        doc_type: &str,
        id: &str,
        mut doc: Map<String, Value>,
    ) -> Result<Value, CmsError> {
        doc.insert("_id".into(), Value::String(id.to_string()));
        doc.insert("_type".into(), Value::String(doc_type.to_string()));
        self.mutate(json!({ "createOrReplace": doc }), id).await
    }

    async fn patch(&self, id: &str, set: Map<String, Value>) -> Result<Value, CmsError> {
        let doc = self
            .mutate(json!({ "patch": { "id": id, "set": set } }), id)
            .await?;
        if doc.is_null() {
            return Err(CmsError::NotFound(id.to_string()));
        }
        Ok(doc)
    }

    async fn delete(&self, id: &str) -> Result<(), CmsError> {
        self.mutate(json!({ "delete": { "id": id } }), id).await?;
        Ok(())
    }

    async fn upload(&self, upload: AssetUpload) -> Result<Asset, CmsError> {
        let url = format!(
            "{}/assets/{}/{}",
            self.api_base(),
            upload.kind.endpoint(),
            self.config.dataset
        );
        let res = self
            .authorized(self.http.post(url))
            .query(&[("filename", upload.filename.as_str())])
            .header(http::header::CONTENT_TYPE, upload.content_type)
            .body(upload.bytes)
            .send()
            .await?;
        let body = Self::read_json(res, &upload.filename).await?;
        Ok(serde_json::from_value(body["document"].clone())?)
    }
}
