use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;

use super::PortalError;
use crate::{
    cms::{self, CmsClient},
    models::{
        document::Document,
        media::CdnConfig,
        news::{feed, NewsItem, NewsKind},
    },
};

/// Where listings get their news feeds from.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn news(&self, kind: NewsKind) -> Result<Vec<NewsItem>, PortalError>;
}

/// Reads feeds straight from the CMS.
pub struct CmsNewsSource<'a> {
    cms: &'a dyn CmsClient,
    cdn: CdnConfig,
}

impl<'a> CmsNewsSource<'a> {
    pub fn new(cms: &'a dyn CmsClient, cdn: CdnConfig) -> Self {
        Self { cms, cdn }
    }
}

#[async_trait]
impl NewsSource for CmsNewsSource<'_> {
    async fn news(&self, kind: NewsKind) -> Result<Vec<NewsItem>, PortalError> {
        let mut items = feed(cms::all::<NewsItem>(self.cms).await?, kind);
        for item in &mut items {
            item.resolve_media(&self.cdn);
        }
        Ok(items)
    }
}

/// Reads feeds through the portal's public proxy endpoints.
#[derive(Clone)]
pub struct HttpPortal {
    http: Client,
    base_url: String,
}

impl HttpPortal {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// GETs a public endpoint with a cache-busting timestamp. A `{ error }`
    /// payload counts as no content.
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, PortalError> {
        let stamp = Utc::now().timestamp_millis().to_string();
        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("t", stamp.as_str()));

        let res = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(&query)
            .send()
            .await?;
        let status = res.status();
        let body: Value = res.json().await?;
        if !status.is_success() {
            return Err(PortalError::Api {
                status: status.as_u16(),
                message: body["message"]
                    .as_str()
                    .or_else(|| body["error"].as_str())
                    .unwrap_or("request failed")
                    .to_string(),
            });
        }
        if body.get("error").is_some() {
            tracing::warn!("{} returned an error payload: {}", path, body["error"]);
            return Ok(Value::Null);
        }
        Ok(body)
    }
}

#[async_trait]
impl NewsSource for HttpPortal {
    async fn news(&self, kind: NewsKind) -> Result<Vec<NewsItem>, PortalError> {
        let body = self
            .get("/api/sanity/news", &[("type", kind.as_str())])
            .await?;
        if body.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(body).map_err(|e| PortalError::Invalid(e.to_string()))
    }
}
