#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use gramika_backend::{
    cms::MemoryCms,
    models::{access::AccessTier, media::CdnConfig},
    routes::make_app,
    utils::{
        config::{CmsBackend, Config, SanityConfig},
        hash_password::hash_password,
        jwt_encode::jwt_encode,
        state::AppState,
    },
};

pub const FULL_PASSWORD: &str = "full-access-pass";
pub const LOCAL_PASSWORD: &str = "local-access-pass";
pub const JWT_SECRET: &str = "test-secret";

pub fn cdn() -> CdnConfig {
    CdnConfig {
        project_id: "proj".to_string(),
        dataset: "test".to_string(),
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_base_url: "https://gramika.test".to_string(),
        cms_backend: CmsBackend::Memory,
        sanity: SanityConfig {
            project_id: "proj".to_string(),
            dataset: "test".to_string(),
            api_version: "2024-01-01".to_string(),
            token: None,
        },
        jwt_secret: JWT_SECRET.to_string(),
        admin_full_password_hash: hash_password(FULL_PASSWORD).unwrap(),
        admin_local_password_hash: hash_password(LOCAL_PASSWORD).unwrap(),
        notion: None,
    }
}

pub struct TestApp {
    pub app: Router,
    pub state: Arc<AppState>,
    pub cms: Arc<MemoryCms>,
}

/// App over an in-memory CMS seeded with `docs` (later entries are newer).
pub fn spawn_app(docs: Vec<Value>) -> TestApp {
    let cms = Arc::new(MemoryCms::with_documents(cdn(), docs));
    let state = AppState::init(test_config(), cms.clone(), reqwest::Client::new());
    TestApp {
        app: make_app(state.clone()),
        state,
        cms,
    }
}

pub fn token(tier: AccessTier) -> String {
    jwt_encode(tier, JWT_SECRET).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn authed(method: Method, uri: &str, tier: AccessTier, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token(tier)));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub fn news(id: &str, title: &str, kind: &str, day: u32) -> Value {
    json!({
        "_id": id,
        "_type": "news",
        "title": title,
        "image": { "_type": "image", "asset": { "_ref": format!("image-{id}hash-800x600-jpg") } },
        "publishedAt": format!("2025-05-{day:02}T09:00:00Z"),
        "newsType": kind
    })
}

pub fn breaking(id: &str, priority: i32, active: bool) -> Value {
    json!({
        "_id": id,
        "_type": "breakingNews",
        "title": format!("Breaking {id}"),
        "priority": priority,
        "active": active
    })
}

pub fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i["title"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
