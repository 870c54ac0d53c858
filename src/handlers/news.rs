use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};
use http::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::{
    handlers::content::no_store,
    models::{
        error::Error,
        news::{NewsItem, NewsKind},
    },
    portal::{
        deep_link::{resolve_across, Location},
        share::ShareLinks,
        source::{CmsNewsSource, NewsSource},
    },
    utils::{
        pagination::{page_of_index, Page},
        state::AppState,
    },
};

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl PageQuery {
    fn kind(&self) -> Result<NewsKind, Error> {
        match self.kind.as_deref().filter(|k| !k.is_empty()) {
            Some(raw) => raw.parse().map_err(|e: String| Error::bad_request(&e)),
            None => Ok(NewsKind::default()),
        }
    }

    fn size(&self) -> usize {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }
}

/// One page of a news feed.
pub async fn get_news_page(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, Error> {
    let Query(query) = query?;
    let kind = query.kind()?;
    let source = CmsNewsSource::new(state.cms.as_ref(), state.cdn());
    let items = source.news(kind).await.unwrap_or_else(|e| {
        tracing::warn!("failed to load {} feed: {}", kind, e);
        Vec::new()
    });
    let page: Page<NewsItem> = Page::of(&items, query.page.unwrap_or(1), query.size());
    Ok(no_store(page))
}

/// Finds which feed and page hold the article behind `/news/<slug>`,
/// searching the requested feed first and then its sibling tabs. Share links
/// are built against the public site address.
pub async fn resolve_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, Error> {
    let Query(query) = query?;
    let kind = query.kind()?;
    let location = Location::parse(&format!("/news/{slug}"), "");
    let source = CmsNewsSource::new(state.cms.as_ref(), state.cdn());

    match resolve_across(&source, &location, &kind.search_order()).await {
        Some(found) => {
            let item = &found.items[found.index];
            let share = match ShareLinks::for_item(&state.config.public_base_url, item) {
                Ok(links) => Some(links),
                Err(e) => {
                    tracing::warn!("cannot build share links: {}", e);
                    None
                }
            };
            Ok((
                StatusCode::OK,
                Json(json!({
                    "item": item,
                    "type": found.kind,
                    "index": found.index,
                    "page": page_of_index(found.index, query.size()),
                    "share": share,
                })),
            ))
        }
        None => {
            tracing::debug!("no article matches slug '{}'", slug);
            Err(Error::not_found(&format!("no article matches '{slug}'")))
        }
    }
}
