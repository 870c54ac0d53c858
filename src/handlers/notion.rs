use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};
use chrono::Duration;
use dashmap::DashMap;

use crate::{
    handlers::content::no_store,
    models::{cache::CacheEntry, news::NewsItem},
    services::notion::{page_to_news, query_database},
    utils::state::AppState,
};

const CACHE_TTL_MINUTES: i64 = 5;

fn cached(cache: &DashMap<String, CacheEntry<Vec<NewsItem>>>, key: &str) -> Option<Vec<NewsItem>> {
    cache.get(key).and_then(|entry| entry.fresh().cloned())
}

/// Articles from the Notion database, cached for five minutes. Without a
/// configured database, or when Notion fails, the list is empty.
pub async fn get_articles(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let Some(config) = state.config.notion.as_ref() else {
        return no_store(Vec::<NewsItem>::new());
    };

    if let Some(articles) = cached(&state.notion_cache, &config.database_id) {
        tracing::debug!("serving notion articles from cache");
        return no_store(articles);
    }

    let _guard = match state.notion_limiter.acquire().await {
        Ok(guard) => guard,
        Err(e) => {
            tracing::warn!("notion rate limiter closed: {}", e);
            return no_store(Vec::<NewsItem>::new());
        }
    };

    // Another request may have filled the cache while this one waited.
    if let Some(articles) = cached(&state.notion_cache, &config.database_id) {
        return no_store(articles);
    }

    let pages = match query_database(&state.http_client, config).await {
        Ok(pages) => pages,
        Err(e) => {
            tracing::warn!("notion query failed: {}", e);
            return no_store(Vec::<NewsItem>::new());
        }
    };

    let articles: Vec<NewsItem> = pages.iter().filter_map(page_to_news).collect();
    state.notion_cache.insert(
        config.database_id.clone(),
        CacheEntry::new(articles.clone(), Duration::minutes(CACHE_TTL_MINUTES)),
    );
    no_store(articles)
}
