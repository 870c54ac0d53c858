use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use http::header;
use serde::{Deserialize, Serialize};

use crate::{
    cms,
    models::{
        advertisement::{AdPosition, Advertisement},
        breaking_news::BreakingNewsItem,
        doctor::Doctor,
        document::{Activatable, Document},
        news::{feed, NewsItem, NewsKind},
        obituary::Obituary,
        video::VideoItem,
    },
    utils::state::AppState,
};

/// Query accepted by every `/api/sanity/*` endpoint. `t` only busts caches.
#[derive(Debug, Default, Deserialize)]
pub struct ContentQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub position: Option<String>,
    pub all: Option<String>,
    pub t: Option<String>,
}

impl ContentQuery {
    fn include_inactive(&self) -> bool {
        self.all.as_deref() == Some("true")
    }
}

pub(crate) fn no_store<T: Serialize>(body: T) -> impl IntoResponse {
    ([(header::CACHE_CONTROL, "no-store")], Json(body))
}

/// Every document of `T` with media resolved. Failures read as an empty list.
pub(crate) async fn load<T: Document>(state: &AppState) -> Vec<T> {
    match cms::all::<T>(state.cms.as_ref()).await {
        Ok(mut docs) => {
            let cdn = state.cdn();
            for doc in &mut docs {
                doc.resolve_media(&cdn);
            }
            docs
        }
        Err(e) => {
            tracing::warn!("failed to load {}: {}", T::RESOURCE, e);
            Vec::new()
        }
    }
}

fn visible<T: Activatable>(docs: Vec<T>, query: &ContentQuery) -> Vec<T> {
    if query.include_inactive() {
        docs
    } else {
        docs.into_iter().filter(Activatable::is_active).collect()
    }
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContentQuery>,
) -> impl IntoResponse {
    let items = load::<NewsItem>(&state).await;
    let items = match query.kind.as_deref() {
        None | Some("") => feed_all(items),
        Some(raw) => match raw.parse::<NewsKind>() {
            Ok(kind) => feed(items, kind),
            Err(e) => {
                tracing::debug!("{}", e);
                Vec::new()
            }
        },
    };
    no_store(items)
}

fn feed_all(mut items: Vec<NewsItem>) -> Vec<NewsItem> {
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    items
}

/// The ticker as last polled, or every item for the admin console.
pub async fn get_breaking_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContentQuery>,
) -> impl IntoResponse {
    if query.include_inactive() {
        let mut items = load::<BreakingNewsItem>(&state).await;
        items.sort_by(|a, b| b.priority.cmp(&a.priority));
        return no_store(items).into_response();
    }
    no_store(state.ticker.current()).into_response()
}

pub async fn get_advertisements(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContentQuery>,
) -> impl IntoResponse {
    let position = match query.position.as_deref().filter(|p| !p.is_empty()) {
        Some(raw) => match raw.parse::<AdPosition>() {
            Ok(position) => Some(position),
            Err(e) => {
                tracing::debug!("{}", e);
                return no_store(Vec::<Advertisement>::new());
            }
        },
        None => None,
    };

    let now = Utc::now();
    let include_inactive = query.include_inactive();
    let ads: Vec<Advertisement> = load::<Advertisement>(&state)
        .await
        .into_iter()
        .filter(|ad| include_inactive || ad.is_live(now))
        .filter(|ad| position.map_or(true, |p| ad.position == p))
        .collect();
    no_store(ads)
}

pub async fn get_settings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    no_store(state.settings.current())
}

pub async fn get_doctors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContentQuery>,
) -> impl IntoResponse {
    let mut doctors = visible(load::<Doctor>(&state).await, &query);
    doctors.sort_by_key(|d| d.order);
    no_store(doctors)
}

/// Most recent deaths first.
pub async fn get_obituaries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContentQuery>,
) -> impl IntoResponse {
    let mut obituaries = visible(load::<Obituary>(&state).await, &query);
    obituaries.sort_by(|a, b| b.date_of_death.cmp(&a.date_of_death));
    no_store(obituaries)
}

pub async fn get_videos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContentQuery>,
) -> impl IntoResponse {
    let mut videos = visible(load::<VideoItem>(&state).await, &query);
    videos.sort_by_key(|v| v.order);
    no_store(videos)
}
