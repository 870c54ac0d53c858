use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    handlers::{
        content::{
            get_advertisements, get_breaking_news, get_doctors, get_news, get_obituaries,
            get_settings, get_videos,
        },
        image_link::convert_image_link,
        news::{get_news_page, resolve_slug},
        notion::get_articles,
    },
    utils::state::AppState,
};

/// CMS proxy endpoints read by the public site. Paths are relative to
/// `/api/sanity`.
pub fn content_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/news", get(get_news))
        .route("/breaking-news", get(get_breaking_news))
        .route("/advertisements", get(get_advertisements))
        .route("/settings", get(get_settings))
        .route("/doctors", get(get_doctors))
        .route("/obituaries", get(get_obituaries))
        .route("/videos", get(get_videos))
}

pub fn news_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_news_page))
        .route("/resolve/{slug}", get(resolve_slug))
}

pub fn misc_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notion/articles", get(get_articles))
        .route("/image-link", get(convert_image_link))
}
