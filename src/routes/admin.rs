use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post, MethodRouter},
    Router,
};

use crate::{
    handlers::{
        admin::{create, get_settings, list, remove, update, update_settings},
        auth::session,
        middleware::admin_guard,
        upload::{upload_asset, MAX_UPLOAD_BYTES},
    },
    models::{
        advertisement::Advertisement, breaking_news::BreakingNewsItem, doctor::Doctor,
        document::Document, news::NewsItem, obituary::Obituary, settings::SiteSettings,
        video::VideoItem,
    },
    utils::state::AppState,
};

/// List, create, update and delete for one document type.
fn crud<T: Document>() -> MethodRouter<Arc<AppState>> {
    get(list::<T>)
        .post(create::<T>)
        .patch(update::<T>)
        .delete(remove::<T>)
}

fn resource<T: Document>() -> String {
    format!("/{}", T::RESOURCE)
}

/// Token-guarded admin API. Paths are relative to `/api/admin`.
pub fn admin_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(&resource::<NewsItem>(), crud::<NewsItem>())
        .route(&resource::<BreakingNewsItem>(), crud::<BreakingNewsItem>())
        .route(&resource::<Advertisement>(), crud::<Advertisement>())
        .route(&resource::<Obituary>(), crud::<Obituary>())
        .route(&resource::<VideoItem>(), crud::<VideoItem>())
        .route(&resource::<Doctor>(), crud::<Doctor>())
        .route(
            &resource::<SiteSettings>(),
            get(get_settings).patch(update_settings),
        )
        .route(
            "/upload",
            post(upload_asset).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024)),
        )
        .route("/session", get(session))
        .route_layer(from_fn_with_state(state, admin_guard))
}
