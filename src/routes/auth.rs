use std::sync::Arc;

use axum::{routing::post, Router};

use crate::{handlers::auth::login, utils::state::AppState};

/// Routes reachable without a token.
pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new().route("/login", post(login))
}
