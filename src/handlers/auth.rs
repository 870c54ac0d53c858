use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Extension, Json,
};
use http::StatusCode;
use serde_json::json;

use crate::{
    models::{
        access::AccessTier,
        error::Error,
        jwt::{Claims, LoginRequest, LoginResponse},
    },
    utils::{hash_password::verify_password, jwt_encode::jwt_encode, state::AppState},
};

/// Tier granted by `password`. The full-access password is checked first.
pub fn tier_for_password(state: &AppState, password: &str) -> AccessTier {
    if verify_password(password, &state.config.admin_full_password_hash) {
        AccessTier::Full
    } else if verify_password(password, &state.config.admin_local_password_hash) {
        AccessTier::Local
    } else {
        AccessTier::None
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(payload) = payload?;
    if payload.password.is_empty() {
        return Err(Error::bad_request("Password is required"));
    }

    let tier = tier_for_password(&state, &payload.password);
    if tier == AccessTier::None {
        tracing::warn!("admin login rejected");
        return Err(Error::new(StatusCode::UNAUTHORIZED, "Invalid password"));
    }

    let token = jwt_encode(tier, &state.config.jwt_secret)?;
    tracing::info!("admin login with {} access", tier);
    Ok((StatusCode::OK, Json(LoginResponse { tier, token })))
}

/// Echoes the tier of the presented token.
pub async fn session(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "tier": claims.tier, "expiresAt": claims.exp })),
    )
}
