use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use http::StatusCode;
use std::sync::Arc;

use crate::{
    models::{access::AccessTier, error::Error},
    utils::{jwt_encode::jwt_decode, state::AppState},
};

/// Validates the admin token and checks that its tier may reach the
/// requested resource. The claims are handed on as a request extension.
pub async fn admin_guard(
    State(state): State<Arc<AppState>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, Error> {
    let TypedHeader(auth) = bearer.ok_or((StatusCode::UNAUTHORIZED, "Missing Bearer token"))?;

    let claims = jwt_decode(auth.token(), &state.config.jwt_secret).map_err(|e| {
        Error::new(
            StatusCode::UNAUTHORIZED,
            &format!("Token validation failed: {}", e),
        )
    })?;

    let path = req.uri().path().to_string();
    if claims.tier == AccessTier::None || !claims.tier.allows_path(&path) {
        tracing::warn!("{} access refused for {}", claims.tier, path);
        return Err(Error::new(
            StatusCode::FORBIDDEN,
            "Your access level does not include this section",
        ));
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
