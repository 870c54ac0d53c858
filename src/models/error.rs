use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use serde_json::Value;

use crate::cms::CmsError;

/// Error returned by admin endpoints as `{ error, message }`.
#[derive(Debug)]
pub struct Error {
    pub code: StatusCode,
    pub body: Json<Value>,
}

impl Error {
    pub fn new(code: StatusCode, message: &str) -> Self {
        let error = code.canonical_reason().unwrap_or("Error");
        Self {
            code,
            body: Json(json!({"error": error, "message": message})),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.code, self.body).into_response()
    }
}

impl From<(StatusCode, &str)> for Error {
    fn from((code, msg): (StatusCode, &str)) -> Self {
        Self::new(code, msg)
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, &error.to_string())
    }
}

impl From<argon2::password_hash::errors::Error> for Error {
    fn from(error: argon2::password_hash::errors::Error) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, &error.to_string())
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(&rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(&rejection.body_text())
    }
}

impl From<CmsError> for Error {
    fn from(error: CmsError) -> Self {
        let code = match &error {
            CmsError::NotFound(_) => StatusCode::NOT_FOUND,
            CmsError::Rejected(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        };
        tracing::error!("CMS request failed: {}", error);
        Self::new(code, &error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cms_errors_map_to_statuses() {
        assert_eq!(Error::from(CmsError::NotFound("x".into())).code, StatusCode::NOT_FOUND);
        assert_eq!(Error::from(CmsError::Rejected("x".into())).code, StatusCode::BAD_REQUEST);
        let upstream = CmsError::Status {
            status: 500,
            message: "boom".into(),
        };
        let error = Error::from(upstream);
        assert_eq!(error.code, StatusCode::BAD_GATEWAY);
        assert_eq!(error.body["error"], "Bad Gateway");
    }
}
