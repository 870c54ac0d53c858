use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    response::IntoResponse,
    Json,
};
use http::StatusCode;
use mime::Mime;
use serde::Deserialize;

use crate::{
    cms::{AssetKind, AssetUpload},
    models::error::Error,
    utils::state::AppState,
};

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

fn is_allowed_image(content_type: &Mime) -> bool {
    matches!(
        (content_type.type_().as_str(), content_type.subtype().as_str()),
        ("image", "jpeg") | ("image", "png") | ("image", "webp") | ("image", "gif")
    )
}

/// Stores the multipart `file` field as a CMS asset and returns `{ _id, url }`.
pub async fn upload_asset(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    let kind = match query.kind.as_deref() {
        None | Some("") => AssetKind::Image,
        Some(raw) => raw.parse::<AssetKind>().map_err(|e| Error::bad_request(&e))?,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::bad_request(&e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type: Mime = field
            .content_type()
            .and_then(|ct| ct.parse().ok())
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);

        if kind == AssetKind::Image && !is_allowed_image(&content_type) {
            return Err(Error::bad_request(
                "Only images are allowed (jpg, png, webp, gif)",
            ));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| Error::bad_request(&e.body_text()))?;
        if bytes.is_empty() {
            return Err(Error::bad_request("The uploaded file is empty"));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(Error::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "The file exceeds the 10MB limit",
            ));
        }

        let asset = state
            .cms
            .upload(AssetUpload {
                kind,
                filename: filename.clone(),
                content_type: content_type.essence_str().to_string(),
                bytes: bytes.to_vec(),
            })
            .await?;
        tracing::info!("uploaded {} '{}' as {}", kind, filename, asset.id);
        return Ok((StatusCode::OK, Json(asset)));
    }

    Err(Error::bad_request("No 'file' field was sent"))
}
