use axum::{extract::Query, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::{models::error::Error, utils::image_link::rewrite_image_url};

#[derive(Debug, Deserialize)]
pub struct ImageLinkQuery {
    pub url: Option<String>,
}

/// Turns a share link from an image host into a direct image URL.
pub async fn convert_image_link(Query(query): Query<ImageLinkQuery>) -> Result<impl IntoResponse, Error> {
    let url = query
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| Error::bad_request("url query parameter is required"))?;
    Ok(Json(json!({ "url": rewrite_image_url(&url) })))
}
