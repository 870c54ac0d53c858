use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::utils::image_link::rewrite_image_url;

const CDN_HOST: &str = "https://cdn.sanity.io";

/// Project coordinates needed to turn asset references into CDN URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnConfig {
    pub project_id: String,
    pub dataset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
}

/// An image or file field: either a plain URL or a CMS asset reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Media {
    Url(String),
    Asset {
        #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        asset: AssetRef,
    },
}

impl Media {
    /// Reference object for an uploaded image asset.
    pub fn image_reference(asset_id: &str) -> Value {
        json!({
            "_type": "image",
            "asset": { "_type": "reference", "_ref": asset_id }
        })
    }

    /// Reference object for an uploaded file asset.
    pub fn file_reference(asset_id: &str) -> Value {
        json!({
            "_type": "file",
            "asset": { "_type": "reference", "_ref": asset_id }
        })
    }

    pub fn url(&self, cdn: &CdnConfig) -> Option<String> {
        match self {
            Media::Url(url) if url.trim().is_empty() => None,
            Media::Url(url) => Some(rewrite_image_url(url)),
            Media::Asset { asset, .. } => asset_url(&asset.reference, cdn),
        }
    }

    /// Replaces an asset reference with its public URL. Unresolvable
    /// references are left untouched.
    pub fn resolve(&mut self, cdn: &CdnConfig) {
        if let Some(url) = self.url(cdn) {
            *self = Media::Url(url);
        }
    }
}

pub fn resolve_opt(media: &mut Option<Media>, cdn: &CdnConfig) {
    if let Some(m) = media.as_mut() {
        m.resolve(cdn);
    }
}

/// Maps `image-<hash>-<w>x<h>-<ext>` and `file-<hash>-<ext>` asset ids onto
/// the CDN.
pub fn asset_url(reference: &str, cdn: &CdnConfig) -> Option<String> {
    if let Some(rest) = reference.strip_prefix("image-") {
        let (body, ext) = rest.rsplit_once('-')?;
        let (hash, dims) = body.rsplit_once('-')?;
        if hash.is_empty() || !dims.contains('x') {
            return None;
        }
        return Some(format!(
            "{CDN_HOST}/images/{}/{}/{hash}-{dims}.{ext}",
            cdn.project_id, cdn.dataset
        ));
    }
    if let Some(rest) = reference.strip_prefix("file-") {
        let (hash, ext) = rest.rsplit_once('-')?;
        if hash.is_empty() {
            return None;
        }
        return Some(format!(
            "{CDN_HOST}/files/{}/{}/{hash}.{ext}",
            cdn.project_id, cdn.dataset
        ));
    }
    None
}
