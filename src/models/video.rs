use serde::{Deserialize, Serialize};

use crate::models::{
    document::{default_true, require, Activatable, Document},
    media::{resolve_opt, CdnConfig, Media},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    pub video_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Media>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub order: i32,
}

impl Document for VideoItem {
    const DOC_TYPE: &'static str = "video";
    const RESOURCE: &'static str = "videos";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.title, "title")?;
        require(&self.video_url, "videoUrl")
    }

    fn resolve_media(&mut self, cdn: &CdnConfig) {
        resolve_opt(&mut self.thumbnail, cdn);
    }
}

impl Activatable for VideoItem {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
