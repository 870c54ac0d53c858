use serde::{Deserialize, Serialize};

use crate::models::document::{default_true, Document};

pub const SETTINGS_ID: &str = "siteSettings";

fn settings_id() -> String {
    SETTINGS_ID.to_string()
}

/// Feature switches for the home page. Missing flags read as visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(rename = "_id", default = "settings_id")]
    pub id: String,
    #[serde(default = "default_true")]
    pub live_stream_visible: bool,
    #[serde(default = "default_true")]
    pub hero_section_visible: bool,
    #[serde(default = "default_true")]
    pub advertisements_visible: bool,
    #[serde(default = "default_true")]
    pub latest_news_visible: bool,
    #[serde(default = "default_true")]
    pub top_stories_visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_stream_url: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            id: settings_id(),
            live_stream_visible: true,
            hero_section_visible: true,
            advertisements_visible: true,
            latest_news_visible: true,
            top_stories_visible: true,
            live_stream_url: None,
        }
    }
}

impl Document for SiteSettings {
    const DOC_TYPE: &'static str = "siteSettings";
    const RESOURCE: &'static str = "settings";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_flags_default_to_visible() {
        let s: SiteSettings = serde_json::from_value(json!({ "heroSectionVisible": false })).unwrap();
        assert!(!s.hero_section_visible);
        assert!(s.live_stream_visible && s.top_stories_visible);
        assert_eq!(s.id, SETTINGS_ID);
    }
}
