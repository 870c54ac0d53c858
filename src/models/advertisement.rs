use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    document::{default_true, require, within_window, Activatable, Document},
    media::{resolve_opt, CdnConfig, Media},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdPosition {
    AdOne,
    AdTwo,
    Banner,
}

impl AdPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            AdPosition::AdOne => "ad-one",
            AdPosition::AdTwo => "ad-two",
            AdPosition::Banner => "banner",
        }
    }
}

impl FromStr for AdPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ad-one" => Ok(AdPosition::AdOne),
            "ad-two" => Ok(AdPosition::AdTwo),
            "banner" => Ok(AdPosition::Banner),
            other => Err(format!("unknown ad position '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    pub position: AdPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl Advertisement {
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.active && within_window(now, self.start_date, self.end_date)
    }
}

impl Document for Advertisement {
    const DOC_TYPE: &'static str = "advertisement";
    const RESOURCE: &'static str = "advertisements";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.title, "title")?;
        if self.image.is_none() && self.video.is_none() {
            return Err("an image or a video is required".to_string());
        }
        Ok(())
    }

    fn resolve_media(&mut self, cdn: &CdnConfig) {
        resolve_opt(&mut self.image, cdn);
        resolve_opt(&mut self.video, cdn);
    }
}

impl Activatable for Advertisement {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn position_round_trips_as_kebab_case() {
        let ad: Advertisement = serde_json::from_value(json!({
            "_id": "a", "title": "Shop", "position": "ad-two", "image": "https://x.test/i.png"
        }))
        .unwrap();
        assert_eq!(ad.position, AdPosition::AdTwo);
        assert_eq!(serde_json::to_value(ad.position).unwrap(), json!("ad-two"));
        assert_eq!("banner".parse::<AdPosition>(), Ok(AdPosition::Banner));
    }

    #[test]
    fn needs_creative() {
        let ad: Advertisement =
            serde_json::from_value(json!({"title": "Shop", "position": "banner"})).unwrap();
        assert!(ad.validate().is_err());
    }

    #[test]
    fn live_window() {
        let ad: Advertisement = serde_json::from_value(json!({
            "title": "Shop", "position": "banner", "video": "https://x.test/v.mp4",
            "endDate": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(ad.is_live("2024-12-31T00:00:00Z".parse().unwrap()));
        assert!(!ad.is_live("2025-01-02T00:00:00Z".parse().unwrap()));
    }
}
