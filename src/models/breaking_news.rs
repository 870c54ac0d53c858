use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::document::{
    default_true, require, within_window, Activatable, Document, SoftLimit,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakingNewsItem {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
}

pub const MAX_ACTIVE_BREAKING_NEWS: usize = 10;

impl BreakingNewsItem {
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.active && within_window(now, self.start_date, self.expiry_date)
    }

    /// Text shown in the scrolling ticker.
    pub fn ticker_text(&self) -> &str {
        self.scroll_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.title)
    }
}

impl Document for BreakingNewsItem {
    const DOC_TYPE: &'static str = "breakingNews";
    const RESOURCE: &'static str = "breaking-news";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.title, "title")?;
        if let (Some(start), Some(end)) = (self.start_date, self.expiry_date) {
            if end < start {
                return Err("expiryDate must be after startDate".to_string());
            }
        }
        Ok(())
    }

    fn soft_limit() -> Option<SoftLimit<Self>> {
        Some(SoftLimit {
            max: MAX_ACTIVE_BREAKING_NEWS,
            counts: |b: &BreakingNewsItem| b.active,
            message: "Only 10 breaking news items can be active at once.",
        })
    }
}

impl Activatable for BreakingNewsItem {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Live ticker entries, highest priority first.
pub fn ticker(items: impl IntoIterator<Item = BreakingNewsItem>, now: DateTime<Utc>) -> Vec<BreakingNewsItem> {
    let mut live: Vec<BreakingNewsItem> = items.into_iter().filter(|b| b.is_live(now)).collect();
    live.sort_by(|a, b| b.priority.cmp(&a.priority));
    live
}
