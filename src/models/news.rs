use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    document::{require, Document, SoftLimit},
    media::{resolve_opt, CdnConfig, Media},
};

/// Feed a news item belongs to. Feeds are grouped into tab sets that share a
/// listing on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsKind {
    #[default]
    Local,
    National,
    Entertainment,
    Health,
    Sports,
    Top,
}

const LATEST_TABS: &[NewsKind] = &[NewsKind::National, NewsKind::Local];
const CATEGORY_TABS: &[NewsKind] = &[NewsKind::Entertainment, NewsKind::Health, NewsKind::Sports];
const TOP_TABS: &[NewsKind] = &[NewsKind::Top];

impl NewsKind {
    pub const ALL: [NewsKind; 6] = [
        NewsKind::Local,
        NewsKind::National,
        NewsKind::Entertainment,
        NewsKind::Health,
        NewsKind::Sports,
        NewsKind::Top,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NewsKind::Local => "local",
            NewsKind::National => "national",
            NewsKind::Entertainment => "entertainment",
            NewsKind::Health => "health",
            NewsKind::Sports => "sports",
            NewsKind::Top => "top",
        }
    }

    /// The tab set this feed is shown in.
    pub fn siblings(self) -> &'static [NewsKind] {
        match self {
            NewsKind::Local | NewsKind::National => LATEST_TABS,
            NewsKind::Entertainment | NewsKind::Health | NewsKind::Sports => CATEGORY_TABS,
            NewsKind::Top => TOP_TABS,
        }
    }

    /// Order in which feeds are searched when resolving a deep link opened
    /// from this feed: the feed itself, then its siblings in tab order.
    pub fn search_order(self) -> Vec<NewsKind> {
        std::iter::once(self)
            .chain(self.siblings().iter().copied().filter(|k| *k != self))
            .collect()
    }
}

impl fmt::Display for NewsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NewsKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown news type '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default = "Utc::now")]
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub news_type: NewsKind,
}

/// Local news is capped so the sidebar stays short.
pub const MAX_LOCAL_NEWS: usize = 3;

impl Document for NewsItem {
    const DOC_TYPE: &'static str = "news";
    const RESOURCE: &'static str = "news";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.title, "title")?;
        if self.image.is_none() {
            return Err("image is required".to_string());
        }
        Ok(())
    }

    fn resolve_media(&mut self, cdn: &CdnConfig) {
        resolve_opt(&mut self.image, cdn);
    }

    fn soft_limit() -> Option<SoftLimit<Self>> {
        Some(SoftLimit {
            max: MAX_LOCAL_NEWS,
            counts: |n: &NewsItem| n.news_type == NewsKind::Local,
            message: "Only 3 local news items are allowed. Delete one before adding another.",
        })
    }
}

/// Items of one feed, newest first.
pub fn feed(items: impl IntoIterator<Item = NewsItem>, kind: NewsKind) -> Vec<NewsItem> {
    let mut feed: Vec<NewsItem> = items.into_iter().filter(|n| n.news_type == kind).collect();
    feed.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    feed
}
