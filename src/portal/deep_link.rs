use crate::{
    models::news::{NewsItem, NewsKind},
    utils::slug::slugify,
};

use super::source::NewsSource;

/// What the browser address points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Home,
    /// `/news/<slug>`, or the legacy `#news/<slug>` hash.
    Article(String),
    /// Legacy `#news-<id>` hash.
    LegacyId(String),
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

fn article(raw: &str) -> Option<Location> {
    let raw = raw.trim_end_matches('/');
    if raw.is_empty() || raw.contains('/') {
        return None;
    }
    let slug = slugify(&decode(raw));
    (!slug.is_empty()).then_some(Location::Article(slug))
}

impl Location {
    /// Reads `location.pathname` and `location.hash`. The path wins over the
    /// hash.
    pub fn parse(pathname: &str, hash: &str) -> Self {
        if let Some(found) = pathname.strip_prefix("/news/").and_then(article) {
            return found;
        }

        let hash = hash.trim_start_matches('#');
        if let Some(found) = hash.strip_prefix("news/").and_then(article) {
            return found;
        }
        if let Some(id) = hash.strip_prefix("news-").filter(|id| !id.is_empty()) {
            return Location::LegacyId(decode(id));
        }
        Location::Home
    }

    pub fn matches(&self, item: &NewsItem) -> bool {
        match self {
            Location::Home => false,
            Location::Article(slug) => slugify(&item.title) == *slug,
            Location::LegacyId(id) => item.id == *id,
        }
    }
}

/// Index of the first item the location points at.
pub fn find_index(items: &[NewsItem], location: &Location) -> Option<usize> {
    items.iter().position(|item| location.matches(item))
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub kind: NewsKind,
    pub index: usize,
    pub items: Vec<NewsItem>,
}

/// Fetches each feed in `order` until one holds the target. The first match
/// wins, so a slug shared by two feeds resolves to the earlier one. Feeds
/// that fail to load are skipped.
pub async fn resolve_across(
    source: &dyn NewsSource,
    location: &Location,
    order: &[NewsKind],
) -> Option<Resolution> {
    if *location == Location::Home {
        return None;
    }
    for &kind in order {
        match source.news(kind).await {
            Ok(items) => {
                if let Some(index) = find_index(&items, location) {
                    return Some(Resolution { kind, index, items });
                }
            }
            Err(e) => tracing::warn!("could not load {} feed while resolving link: {}", kind, e),
        }
    }
    None
}
