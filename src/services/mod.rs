pub mod notion;
pub mod poller;

use std::{sync::Arc, time::Duration};

use chrono::Utc;

use crate::{
    cms::{self, CmsClient},
    models::{
        breaking_news::{ticker, BreakingNewsItem},
        document::Document,
        settings::{SiteSettings, SETTINGS_ID},
    },
};
use poller::Poller;

pub const SETTINGS_POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const TICKER_POLL_INTERVAL: Duration = Duration::from_secs(2 * 60);

/// Site settings, re-read every 10 seconds. A missing settings document
/// yields the defaults (everything visible).
pub fn settings_poller(cms: Arc<dyn CmsClient>) -> Poller<SiteSettings> {
    Poller::spawn(
        "site settings",
        SiteSettings::default(),
        SETTINGS_POLL_INTERVAL,
        move || {
            let cms = cms.clone();
            async move {
                let stored = cms::get::<SiteSettings>(cms.as_ref(), SETTINGS_ID)
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(stored.unwrap_or_default())
            }
        },
    )
}

/// Live breaking-news items for the ticker, re-read every 2 minutes.
pub fn ticker_poller(cms: Arc<dyn CmsClient>) -> Poller<Vec<BreakingNewsItem>> {
    Poller::spawn(
        "breaking news ticker",
        Vec::new(),
        TICKER_POLL_INTERVAL,
        move || {
            let cms = cms.clone();
            async move {
                let items = cms::all::<BreakingNewsItem>(cms.as_ref())
                    .await
                    .map_err(|e| format!("{}: {}", BreakingNewsItem::DOC_TYPE, e))?;
                Ok(ticker(items, Utc::now()))
            }
        },
    )
}
