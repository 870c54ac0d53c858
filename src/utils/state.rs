use std::{sync::Arc, time::Duration};

use dashmap::DashMap;
use reqwest::Client;

use crate::{
    cms::CmsClient,
    models::{
        breaking_news::BreakingNewsItem, cache::CacheEntry, media::CdnConfig, news::NewsItem,
        settings::SiteSettings,
    },
    services::{poller::Poller, settings_poller, ticker_poller},
    utils::{config::Config, rate_limiter::RateLimiter},
};

pub struct AppState {
    pub config: Config,
    pub cms: Arc<dyn CmsClient>,
    pub http_client: Client,
    pub settings: Poller<SiteSettings>,
    pub ticker: Poller<Vec<BreakingNewsItem>>,
    pub notion_cache: DashMap<String, CacheEntry<Vec<NewsItem>>>,
    pub notion_limiter: RateLimiter,
}

impl AppState {
    /// Builds the shared state and starts the background pollers.
    pub fn init(config: Config, cms: Arc<dyn CmsClient>, http_client: Client) -> Arc<Self> {
        let settings = settings_poller(cms.clone());
        let ticker = ticker_poller(cms.clone());

        Arc::new(AppState {
            config,
            cms,
            http_client,
            settings,
            ticker,
            notion_cache: DashMap::new(),
            notion_limiter: RateLimiter::new(1, Duration::from_millis(350)),
        })
    }

    pub fn cdn(&self) -> CdnConfig {
        self.config.cdn()
    }
}
