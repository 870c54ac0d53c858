use std::time::{Duration, Instant};

pub const MOBILE_BREAKPOINT_PX: u32 = 640;
pub const MOBILE_PAGE_SIZE: usize = 5;
pub const PAGE_SIZE_REFRESH: Duration = Duration::from_secs(5 * 60);

const BASE_PAGE_SIZE: usize = 4;
const MAX_AD_SLOTS: usize = 3;

/// What else shares the page with the local news column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutInputs {
    pub has_category_news: bool,
    pub category_news_paginated: bool,
    pub active_ad_slots: usize,
    pub has_obituaries: bool,
    pub viewport_width: u32,
}

/// Local news page size that keeps the column roughly as tall as the
/// sidebar. Phones always get a fixed size.
pub fn local_news_page_size(inputs: &LayoutInputs) -> usize {
    if inputs.viewport_width < MOBILE_BREAKPOINT_PX {
        return MOBILE_PAGE_SIZE;
    }
    let mut size = BASE_PAGE_SIZE;
    if inputs.has_category_news {
        size += 2;
    }
    if inputs.category_news_paginated {
        size += 1;
    }
    size += inputs.active_ad_slots.min(MAX_AD_SLOTS);
    if inputs.has_obituaries {
        size += 2;
    }
    size
}

/// Re-evaluates the page size on resize and on the periodic refresh.
#[derive(Debug, Clone)]
pub struct PageSizeTracker {
    inputs: LayoutInputs,
    size: usize,
    refreshed_at: Instant,
}

impl PageSizeTracker {
    pub fn new(inputs: LayoutInputs) -> Self {
        Self {
            size: local_news_page_size(&inputs),
            inputs,
            refreshed_at: Instant::now(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn recompute(&mut self) -> Option<usize> {
        let size = local_news_page_size(&self.inputs);
        if size == self.size {
            return None;
        }
        self.size = size;
        Some(size)
    }

    /// Returns the new size when the resize changed it.
    pub fn on_resize(&mut self, viewport_width: u32) -> Option<usize> {
        self.inputs.viewport_width = viewport_width;
        self.recompute()
    }

    /// Returns the new size when the sidebar content changed it.
    pub fn refresh(&mut self, inputs: LayoutInputs) -> Option<usize> {
        self.inputs = inputs;
        self.recompute()
    }

    pub fn refresh_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.refreshed_at) >= PAGE_SIZE_REFRESH
    }

    /// Periodic refresh. Does nothing until [`PAGE_SIZE_REFRESH`] has passed
    /// since the last one.
    pub fn tick(&mut self, now: Instant, inputs: LayoutInputs) -> Option<usize> {
        if !self.refresh_due(now) {
            return None;
        }
        self.refreshed_at = now;
        self.refresh(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::news::NewsKind,
        portal::listing::{tests::titled, ListingState},
    };

    fn desktop() -> LayoutInputs {
        LayoutInputs {
            viewport_width: 1280,
            ..Default::default()
        }
    }

    #[test]
    fn heuristic() {
        assert_eq!(local_news_page_size(&desktop()), 4);
        let busy = LayoutInputs {
            has_category_news: true,
            category_news_paginated: true,
            active_ad_slots: 5,
            has_obituaries: true,
            viewport_width: 1280,
        };
        assert_eq!(local_news_page_size(&busy), 4 + 2 + 1 + 3 + 2);
        let phone = LayoutInputs {
            viewport_width: 390,
            ..busy
        };
        assert_eq!(local_news_page_size(&phone), MOBILE_PAGE_SIZE);
    }

    #[test]
    fn tracker_reports_changes_only() {
        let mut tracker = PageSizeTracker::new(desktop());
        assert_eq!(tracker.on_resize(1024), None);
        assert_eq!(tracker.on_resize(500), Some(5));
        assert_eq!(tracker.on_resize(600), None);
        assert_eq!(tracker.on_resize(800), Some(4));
        assert_eq!(
            tracker.refresh(LayoutInputs {
                has_obituaries: true,
                ..desktop()
            }),
            Some(6)
        );
    }

    #[test]
    fn tick_waits_for_the_refresh_interval() {
        let mut tracker = PageSizeTracker::new(desktop());
        let start = Instant::now();
        let busier = LayoutInputs {
            has_category_news: true,
            ..desktop()
        };

        assert!(!tracker.refresh_due(start));
        assert_eq!(tracker.tick(start, busier), None);
        assert_eq!(tracker.size(), 4);

        let later = start + PAGE_SIZE_REFRESH + Duration::from_secs(1);
        assert!(tracker.refresh_due(later));
        assert_eq!(tracker.tick(later, busier), Some(6));
        assert!(!tracker.refresh_due(later));
        assert_eq!(tracker.tick(later + Duration::from_secs(60), desktop()), None);
    }

    #[test]
    fn resize_repaginates_listing() {
        let mut tracker = PageSizeTracker::new(desktop());
        let mut listing =
            ListingState::with_items(NewsKind::Local, tracker.size(), titled(NewsKind::Local, 12));
        listing.set_page(3);
        if let Some(size) = tracker.on_resize(375) {
            listing.set_items_per_page(size);
        }
        assert_eq!(listing.items_per_page(), 5);
        assert_eq!(listing.current_page(), 3);
        assert_eq!(listing.page_items().len(), 2);
    }
}
