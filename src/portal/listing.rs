use crate::{
    models::news::{NewsItem, NewsKind},
    utils::{
        pagination::{clamp_page, page_count, page_of_index, paginate},
        slug::news_path,
    },
};

use super::{
    deep_link::{find_index, resolve_across, Location},
    request_seq::{RequestSeq, Ticket},
    source::NewsSource,
    PortalError,
};

/// Outcome of matching the address bar against the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    /// Nothing had to change.
    Unchanged,
    Opened {
        kind: NewsKind,
        index: usize,
        page: usize,
    },
    Closed,
    /// The link points at no loaded item. Nothing is opened.
    NotFound,
}

/// A paginated news listing with an optional open article.
#[derive(Debug)]
pub struct ListingState {
    kind: NewsKind,
    items: Vec<NewsItem>,
    items_per_page: usize,
    current_page: usize,
    selected: Option<usize>,
    seq: RequestSeq,
}

impl ListingState {
    pub fn new(kind: NewsKind, items_per_page: usize) -> Self {
        Self {
            kind,
            items: Vec::new(),
            items_per_page: items_per_page.max(1),
            current_page: 1,
            selected: None,
            seq: RequestSeq::new(),
        }
    }

    pub fn with_items(kind: NewsKind, items_per_page: usize, items: Vec<NewsItem>) -> Self {
        let mut state = Self::new(kind, items_per_page);
        state.items = items;
        state
    }

    pub fn kind(&self) -> NewsKind {
        self.kind
    }

    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        page_count(self.items.len(), self.items_per_page)
    }

    pub fn page_items(&self) -> &[NewsItem] {
        paginate(&self.items, self.current_page, self.items_per_page)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&NewsItem> {
        self.selected.and_then(|i| self.items.get(i))
    }

    pub fn set_page(&mut self, page: usize) -> usize {
        self.current_page = clamp_page(page, self.total_pages());
        self.current_page
    }

    /// Changes the page size. An open article stays on the visible page.
    pub fn set_items_per_page(&mut self, size: usize) {
        self.items_per_page = size.max(1);
        match self.selected {
            Some(i) => self.current_page = page_of_index(i, self.items_per_page),
            None => {
                self.current_page = clamp_page(self.current_page, self.total_pages());
            }
        }
    }

    /// Starts loading a feed. Pair with [`ListingState::finish_load`].
    pub fn begin_load(&self) -> Ticket {
        self.seq.issue()
    }

    /// Applies a finished fetch unless a newer one was started meanwhile.
    /// A failed fetch leaves an empty listing.
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        kind: NewsKind,
        result: Result<Vec<NewsItem>, PortalError>,
    ) -> bool {
        if !self.seq.is_current(ticket) {
            tracing::debug!("discarding stale {} response", kind);
            return false;
        }
        let items = result.unwrap_or_else(|e| {
            tracing::warn!("failed to load {} news: {}", kind, e);
            Vec::new()
        });
        self.kind = kind;
        self.items = items;
        self.current_page = 1;
        self.selected = None;
        true
    }

    /// Switches to `kind` and loads its feed.
    pub async fn load(&mut self, kind: NewsKind, source: &dyn NewsSource) -> bool {
        let ticket = self.begin_load();
        let result = source.news(kind).await;
        self.finish_load(ticket, kind, result)
    }

    /// Opens the item at `index` and returns its address.
    pub fn open(&mut self, index: usize) -> Option<String> {
        let item = self.items.get(index)?;
        let path = news_path(&item.title);
        self.selected = Some(index);
        self.current_page = page_of_index(index, self.items_per_page);
        Some(path)
    }

    /// Closes the article view and returns the address to show.
    pub fn close(&mut self) -> &'static str {
        self.selected = None;
        "/"
    }

    fn show(&mut self, index: usize) -> Reconciled {
        let page = page_of_index(index, self.items_per_page);
        if self.selected == Some(index) && self.current_page == page {
            return Reconciled::Unchanged;
        }
        self.selected = Some(index);
        self.current_page = page;
        Reconciled::Opened {
            kind: self.kind,
            index,
            page,
        }
    }

    /// Brings the listing in line with the address bar. Called on mount and
    /// on every history change; calling it again with the same location
    /// changes nothing.
    pub async fn reconcile(&mut self, location: &Location, source: &dyn NewsSource) -> Reconciled {
        if *location == Location::Home {
            return match self.selected.take() {
                Some(_) => Reconciled::Closed,
                None => Reconciled::Unchanged,
            };
        }

        if let Some(index) = find_index(&self.items, location) {
            return self.show(index);
        }

        let siblings: Vec<NewsKind> = self
            .kind
            .search_order()
            .into_iter()
            .filter(|k| *k != self.kind)
            .collect();
        match resolve_across(source, location, &siblings).await {
            Some(found) => {
                // Supersede any feed load still in flight.
                self.seq.issue();
                self.kind = found.kind;
                self.items = found.items;
                self.selected = None;
                self.show(found.index)
            }
            None => {
                tracing::debug!("no {} sibling feed holds {:?}", self.kind, location);
                Reconciled::NotFound
            }
        }
    }
}
