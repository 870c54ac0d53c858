use super::listing::ListingState;

/// Horizontal travel needed before a touch counts as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Result of an input event while the article modal is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Moved to a neighbour; push this address.
    Moved(String),
    /// Modal closed; push this address.
    Closed(&'static str),
    None,
}

impl ListingState {
    pub fn has_prev(&self) -> bool {
        matches!(self.selected_index(), Some(i) if i > 0)
    }

    pub fn has_next(&self) -> bool {
        matches!(self.selected_index(), Some(i) if i + 1 < self.items().len())
    }

    /// Opens the following item. No-op on the last item.
    pub fn next(&mut self) -> Option<String> {
        if !self.has_next() {
            return None;
        }
        let index = self.selected_index()? + 1;
        self.open(index)
    }

    /// Opens the preceding item. No-op on the first item.
    pub fn prev(&mut self) -> Option<String> {
        if !self.has_prev() {
            return None;
        }
        let index = self.selected_index()? - 1;
        self.open(index)
    }

    pub fn on_key(&mut self, key: Key) -> ModalAction {
        if self.selected_index().is_none() {
            return ModalAction::None;
        }
        let moved = match key {
            Key::ArrowLeft => self.prev(),
            Key::ArrowRight => self.next(),
            Key::Escape => return ModalAction::Closed(self.close()),
            Key::Other => None,
        };
        moved.map_or(ModalAction::None, ModalAction::Moved)
    }

    /// A leftward swipe shows the next item, a rightward one the previous.
    pub fn on_swipe(&mut self, start_x: f64, end_x: f64) -> ModalAction {
        let delta = start_x - end_x;
        let moved = if delta > SWIPE_THRESHOLD_PX {
            self.next()
        } else if delta < -SWIPE_THRESHOLD_PX {
            self.prev()
        } else {
            None
        };
        moved.map_or(ModalAction::None, ModalAction::Moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::news::NewsKind, portal::listing::tests::titled};

    fn state(n: usize) -> ListingState {
        ListingState::with_items(NewsKind::National, 3, titled(NewsKind::National, n))
    }

    #[test]
    fn walks_without_wrapping() {
        let mut s = state(4);
        s.open(0);
        assert!(!s.has_prev());
        assert_eq!(s.prev(), None);
        assert_eq!(s.selected_index(), Some(0));

        assert_eq!(s.next().as_deref(), Some("/news/national-story-1"));
        s.next();
        s.next();
        assert_eq!(s.selected_index(), Some(3));
        assert_eq!(s.current_page(), 2);
        assert!(!s.has_next());
        assert_eq!(s.next(), None);
        assert_eq!(s.selected_index(), Some(3));
    }

    #[test]
    fn never_leaves_bounds() {
        let mut s = state(5);
        s.open(2);
        let script = [Key::ArrowRight, Key::ArrowRight, Key::ArrowRight, Key::ArrowRight]
            .into_iter()
            .chain([Key::ArrowLeft; 9]);
        for key in script {
            s.on_key(key);
            let i = s.selected_index().unwrap();
            assert!(i < s.items().len());
        }
        assert_eq!(s.selected_index(), Some(0));
    }

    #[test]
    fn keys_and_swipes() {
        let mut s = state(3);
        assert_eq!(s.on_key(Key::ArrowRight), ModalAction::None);

        s.open(1);
        assert_eq!(
            s.on_key(Key::from_dom("ArrowLeft")),
            ModalAction::Moved("/news/national-story-0".into())
        );
        assert_eq!(s.on_swipe(300.0, 100.0), ModalAction::Moved("/news/national-story-1".into()));
        assert_eq!(s.on_swipe(100.0, 140.0), ModalAction::None);
        assert_eq!(s.on_swipe(100.0, 200.0), ModalAction::Moved("/news/national-story-0".into()));
        assert_eq!(s.on_key(Key::Other), ModalAction::None);
        assert_eq!(s.on_key(Key::Escape), ModalAction::Closed("/"));
        assert!(s.selected_item().is_none());
    }

    #[test]
    fn empty_list_has_no_neighbours() {
        let mut s = state(0);
        assert_eq!(s.open(0), None);
        assert!(!s.has_next() && !s.has_prev());
        assert_eq!(s.on_swipe(500.0, 0.0), ModalAction::None);
    }
}
