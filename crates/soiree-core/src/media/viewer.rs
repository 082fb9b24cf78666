//! Modal image viewer: an openable overlay around a cyclic index.
//!
//! All per-open state (position, info panel, loading flag) lives in a
//! session that exists only while the viewer is open. Keyboard handling is
//! part of the session, so nothing listens for keys once the viewer closes
//! and a re-open always starts from a clean slate.

use tracing::debug;

use super::carousel::CarouselState;
use super::catalog::Section;
use super::cyclic::CyclicIndex;
use super::events::{EventSink, MediaEvent};
use super::item::{Item, ItemList};

/// Keys the viewer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerKey {
    ArrowLeft,
    ArrowRight,
    Escape,
    Char(char),
}

/// What a key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Viewer closed or key not bound
    Ignored,
    Previous,
    Next,
    Closed,
    InfoToggled,
}

/// Snapshot read by the presentation layer each render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalViewerState {
    pub is_open: bool,
    pub carousel: CarouselState,
    pub show_info: bool,
    pub is_loading: bool,
}

#[derive(Debug, Clone)]
struct ViewerSession {
    cursor: CyclicIndex,
    show_info: bool,
    loading: bool,
}

#[derive(Debug)]
pub struct ModalViewer {
    section: Section,
    items: ItemList,
    session: Option<ViewerSession>,
    events: EventSink,
}

impl ModalViewer {
    pub fn new(section: Section, items: ItemList) -> Self {
        Self {
            section,
            items,
            session: None,
            events: EventSink::detached(),
        }
    }

    /// Set the event sender for state-change notifications
    pub fn with_event_sink(mut self, events: EventSink) -> Self {
        self.events = events;
        self
    }

    pub fn items(&self) -> &ItemList {
        &self.items
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn show_info(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.show_info)
    }

    pub fn is_loading(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.loading)
    }

    /// Current index while open
    pub fn index(&self) -> Option<usize> {
        self.session.as_ref().and_then(|s| s.cursor.current())
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.index().and_then(|i| self.items.get(i))
    }

    pub fn state(&self) -> ModalViewerState {
        let carousel = match &self.session {
            Some(session) => CarouselState {
                index: session.cursor.index(),
                length: session.cursor.len(),
                is_playing: false,
            },
            None => CarouselState {
                index: 0,
                length: self.items.len(),
                is_playing: false,
            },
        };
        ModalViewerState {
            is_open: self.is_open(),
            carousel,
            show_info: self.show_info(),
            is_loading: self.is_loading(),
        }
    }

    /// "3 / 5" style position label
    pub fn counter_label(&self) -> Option<String> {
        self.session
            .as_ref()
            .and_then(|s| s.cursor.current().map(|i| format!("{} / {}", i + 1, s.cursor.len())))
    }

    /// Thumbnail strip entries as `(index, highlighted)`
    pub fn thumbnails(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (0..self.items.len()).map(move |k| {
            let highlighted = self.session.as_ref().is_some_and(|s| s.cursor.is_current(k));
            (k, highlighted)
        })
    }

    /// Open at `initial_index` (clamped); re-opening starts a fresh session
    pub fn open(&mut self, initial_index: usize) {
        let cursor = CyclicIndex::starting_at(self.items.len(), initial_index);
        let loading = !cursor.is_empty();
        self.session = Some(ViewerSession {
            cursor,
            show_info: false,
            loading,
        });

        debug!("{}: viewer opened at {}", self.section, cursor.index());
        self.events.send(MediaEvent::ViewerOpened {
            section: self.section,
            index: cursor.index(),
        });
        if loading {
            self.publish_loading(true);
        }
    }

    /// Close and discard the session, including any pending load indicator
    pub fn close(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        debug!("{}: viewer closed", self.section);
        if session.loading {
            self.publish_loading(false);
        }
        self.events.send(MediaEvent::ViewerClosed {
            section: self.section,
        });
    }

    pub fn next(&mut self) -> bool {
        self.navigate(CyclicIndex::next)
    }

    pub fn previous(&mut self) -> bool {
        self.navigate(CyclicIndex::previous)
    }

    pub fn goto(&mut self, i: usize) -> bool {
        self.navigate(|cursor| cursor.goto(i))
    }

    /// Thumbnail click
    pub fn select_thumbnail(&mut self, k: usize) -> bool {
        self.goto(k)
    }

    /// Show or hide the info panel; returns the new visibility
    pub fn toggle_info(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.show_info = !session.show_info;
        let visible = session.show_info;
        self.events.send(MediaEvent::InfoToggled {
            section: self.section,
            visible,
        });
        visible
    }

    /// Keyboard contract, active only while open
    pub fn handle_key(&mut self, key: ViewerKey) -> KeyOutcome {
        if !self.is_open() {
            return KeyOutcome::Ignored;
        }
        match key {
            ViewerKey::ArrowLeft => {
                self.previous();
                KeyOutcome::Previous
            }
            ViewerKey::ArrowRight => {
                self.next();
                KeyOutcome::Next
            }
            ViewerKey::Escape => {
                self.close();
                KeyOutcome::Closed
            }
            ViewerKey::Char('i') | ViewerKey::Char('I') => {
                self.toggle_info();
                KeyOutcome::InfoToggled
            }
            ViewerKey::Char(_) => KeyOutcome::Ignored,
        }
    }

    /// Media for entry `k` finished loading
    pub fn media_loaded(&mut self, k: usize) -> bool {
        self.finish_loading(k)
    }

    /// Media for entry `k` failed to load; clears the indicator all the same
    pub fn media_failed(&mut self, k: usize) -> bool {
        self.finish_loading(k)
    }

    /// Replace the list; an open session keeps a clamped index
    pub fn set_items(&mut self, items: ItemList) {
        let length = items.len();
        self.items = items;
        if let Some(session) = self.session.as_mut() {
            if session.cursor.set_length(length) || length == 0 {
                let loading = length > 0;
                let changed = session.loading != loading;
                session.loading = loading;
                if changed {
                    self.publish_loading(loading);
                }
            }
        }
    }

    fn navigate(&mut self, step: impl FnOnce(&mut CyclicIndex) -> bool) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !step(&mut session.cursor) {
            return false;
        }
        session.loading = true;
        let index = session.cursor.index();
        let length = session.cursor.len();

        self.events.send(MediaEvent::IndexChanged {
            section: self.section,
            index,
            length,
        });
        self.publish_loading(true);
        true
    }

    fn finish_loading(&mut self, k: usize) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.loading || !session.cursor.is_current(k) {
            debug!("{}: ignoring load report for entry {}", self.section, k);
            return false;
        }
        session.loading = false;
        self.publish_loading(false);
        true
    }

    fn publish_loading(&self, loading: bool) {
        self.events.send(MediaEvent::LoadingChanged {
            section: self.section,
            loading,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(n: usize) -> ModalViewer {
        let items: ItemList = (0..n)
            .map(|i| Item::new(format!("img{}", i), format!("{}.jpg", i)))
            .collect();
        ModalViewer::new(Section::Gallery, items)
    }

    #[test]
    fn test_arrow_navigation_and_escape() {
        let mut viewer = viewer(5);
        viewer.open(2);
        viewer.handle_key(ViewerKey::ArrowRight);
        viewer.handle_key(ViewerKey::ArrowRight);
        assert_eq!(viewer.index(), Some(4));

        assert_eq!(viewer.handle_key(ViewerKey::Escape), KeyOutcome::Closed);
        assert!(!viewer.state().is_open);
    }

    #[test]
    fn test_arrow_left_wraps() {
        let mut viewer = viewer(3);
        viewer.open(0);
        viewer.handle_key(ViewerKey::ArrowLeft);
        assert_eq!(viewer.index(), Some(2));
    }

    #[test]
    fn test_reopen_resets_session() {
        let mut viewer = viewer(5);
        viewer.open(1);
        viewer.handle_key(ViewerKey::Char('I'));
        assert!(viewer.show_info());
        viewer.close();
        viewer.open(3);

        assert!(!viewer.show_info());
        assert_eq!(viewer.index(), Some(3));
    }

    #[test]
    fn test_keys_ignored_while_closed() {
        let mut viewer = viewer(3);
        assert_eq!(viewer.handle_key(ViewerKey::ArrowRight), KeyOutcome::Ignored);
        assert_eq!(viewer.handle_key(ViewerKey::Char('i')), KeyOutcome::Ignored);
        viewer.open(0);
        viewer.close();
        assert_eq!(viewer.handle_key(ViewerKey::ArrowRight), KeyOutcome::Ignored);
        assert_eq!(viewer.index(), None);
    }

    #[test]
    fn test_info_toggles_with_lower_and_upper_i() {
        let mut viewer = viewer(2);
        viewer.open(0);
        assert_eq!(viewer.handle_key(ViewerKey::Char('i')), KeyOutcome::InfoToggled);
        assert!(viewer.show_info());
        viewer.handle_key(ViewerKey::Char('I'));
        assert!(!viewer.show_info());
        assert_eq!(viewer.handle_key(ViewerKey::Char('x')), KeyOutcome::Ignored);
    }

    #[test]
    fn test_thumbnail_highlight_follows_index() {
        let mut viewer = viewer(4);
        viewer.open(0);
        viewer.select_thumbnail(2);
        let highlighted: Vec<_> = viewer
            .thumbnails()
            .filter(|(_, on)| *on)
            .map(|(k, _)| k)
            .collect();
        assert_eq!(highlighted, vec![2]);
        assert_eq!(viewer.counter_label().as_deref(), Some("3 / 4"));
    }

    #[test]
    fn test_open_out_of_range_clamps() {
        let mut viewer = viewer(3);
        viewer.open(10);
        assert_eq!(viewer.index(), Some(2));
    }

    #[test]
    fn test_loading_cleared_by_success_or_failure() {
        let mut viewer = viewer(3);
        viewer.open(0);
        assert!(viewer.is_loading());
        assert!(viewer.media_loaded(0));
        assert!(!viewer.is_loading());

        viewer.next();
        assert!(viewer.is_loading());
        // Late report for the previous image does not clear the new one
        assert!(!viewer.media_loaded(0));
        assert!(viewer.is_loading());
        assert!(viewer.media_failed(1));
        assert!(!viewer.is_loading());
    }

    #[test]
    fn test_close_discards_loading() {
        let mut viewer = viewer(3);
        viewer.open(1);
        viewer.close();
        assert!(!viewer.is_loading());
        assert!(!viewer.media_loaded(1));
    }

    #[test]
    fn test_empty_gallery_opens_without_navigation() {
        let mut viewer = viewer(0);
        viewer.open(0);
        assert!(viewer.is_open());
        assert!(!viewer.is_loading());
        assert_eq!(viewer.handle_key(ViewerKey::ArrowRight), KeyOutcome::Next);
        assert_eq!(viewer.index(), None);
        assert_eq!(viewer.counter_label(), None);
    }

    #[test]
    fn test_events_for_open_navigate_close() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut viewer = viewer(3).with_event_sink(EventSink::new(tx));
        viewer.open(1);
        viewer.next();
        viewer.close();

        let events: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(
            events,
            vec![
                MediaEvent::ViewerOpened {
                    section: Section::Gallery,
                    index: 1,
                },
                MediaEvent::LoadingChanged {
                    section: Section::Gallery,
                    loading: true,
                },
                MediaEvent::IndexChanged {
                    section: Section::Gallery,
                    index: 2,
                    length: 3,
                },
                MediaEvent::LoadingChanged {
                    section: Section::Gallery,
                    loading: true,
                },
                MediaEvent::LoadingChanged {
                    section: Section::Gallery,
                    loading: false,
                },
                MediaEvent::ViewerClosed {
                    section: Section::Gallery,
                },
            ]
        );
    }
}
