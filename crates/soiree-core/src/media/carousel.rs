use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use super::auto_advance::{AutoAdvance, AutoAdvanceTick};
use super::catalog::Section;
use super::cyclic::CyclicIndex;
use super::events::{EventSink, MediaEvent};
use super::item::{Item, ItemList};

/// Snapshot read by the presentation layer each render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    pub index: usize,
    pub length: usize,
    pub is_playing: bool,
}

/// Slideshow over an item list: cyclic navigation plus optional auto-advance.
///
/// Used by the hero slideshow, the testimonial carousel and the featured
/// event gallery. Manual navigation does not reset the auto-advance phase.
#[derive(Debug)]
pub struct Carousel {
    section: Section,
    items: ItemList,
    cursor: CyclicIndex,
    auto: Option<AutoAdvance>,
    events: EventSink,
}

impl Carousel {
    pub fn new(section: Section, items: ItemList) -> Self {
        let cursor = CyclicIndex::new(items.len());
        Self {
            section,
            items,
            cursor,
            auto: None,
            events: EventSink::detached(),
        }
    }

    /// Enable auto-advance; ticks are delivered on `tick_tx` and must be
    /// handed back through [`Carousel::on_tick`]
    pub fn with_auto_advance(
        mut self,
        interval: Option<Duration>,
        tick_tx: mpsc::UnboundedSender<AutoAdvanceTick>,
    ) -> Self {
        self.auto = Some(AutoAdvance::new(self.section, interval, tick_tx));
        self
    }

    /// Set the event sender for state-change notifications
    pub fn with_event_sink(mut self, events: EventSink) -> Self {
        self.events = events;
        self
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn items(&self) -> &ItemList {
        &self.items
    }

    pub fn index(&self) -> usize {
        self.cursor.index()
    }

    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    pub fn is_current(&self, k: usize) -> bool {
        self.cursor.is_current(k)
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.cursor.current().and_then(|i| self.items.get(i))
    }

    pub fn is_playing(&self) -> bool {
        self.auto.as_ref().is_some_and(AutoAdvance::is_playing)
    }

    pub fn has_auto_advance(&self) -> bool {
        self.auto.as_ref().is_some_and(|auto| auto.interval().is_some())
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            index: self.cursor.index(),
            length: self.cursor.len(),
            is_playing: self.is_playing(),
        }
    }

    pub fn next(&mut self) -> bool {
        let moved = self.cursor.next();
        self.publish_index(moved);
        moved
    }

    pub fn previous(&mut self) -> bool {
        let moved = self.cursor.previous();
        self.publish_index(moved);
        moved
    }

    pub fn goto(&mut self, i: usize) -> bool {
        let moved = self.cursor.goto(i);
        self.publish_index(moved);
        moved
    }

    /// Replace the list (e.g. after a category filter change).
    ///
    /// The index is clamped into the new range; an empty list stops
    /// auto-advance.
    pub fn set_items(&mut self, items: ItemList) {
        let length = items.len();
        self.items = items;
        let moved = self.cursor.set_length(length);
        if length == 0 {
            self.stop();
        }
        // Length changed even if the index did not
        self.events.send(MediaEvent::IndexChanged {
            section: self.section,
            index: self.cursor.index(),
            length,
        });
        debug!(
            "{}: list replaced, length {} (index moved: {})",
            self.section, length, moved
        );
    }

    /// Start auto-advance with the configured interval
    pub fn start(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let started = self.auto.as_mut().is_some_and(AutoAdvance::resume);
        if started {
            self.publish_playback();
        }
        started
    }

    /// Start auto-advance with an explicit interval
    pub fn start_with(&mut self, interval: Duration) -> bool {
        if self.is_empty() {
            return false;
        }
        let started = self.auto.as_mut().is_some_and(|auto| auto.start(interval));
        if started {
            self.publish_playback();
        }
        started
    }

    pub fn stop(&mut self) -> bool {
        let stopped = self.auto.as_mut().is_some_and(AutoAdvance::stop);
        if stopped {
            self.publish_playback();
        }
        stopped
    }

    /// Flip play/pause; returns the new playing state
    pub fn toggle_play(&mut self) -> bool {
        if self.is_playing() {
            self.stop();
        } else {
            self.start();
        }
        self.is_playing()
    }

    /// Apply a tick from the auto-advance timer: exactly one `next()` for a
    /// tick from the running timer, nothing for stale ticks
    pub fn on_tick(&mut self, tick: &AutoAdvanceTick) -> bool {
        let accepted = self.auto.as_ref().is_some_and(|auto| auto.accepts(tick));
        if !accepted {
            debug!("{}: ignoring stale auto-advance tick", self.section);
            return false;
        }
        self.next();
        true
    }

    fn publish_index(&self, moved: bool) {
        if moved {
            self.events.send(MediaEvent::IndexChanged {
                section: self.section,
                index: self.cursor.index(),
                length: self.cursor.len(),
            });
        }
    }

    fn publish_playback(&self) {
        self.events.send(MediaEvent::PlaybackChanged {
            section: self.section,
            playing: self.is_playing(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> ItemList {
        (0..n)
            .map(|i| Item::new(format!("t{}", i), format!("{}.jpg", i)))
            .collect()
    }

    #[test]
    fn test_testimonial_sequence() {
        let mut carousel = Carousel::new(Section::Testimonials, items(3));
        let mut seen = Vec::new();
        for _ in 0..3 {
            carousel.next();
            seen.push(carousel.index());
        }
        assert_eq!(seen, vec![1, 2, 0]);
        assert_eq!(carousel.current_item().map(|i| i.id.as_str()), Some("t0"));
    }

    #[test]
    fn test_events_published_on_navigation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut carousel =
            Carousel::new(Section::Hero, items(2)).with_event_sink(EventSink::new(tx));

        carousel.next();
        carousel.goto(1); // already there, no event
        assert_eq!(
            rx.try_recv().unwrap(),
            MediaEvent::IndexChanged {
                section: Section::Hero,
                index: 1,
                length: 2
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_filter_change_clamps_index() {
        let mut carousel = Carousel::new(Section::Featured, items(5));
        carousel.goto(4);
        carousel.set_items(items(2));
        assert_eq!(carousel.state().index, 1);
        assert_eq!(carousel.state().length, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_advance_exactly_once_each() {
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
        let mut carousel = Carousel::new(Section::Hero, items(4))
            .with_auto_advance(Some(Duration::from_millis(1000)), tick_tx);

        assert!(carousel.start());
        assert!(!carousel.start());
        tokio::time::sleep(Duration::from_millis(2500)).await;

        while let Ok(tick) = tick_rx.try_recv() {
            assert!(carousel.on_tick(&tick));
        }
        assert_eq!(carousel.index(), 2);
        assert!(carousel.state().is_playing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_navigation_keeps_phase() {
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
        let mut carousel = Carousel::new(Section::Hero, items(10))
            .with_auto_advance(Some(Duration::from_millis(1000)), tick_tx);
        carousel.start();

        tokio::time::sleep(Duration::from_millis(900)).await;
        carousel.next();
        tokio::time::sleep(Duration::from_millis(150)).await;

        // Tick still arrives at 1000ms despite the manual step at 900ms
        let tick = tick_rx.try_recv().unwrap();
        carousel.on_tick(&tick);
        assert_eq!(carousel.index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_discards_pending_ticks() {
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
        let mut carousel = Carousel::new(Section::Testimonials, items(3))
            .with_auto_advance(Some(Duration::from_millis(100)), tick_tx);
        carousel.start();
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(!carousel.toggle_play());
        let tick = tick_rx.try_recv().unwrap();
        assert!(!carousel.on_tick(&tick));
        assert_eq!(carousel.index(), 0);
    }

    #[tokio::test]
    async fn test_empty_list_stops_auto_advance() {
        let (tick_tx, _tick_rx) = mpsc::unbounded_channel();
        let mut carousel = Carousel::new(Section::Hero, items(3))
            .with_auto_advance(Some(Duration::from_millis(100)), tick_tx);
        assert!(carousel.start());

        carousel.set_items(ItemList::default());
        assert!(!carousel.is_playing());
        assert!(!carousel.start());
        assert!(!carousel.next());
    }

    #[test]
    fn test_without_auto_advance_toggle_is_noop() {
        let mut carousel = Carousel::new(Section::Featured, items(3));
        assert!(!carousel.toggle_play());
        assert!(!carousel.has_auto_advance());
    }
}
