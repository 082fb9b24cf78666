//! Continuous "infinite" ticker over a doubled item list.
//!
//! The presentation layer renders the list twice in a row and calls
//! [`Marquee::on_frame`] once per display frame. Position advances by a
//! constant speed and snaps back to zero once one full copy has scrolled
//! past, so the seam is never visible.

use std::time::Duration;

use tracing::debug;

use super::catalog::Section;
use super::events::{EventSink, MediaEvent};

/// Frame interval for a target frame rate
#[inline]
pub fn frame_interval(fps: u32) -> Duration {
    if fps == 0 {
        Duration::from_millis(16) // ~60fps fallback
    } else {
        // Never below 1ms, or the event poll would spin
        Duration::from_millis((1000 / u64::from(fps)).max(1))
    }
}

/// Pending-frame slot of a cooperative frame loop.
///
/// Requesting twice keeps a single pending frame; cancelling is immediate
/// and idempotent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameLoop {
    pending: bool,
}

impl FrameLoop {
    #[inline]
    pub fn request(&mut self) {
        self.pending = true;
    }

    #[inline]
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Snapshot read by the presentation layer each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarqueeState {
    pub position: f64,
    pub content_width: f64,
    pub is_paused: bool,
}

#[derive(Debug)]
pub struct Marquee {
    section: Section,
    /// Columns (or pixels) per frame
    speed: f64,
    position: f64,
    item_count: usize,
    item_extent: f64,
    content_width: f64,
    /// Owner wants the ticker running
    started: bool,
    hovered: bool,
    frame: FrameLoop,
    events: EventSink,
}

impl Marquee {
    pub fn new(section: Section, speed: f64) -> Self {
        Self {
            section,
            speed: if speed.is_finite() { speed.max(0.0) } else { 0.0 },
            position: 0.0,
            item_count: 0,
            item_extent: 0.0,
            content_width: 0.0,
            started: false,
            hovered: false,
            frame: FrameLoop::default(),
            events: EventSink::detached(),
        }
    }

    /// Set the event sender for pause/resume notifications
    pub fn with_event_sink(mut self, events: EventSink) -> Self {
        self.events = events;
        self
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    pub fn item_extent(&self) -> f64 {
        self.item_extent
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Paused by hover or by an explicit stop
    pub fn is_paused(&self) -> bool {
        !self.frame.is_pending()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether a frame is pending (the presentation loop should run at
    /// animation rate)
    pub fn needs_frame(&self) -> bool {
        self.frame.is_pending()
    }

    pub fn state(&self) -> MarqueeState {
        MarqueeState {
            position: self.position,
            content_width: self.content_width,
            is_paused: self.is_paused(),
        }
    }

    /// Whole-column scroll offset for rendering
    pub fn visible_offset(&self) -> usize {
        self.position.floor() as usize
    }

    /// Number of items in the original (undoubled) list
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        self.remeasure();
    }

    /// Width one item occupies in the viewport, gap included
    pub fn set_item_extent(&mut self, extent: f64) {
        self.item_extent = if extent.is_finite() { extent.max(0.0) } else { 0.0 };
        self.remeasure();
    }

    /// Begin requesting frames; no-op when already running
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.sync_frame();
    }

    /// Stop requesting frames; the position is kept
    pub fn stop(&mut self) {
        if !self.started {
            return;
        }
        self.started = false;
        self.sync_frame();
    }

    /// Pointer entered the viewport: cancel the pending frame
    pub fn pointer_enter(&mut self) {
        if self.hovered {
            return;
        }
        self.hovered = true;
        self.sync_frame();
    }

    /// Pointer left the viewport: resume from the stored position
    pub fn pointer_leave(&mut self) {
        if !self.hovered {
            return;
        }
        self.hovered = false;
        self.sync_frame();
    }

    /// Advance one display frame.
    ///
    /// Returns the position to apply, or `None` when no frame was pending.
    /// With nothing measured yet the engine idles at its current position.
    pub fn on_frame(&mut self) -> Option<f64> {
        if !self.frame.is_pending() {
            return None;
        }
        if self.content_width <= 0.0 {
            return Some(self.position);
        }

        self.position += self.speed;
        // Wrap before the value is applied so the seam never shows
        if self.position >= self.content_width / 2.0 {
            self.position = 0.0;
        }
        Some(self.position)
    }

    fn remeasure(&mut self) {
        self.content_width = 2.0 * self.item_count as f64 * self.item_extent;
        if self.content_width <= 0.0 || self.position >= self.content_width / 2.0 {
            self.position = 0.0;
        }
        debug!(
            "{}: marquee content width {} ({} items)",
            self.section, self.content_width, self.item_count
        );
        self.sync_frame();
    }

    /// Keep the frame slot consistent with started/hovered/empty
    fn sync_frame(&mut self) {
        let was_pending = self.frame.is_pending();
        if self.started && !self.hovered && self.item_count > 0 {
            self.frame.request();
        } else {
            self.frame.cancel();
        }

        if was_pending != self.frame.is_pending() {
            self.events.send(MediaEvent::MarqueePaused {
                section: self.section,
                paused: !self.frame.is_pending(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(count: usize, extent: f64, speed: f64) -> Marquee {
        let mut marquee = Marquee::new(Section::Testimonials, speed);
        marquee.set_item_count(count);
        marquee.set_item_extent(extent);
        marquee.start();
        marquee
    }

    #[test]
    fn test_wraps_exactly_at_half_width() {
        // 5 items * 100 wide, doubled = 1000
        let mut marquee = running(5, 100.0, 2.0);
        assert_eq!(marquee.content_width(), 1000.0);

        for _ in 0..249 {
            marquee.on_frame();
        }
        assert_eq!(marquee.position(), 498.0);
        assert_eq!(marquee.on_frame(), Some(0.0));
        assert_eq!(marquee.position(), 0.0);
    }

    #[test]
    fn test_position_stays_in_range() {
        for speed in [0.5, 1.0, 3.0, 7.25, 333.0] {
            let mut marquee = running(3, 37.0, speed);
            let half = marquee.content_width() / 2.0;
            for _ in 0..2000 {
                let position = marquee.on_frame().unwrap();
                assert!((0.0..half).contains(&position), "speed {} at {}", speed, position);
            }
        }
    }

    #[test]
    fn test_hover_pauses_and_resumes_in_place() {
        let mut marquee = running(4, 10.0, 1.0);
        for _ in 0..7 {
            marquee.on_frame();
        }

        marquee.pointer_enter();
        assert!(marquee.is_paused());
        assert_eq!(marquee.on_frame(), None);
        assert_eq!(marquee.position(), 7.0);

        marquee.pointer_leave();
        assert_eq!(marquee.on_frame(), Some(8.0));
    }

    #[test]
    fn test_unmeasured_content_idles() {
        let mut marquee = Marquee::new(Section::Testimonials, 2.0);
        marquee.set_item_count(3);
        marquee.start();
        // Extent not known yet
        assert_eq!(marquee.on_frame(), Some(0.0));
        assert_eq!(marquee.on_frame(), Some(0.0));

        marquee.set_item_extent(50.0);
        assert_eq!(marquee.on_frame(), Some(2.0));
    }

    #[test]
    fn test_empty_list_cancels_frames() {
        let mut marquee = running(3, 10.0, 1.0);
        assert!(marquee.needs_frame());
        marquee.set_item_count(0);
        assert!(!marquee.needs_frame());
        assert_eq!(marquee.on_frame(), None);

        marquee.set_item_count(2);
        assert!(marquee.needs_frame());
    }

    #[test]
    fn test_shrinking_content_resets_out_of_range_position() {
        let mut marquee = running(10, 10.0, 5.0);
        for _ in 0..15 {
            marquee.on_frame();
        }
        assert_eq!(marquee.position(), 75.0);
        marquee.set_item_count(2);
        assert_eq!(marquee.position(), 0.0);
    }

    #[test]
    fn test_cancel_is_idempotent_and_restartable() {
        let mut marquee = running(2, 10.0, 1.0);
        marquee.stop();
        marquee.stop();
        assert_eq!(marquee.on_frame(), None);
        marquee.start();
        marquee.start();
        assert_eq!(marquee.on_frame(), Some(1.0));
    }

    #[test]
    fn test_pause_events() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut marquee =
            Marquee::new(Section::Testimonials, 1.0).with_event_sink(EventSink::new(tx));
        marquee.set_item_count(2);
        marquee.set_item_extent(10.0);
        marquee.start();
        marquee.pointer_enter();
        marquee.pointer_enter();

        assert_eq!(
            rx.try_recv().unwrap(),
            MediaEvent::MarqueePaused {
                section: Section::Testimonials,
                paused: false
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            MediaEvent::MarqueePaused {
                section: Section::Testimonials,
                paused: true
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval(0), Duration::from_millis(16));
        assert_eq!(frame_interval(30), Duration::from_millis(33));
        assert_eq!(frame_interval(1000), Duration::from_millis(1));
        assert_eq!(frame_interval(2000), Duration::from_millis(1));
        assert!(!frame_interval(u32::MAX).is_zero());
    }
}
