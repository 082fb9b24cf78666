use tracing::debug;

use super::catalog::Section;
use super::events::{EventSink, MediaEvent};

pub const MIN_FRACTION: f64 = 0.0;
pub const MAX_FRACTION: f64 = 100.0;

#[inline]
fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        MIN_FRACTION
    } else {
        value.clamp(MIN_FRACTION, MAX_FRACTION)
    }
}

/// Width of the revealed "before" layer for a container `width` wide
#[inline]
pub fn clip_extent(fraction: f64, width: u16) -> u16 {
    let extent = (clamp_fraction(fraction) / MAX_FRACTION) * f64::from(width);
    (extent.round() as u16).min(width)
}

/// Before/after comparison slider driven by pointer drags
#[derive(Debug)]
pub struct ComparisonSlider {
    section: Section,
    fraction: f64,
    initial: f64,
    dragging: bool,
    events: EventSink,
}

impl ComparisonSlider {
    pub fn new(section: Section, initial_fraction: f64) -> Self {
        let initial = clamp_fraction(initial_fraction);
        Self {
            section,
            fraction: initial,
            initial,
            dragging: false,
            events: EventSink::detached(),
        }
    }

    /// Set the event sender for fraction changes
    pub fn with_event_sink(mut self, events: EventSink) -> Self {
        self.events = events;
        self
    }

    /// Current clip fraction, always within [0, 100]
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn on_drag_start(&mut self) {
        self.dragging = true;
    }

    pub fn on_drag_end(&mut self) {
        self.dragging = false;
    }

    /// Pointer left the interactive region; a drag never outlives it
    pub fn on_pointer_leave(&mut self) {
        if self.dragging {
            debug!("{}: pointer left mid-drag, ending drag", self.section);
            self.on_drag_end();
        }
    }

    /// Map the pointer onto the container while dragging.
    ///
    /// Returns whether the fraction changed.
    pub fn on_pointer_move(
        &mut self,
        pointer_x: f64,
        container_left: f64,
        container_width: f64,
    ) -> bool {
        if !self.dragging {
            return false;
        }
        if !(container_width.is_finite() && container_width > 0.0) || !pointer_x.is_finite() {
            return false;
        }
        let fraction = ((pointer_x - container_left) / container_width) * MAX_FRACTION;
        self.set_fraction(fraction)
    }

    /// Keyboard adjustment by `delta` percentage points
    pub fn nudge(&mut self, delta: f64) -> bool {
        self.set_fraction(self.fraction + delta)
    }

    /// Back to the initial fraction, ending any drag
    pub fn reset(&mut self) {
        self.dragging = false;
        self.set_fraction(self.initial);
    }

    fn set_fraction(&mut self, value: f64) -> bool {
        let clamped = clamp_fraction(value);
        if (clamped - self.fraction).abs() < f64::EPSILON {
            return false;
        }
        self.fraction = clamped;
        self.events.send(MediaEvent::SliderMoved {
            section: self.section,
            fraction: clamped,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider() -> ComparisonSlider {
        ComparisonSlider::new(Section::Comparisons, 50.0)
    }

    #[test]
    fn test_pointer_maps_to_fraction() {
        let mut slider = slider();
        slider.on_drag_start();
        slider.on_pointer_move(300.0, 100.0, 400.0);
        assert_eq!(slider.fraction(), 50.0);
        slider.on_pointer_move(200.0, 100.0, 400.0);
        assert_eq!(slider.fraction(), 25.0);
    }

    #[test]
    fn test_fraction_always_clamped() {
        let mut slider = slider();
        slider.on_drag_start();
        for x in [-1e9, -50.0, 0.0, 99.0, 100.0, 350.0, 500.0, 501.0, 1e12] {
            slider.on_pointer_move(x, 100.0, 400.0);
            assert!((0.0..=100.0).contains(&slider.fraction()), "x = {}", x);
        }
        slider.on_pointer_move(-10.0, 100.0, 400.0);
        assert_eq!(slider.fraction(), 0.0);
        slider.on_pointer_move(900.0, 100.0, 400.0);
        assert_eq!(slider.fraction(), 100.0);
    }

    #[test]
    fn test_moves_ignored_without_drag() {
        let mut slider = slider();
        assert!(!slider.on_pointer_move(120.0, 100.0, 400.0));
        assert_eq!(slider.fraction(), 50.0);
    }

    #[test]
    fn test_leave_ends_drag() {
        let mut slider = slider();
        slider.on_drag_start();
        slider.on_pointer_leave();
        assert!(!slider.is_dragging());
        assert!(!slider.on_pointer_move(120.0, 100.0, 400.0));
    }

    #[test]
    fn test_degenerate_container_ignored() {
        let mut slider = slider();
        slider.on_drag_start();
        assert!(!slider.on_pointer_move(10.0, 0.0, 0.0));
        assert!(!slider.on_pointer_move(10.0, 0.0, f64::NAN));
        assert!(!slider.on_pointer_move(f64::INFINITY, 0.0, 100.0));
        assert_eq!(slider.fraction(), 50.0);
    }

    #[test]
    fn test_nudge_and_reset() {
        let mut slider = slider();
        for _ in 0..30 {
            slider.nudge(5.0);
        }
        assert_eq!(slider.fraction(), 100.0);
        slider.reset();
        assert_eq!(slider.fraction(), 50.0);
    }

    #[test]
    fn test_clip_extent() {
        assert_eq!(clip_extent(50.0, 80), 40);
        assert_eq!(clip_extent(0.0, 80), 0);
        assert_eq!(clip_extent(100.0, 80), 80);
        assert_eq!(clip_extent(250.0, 80), 80);
    }

    #[test]
    fn test_out_of_range_initial_is_clamped() {
        assert_eq!(ComparisonSlider::new(Section::Comparisons, 140.0).fraction(), 100.0);
    }
}
