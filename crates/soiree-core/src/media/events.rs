use tokio::sync::mpsc;
use tracing::warn;

use super::catalog::Section;

/// State changes published by controllers to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Current index moved (navigation, tick, or list replacement)
    IndexChanged {
        section: Section,
        index: usize,
        length: usize,
    },
    /// Auto-advance started or stopped
    PlaybackChanged { section: Section, playing: bool },
    /// Marquee paused (hover/stop) or resumed
    MarqueePaused { section: Section, paused: bool },
    /// Comparison clip fraction changed
    SliderMoved { section: Section, fraction: f64 },
    /// Modal viewer opened at an index
    ViewerOpened { section: Section, index: usize },
    /// Modal viewer closed
    ViewerClosed { section: Section },
    /// Info panel shown or hidden
    InfoToggled { section: Section, visible: bool },
    /// Loading indicator set or cleared
    LoadingChanged { section: Section, loading: bool },
}

/// Optional subscription channel owned by a controller
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<mpsc::UnboundedSender<MediaEvent>>,
}

impl EventSink {
    pub fn new(tx: mpsc::UnboundedSender<MediaEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Sink that drops every event
    pub fn detached() -> Self {
        Self::default()
    }

    /// Send an event to the subscriber (if one is attached)
    pub fn send(&self, event: MediaEvent) {
        if let Some(ref tx) = self.tx {
            if tx.send(event).is_err() {
                warn!("Failed to send media event: receiver dropped");
            }
        }
    }
}
