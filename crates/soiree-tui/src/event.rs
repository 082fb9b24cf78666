use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use image::DynamicImage;
use soiree_core::media::{frame_interval, Section};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    /// Poll timeout while a frame loop is running
    animation_rate: Duration,
}

/// Request to decode one media file for a section entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub section: Section,
    pub index: usize,
    pub path: PathBuf,
}

/// Result of an async media decode
pub enum MediaLoadResult {
    /// Media decoded successfully
    Success {
        section: Section,
        index: usize,
        image: DynamicImage,
    },
    /// Media failed to load
    Failure {
        section: Section,
        index: usize,
        error: String,
    },
}

impl MediaLoadResult {
    pub fn section(&self) -> Section {
        match self {
            MediaLoadResult::Success { section, .. } | MediaLoadResult::Failure { section, .. } => {
                *section
            }
        }
    }
}

impl EventHandler {
    /// Handler that polls faster while animating
    pub fn with_animation_fps(tick_rate_ms: u64, fps: u32) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_rate: frame_interval(fps),
        }
    }

    pub fn animation_rate(&self) -> Duration {
        self.animation_rate
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll with the frame interval as timeout
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_rate)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse moved, clicked or dragged
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

/// Decode a media file on the blocking pool and report back on `tx`
pub fn spawn_media_load(request: MediaRequest, tx: mpsc::UnboundedSender<MediaLoadResult>) {
    tokio::spawn(async move {
        let MediaRequest {
            section,
            index,
            path,
        } = request;
        debug!("{}: decoding {}", section, path.display());

        let decode_path = path.clone();
        let decoded = tokio::task::spawn_blocking(move || image::open(&decode_path)).await;

        let result = match decoded {
            Ok(Ok(image)) => MediaLoadResult::Success {
                section,
                index,
                image,
            },
            Ok(Err(e)) => {
                warn!("Failed to load {}: {}", path.display(), e);
                MediaLoadResult::Failure {
                    section,
                    index,
                    error: e.to_string(),
                }
            }
            Err(e) => MediaLoadResult::Failure {
                section,
                index,
                error: format!("decode task failed: {}", e),
            },
        };
        let _ = tx.send(result);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reports_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_media_load(
            MediaRequest {
                section: Section::Gallery,
                index: 3,
                path: PathBuf::from("/nonexistent/soiree/missing.jpg"),
            },
            tx,
        );

        match rx.recv().await {
            Some(MediaLoadResult::Failure { section, index, .. }) => {
                assert_eq!(section, Section::Gallery);
                assert_eq!(index, 3);
            }
            _ => panic!("expected a failure result"),
        }
    }

    #[test]
    fn test_animation_rate_from_fps() {
        let handler = EventHandler::with_animation_fps(100, 50);
        assert_eq!(handler.animation_rate(), Duration::from_millis(20));
    }
}
