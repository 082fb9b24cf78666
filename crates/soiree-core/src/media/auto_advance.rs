use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::catalog::Section;

/// One auto-advance tick, delivered to the owning controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoAdvanceTick {
    pub section: Section,
    /// Identifies the timer that produced the tick
    pub generation: u64,
}

/// Running timer task; aborted when dropped
#[derive(Debug)]
struct TimerGuard {
    handle: JoinHandle<()>,
    generation: u64,
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Repeating interval timer that asks its owner to advance.
///
/// Ticks travel over an mpsc channel; the owner applies each one through
/// [`AutoAdvance::accepts`], which rejects ticks from timers that were
/// stopped in the meantime.
#[derive(Debug)]
pub struct AutoAdvance {
    section: Section,
    interval: Option<Duration>,
    timer: Option<TimerGuard>,
    generation: u64,
    tick_tx: mpsc::UnboundedSender<AutoAdvanceTick>,
}

impl AutoAdvance {
    /// Create a stopped scheduler; `None` interval means disabled
    pub fn new(
        section: Section,
        interval: Option<Duration>,
        tick_tx: mpsc::UnboundedSender<AutoAdvanceTick>,
    ) -> Self {
        Self {
            section,
            interval,
            timer: None,
            generation: 0,
            tick_tx,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Start ticking every `interval`; no-op if already running.
    ///
    /// Returns whether a timer was started.
    pub fn start(&mut self, interval: Duration) -> bool {
        if self.timer.is_some() {
            debug!("{}: auto-advance already running", self.section);
            return false;
        }
        if interval.is_zero() {
            warn!("{}: refusing to start auto-advance with zero interval", self.section);
            return false;
        }
        let Ok(runtime) = Handle::try_current() else {
            warn!("{}: no async runtime, auto-advance stays stopped", self.section);
            return false;
        };

        self.interval = Some(interval);
        self.generation += 1;
        let generation = self.generation;
        let section = self.section;
        let tx = self.tick_tx.clone();

        let handle = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // Skip the first tick (fires immediately)
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if tx.send(AutoAdvanceTick { section, generation }).is_err() {
                    break;
                }
            }
        });

        debug!(
            "{}: auto-advance started every {:?} (generation {})",
            section, interval, generation
        );
        self.timer = Some(TimerGuard { handle, generation });
        true
    }

    /// Start with the configured interval
    pub fn resume(&mut self) -> bool {
        match self.interval {
            Some(interval) => self.start(interval),
            None => false,
        }
    }

    /// Cancel the timer; safe when not running. Returns whether one was stopped.
    pub fn stop(&mut self) -> bool {
        match self.timer.take() {
            Some(guard) => {
                debug!(
                    "{}: auto-advance stopped (generation {})",
                    self.section, guard.generation
                );
                true
            }
            None => false,
        }
    }

    /// Flip between playing and stopped; returns the new playing state
    pub fn toggle_play(&mut self) -> bool {
        if self.is_playing() {
            self.stop();
        } else {
            self.resume();
        }
        self.is_playing()
    }

    /// Whether a received tick belongs to the currently running timer
    pub fn accepts(&self, tick: &AutoAdvanceTick) -> bool {
        tick.section == self.section
            && self
                .timer
                .as_ref()
                .is_some_and(|timer| timer.generation == tick.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &mut mpsc::UnboundedReceiver<AutoAdvanceTick>) -> Vec<AutoAdvanceTick> {
        let mut ticks = Vec::new();
        while let Ok(tick) = rx.try_recv() {
            ticks.push(tick);
        }
        ticks
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_interval() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut auto = AutoAdvance::new(Section::Hero, None, tx);

        assert!(auto.start(Duration::from_millis(1000)));
        tokio::time::sleep(Duration::from_millis(3050)).await;

        let ticks = drain(&mut rx);
        assert_eq!(ticks.len(), 3);
        assert!(ticks.iter().all(|tick| auto.accepts(tick)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_keeps_single_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut auto = AutoAdvance::new(Section::Hero, None, tx);

        assert!(auto.start(Duration::from_millis(500)));
        assert!(!auto.start(Duration::from_millis(500)));
        tokio::time::sleep(Duration::from_millis(1020)).await;

        assert_eq!(drain(&mut rx).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_rejects_queued_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut auto = AutoAdvance::new(Section::Testimonials, None, tx);

        auto.start(Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(auto.stop());
        assert!(!auto.stop());

        // Ticks queued before the stop are stale now
        let stale = drain(&mut rx);
        assert_eq!(stale.len(), 2);
        assert!(stale.iter().all(|tick| !auto.accepts(tick)));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_uses_new_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut auto = AutoAdvance::new(Section::Hero, Some(Duration::from_millis(100)), tx);

        assert!(auto.toggle_play());
        tokio::time::sleep(Duration::from_millis(150)).await;
        let first = drain(&mut rx);
        assert!(!auto.toggle_play());
        assert!(auto.toggle_play());

        assert!(first.iter().all(|tick| !auto.accepts(tick)));
        tokio::time::sleep(Duration::from_millis(150)).await;
        let second = drain(&mut rx);
        assert_eq!(second.len(), 1);
        assert!(auto.accepts(&second[0]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut auto = AutoAdvance::new(Section::Hero, None, tx);
            auto.start(Duration::from_millis(100));
        }
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_start_without_runtime_stays_stopped() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut auto = AutoAdvance::new(Section::Hero, None, tx);
        assert!(!auto.start(Duration::from_millis(100)));
        assert!(!auto.is_playing());
    }

    #[tokio::test]
    async fn test_zero_interval_rejected() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut auto = AutoAdvance::new(Section::Hero, None, tx);
        assert!(!auto.start(Duration::ZERO));
        assert!(!auto.resume());
    }
}
