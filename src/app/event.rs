//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  Ticks
//! double as the animation frame clock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Frame interval for the given rate; zero is treated as one frame per second.
pub fn tick_rate(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.clamp(1, 240)
}

/// Owns the reader task.  Dropping it stops polling at the next tick.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    stop: Arc<AtomicBool>,
}

impl EventReader {
    /// Spawns a blocking task that polls the terminal and sends events
    /// through the channel, with a `Tick` whenever `tick_rate` passes idle.
    pub fn spawn(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        tokio::task::spawn_blocking(move || {
            while !flag.load(Ordering::Relaxed) {
                let has_event = event::poll(tick_rate).unwrap_or(false);
                let app_event = if has_event {
                    match event::read() {
                        Ok(CtEvent::Key(k)) if k.kind != KeyEventKind::Release => AppEvent::Key(k),
                        Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                        Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                        _ => continue,
                    }
                } else {
                    AppEvent::Tick
                };
                if tx.send(app_event).is_err() {
                    break; // receiver dropped
                }
            }
        });

        Self { rx, stop }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_rate() {
        assert_eq!(tick_rate(10), Duration::from_millis(100));
        assert_eq!(tick_rate(0), Duration::from_secs(1));
        assert_eq!(tick_rate(10_000), Duration::from_secs(1) / 240);
    }
}
