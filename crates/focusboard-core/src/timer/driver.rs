//! Periodic tick driver for [`FocusTimer`].
//!
//! Spawns a tokio interval task while the timer runs. Every command bumps a
//! generation counter under the same lock the tick task takes, and a tick
//! only applies if its generation is still current. Once `pause()` or
//! `reset()` returns, no further tick can touch the timer, even if the old
//! task has not been torn down yet.
//!
//! Command events are returned to the caller. Tick-produced events (phase
//! completion) arrive on the channel returned by [`TimerDriver::new`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use super::engine::{FocusTimer, TimerSnapshot};
use crate::error::TimerError;
use crate::events::Event;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
struct Shared {
    timer: FocusTimer,
    generation: u64,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns a timer and drives it once per interval while running.
///
/// Must be used from within a tokio runtime.
pub struct TimerDriver {
    shared: Arc<Mutex<Shared>>,
    events: mpsc::UnboundedSender<Event>,
    ticker: Option<JoinHandle<()>>,
    period: Duration,
}

impl TimerDriver {
    pub fn new(timer: FocusTimer) -> (Self, mpsc::UnboundedReceiver<Event>) {
        Self::with_period(timer, TICK_INTERVAL)
    }

    pub fn with_period(
        timer: FocusTimer,
        period: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut driver = Self {
            shared: Arc::new(Mutex::new(Shared {
                timer,
                generation: 0,
            })),
            events: tx,
            ticker: None,
            period,
        };
        // A timer persisted mid-countdown resumes ticking.
        if driver.timer().is_running() {
            driver.spawn_ticker();
        }
        (driver, rx)
    }

    pub fn timer(&self) -> FocusTimer {
        lock(&self.shared).timer.clone()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        lock(&self.shared).timer.snapshot()
    }

    pub fn start(&mut self) -> Option<Event> {
        let event = lock(&self.shared).timer.start()?;
        self.spawn_ticker();
        Some(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.timer.pause()
        };
        self.stop_ticker();
        event
    }

    pub fn reset(&mut self) -> Event {
        let event = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.timer.reset()
        };
        self.stop_ticker();
        event
    }

    pub fn set_focus_duration(&mut self, secs: u64) -> Result<(), TimerError> {
        lock(&self.shared).timer.set_focus_duration(secs)
    }

    pub fn set_break_duration(&mut self, secs: u64) -> Result<(), TimerError> {
        lock(&self.shared).timer.set_break_duration(secs)
    }

    /// Stop ticking and hand back the timer in whatever state it is in.
    pub fn into_timer(mut self) -> FocusTimer {
        {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
        }
        self.stop_ticker();
        self.timer()
    }

    fn spawn_ticker(&mut self) {
        self.stop_ticker();
        let generation = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.generation
        };
        let shared = Arc::clone(&self.shared);
        let events = self.events.clone();
        let period = self.period;

        self.ticker = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let (event, running) = {
                    let mut guard = lock(&shared);
                    if guard.generation != generation {
                        break;
                    }
                    let event = guard.timer.tick();
                    (event, guard.timer.is_running())
                };
                if let Some(event) = event {
                    // Receiver gone just means nobody is listening.
                    let _ = events.send(event);
                }
                if !running {
                    debug!("ticker stopped: timer idle");
                    break;
                }
            }
        }));
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
