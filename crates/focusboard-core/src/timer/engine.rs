//! Focus/break timer state machine.
//!
//! The engine is tick-driven: it has no clock and no thread. Something else
//! (the [`TimerDriver`](super::TimerDriver), a test, a UI loop) calls
//! `tick()` once per elapsed second while the timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle(Focus, r) --start--> Running(Focus, r) --pause--> Idle(Focus, r)
//! Running(Focus, 1) --tick--> Idle(Break, B)   sessions += 1
//! Running(Break, 1) --tick--> Idle(Focus, F)
//! any --reset--> Idle(phase, full duration of phase)
//! ```
//!
//! Finishing a phase always drops back to `Idle`; the next phase needs an
//! explicit `start`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::TimerError;
use crate::events::{format_clock, Event};

pub const DEFAULT_FOCUS_SECS: u64 = 25 * 60;
pub const DEFAULT_BREAK_SECS: u64 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn other(self) -> Phase {
        match self {
            Phase::Focus => Phase::Break,
            Phase::Break => Phase::Focus,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Focus => write!(f, "Focus"),
            Phase::Break => write!(f, "Break"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

/// Serializable view of the timer for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub state: TimerState,
    pub remaining_secs: u64,
    pub total_secs: u64,
    /// 0.0 .. 100.0 through the current phase.
    pub progress_pct: f64,
    pub sessions_completed_today: u32,
    /// `MM:SS` of the remaining time.
    pub clock: String,
}

/// Focus/break countdown.
///
/// `remaining_secs` always lies in `[0, duration of current phase]`, and a
/// running timer always has at least one second left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimerRecord")]
pub struct FocusTimer {
    phase: Phase,
    state: TimerState,
    remaining_secs: u64,
    focus_duration_secs: u64,
    break_duration_secs: u64,
    sessions_completed_today: u32,
}

/// Unchecked wire form; validated into a [`FocusTimer`] on load.
#[derive(Deserialize)]
struct TimerRecord {
    phase: Phase,
    state: TimerState,
    remaining_secs: u64,
    focus_duration_secs: u64,
    break_duration_secs: u64,
    #[serde(default)]
    sessions_completed_today: u32,
}

impl TryFrom<TimerRecord> for FocusTimer {
    type Error = String;

    fn try_from(r: TimerRecord) -> Result<Self, Self::Error> {
        if r.focus_duration_secs == 0 || r.break_duration_secs == 0 {
            return Err("timer durations must be positive".into());
        }
        let timer = FocusTimer {
            phase: r.phase,
            state: r.state,
            remaining_secs: r.remaining_secs,
            focus_duration_secs: r.focus_duration_secs,
            break_duration_secs: r.break_duration_secs,
            sessions_completed_today: r.sessions_completed_today,
        };
        if timer.remaining_secs > timer.total_secs() {
            return Err(format!(
                "remaining {}s exceeds {} duration {}s",
                timer.remaining_secs,
                timer.phase,
                timer.total_secs()
            ));
        }
        if timer.state == TimerState::Running && timer.remaining_secs == 0 {
            return Err("running timer with nothing left".into());
        }
        Ok(timer)
    }
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self {
            phase: Phase::Focus,
            state: TimerState::Idle,
            remaining_secs: DEFAULT_FOCUS_SECS,
            focus_duration_secs: DEFAULT_FOCUS_SECS,
            break_duration_secs: DEFAULT_BREAK_SECS,
            sessions_completed_today: 0,
        }
    }
}

impl FocusTimer {
    /// Idle at the start of a focus phase.
    pub fn new(focus_duration_secs: u64, break_duration_secs: u64) -> Result<Self, TimerError> {
        if focus_duration_secs == 0 || break_duration_secs == 0 {
            return Err(TimerError::InvalidDuration);
        }
        Ok(Self {
            phase: Phase::Focus,
            state: TimerState::Idle,
            remaining_secs: focus_duration_secs,
            focus_duration_secs,
            break_duration_secs,
            sessions_completed_today: 0,
        })
    }

    pub fn from_minutes(focus_min: u64, break_min: u64) -> Result<Self, TimerError> {
        Self::new(focus_min.saturating_mul(60), break_min.saturating_mul(60))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn focus_duration_secs(&self) -> u64 {
        self.focus_duration_secs
    }

    pub fn break_duration_secs(&self) -> u64 {
        self.break_duration_secs
    }

    pub fn sessions_completed_today(&self) -> u32 {
        self.sessions_completed_today
    }

    pub fn duration_of(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Focus => self.focus_duration_secs,
            Phase::Break => self.break_duration_secs,
        }
    }

    /// Full length of the current phase.
    pub fn total_secs(&self) -> u64 {
        self.duration_of(self.phase)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            state: self.state,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            progress_pct: self.progress() * 100.0,
            sessions_completed_today: self.sessions_completed_today,
            clock: format_clock(self.remaining_secs),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume the countdown. `None` if already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running() {
            return None;
        }
        self.state = TimerState::Running;
        debug!(phase = %self.phase, remaining = self.remaining_secs, "timer started");
        Some(Event::TimerStarted {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop the countdown, keeping the remaining time. `None` if idle.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.state = TimerState::Idle;
        debug!(phase = %self.phase, remaining = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Discard progress in the current phase; the phase itself is kept.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::Idle;
        self.remaining_secs = self.total_secs();
        debug!(phase = %self.phase, "timer reset");
        Event::TimerReset {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// One elapsed second. Returns `Some(Event::PhaseCompleted)` when the
    /// countdown reaches zero; ticks while idle are ignored.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        Some(self.complete_phase())
    }

    /// Change the focus length. Only allowed while idle in a focus phase;
    /// restarts the countdown at the new length.
    pub fn set_focus_duration(&mut self, secs: u64) -> Result<(), TimerError> {
        self.ensure_configurable()?;
        if secs == 0 {
            return Err(TimerError::InvalidDuration);
        }
        self.focus_duration_secs = secs;
        self.remaining_secs = secs;
        Ok(())
    }

    /// Change the break length. Same guard as the focus length; the current
    /// (focus) countdown is untouched.
    pub fn set_break_duration(&mut self, secs: u64) -> Result<(), TimerError> {
        self.ensure_configurable()?;
        if secs == 0 {
            return Err(TimerError::InvalidDuration);
        }
        self.break_duration_secs = secs;
        Ok(())
    }

    /// Day rollover: zero the session counter. Nothing else changes.
    pub fn roll_over_day(&mut self) {
        self.sessions_completed_today = 0;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn ensure_configurable(&self) -> Result<(), TimerError> {
        if self.is_running() || self.phase != Phase::Focus {
            return Err(TimerError::InvalidConfigState {
                phase: self.phase,
                running: self.is_running(),
            });
        }
        Ok(())
    }

    fn complete_phase(&mut self) -> Event {
        let completed = self.phase;
        if completed == Phase::Focus {
            self.sessions_completed_today += 1;
        }
        self.phase = completed.other();
        self.remaining_secs = self.total_secs();
        self.state = TimerState::Idle;
        debug!(
            completed = %completed,
            sessions = self.sessions_completed_today,
            "phase completed"
        );
        Event::PhaseCompleted {
            completed,
            next: self.phase,
            sessions_completed_today: self.sessions_completed_today,
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(timer: &mut FocusTimer, n: u64) -> Vec<Event> {
        (0..n).filter_map(|_| timer.tick()).collect()
    }

    #[test]
    fn initial_state_is_idle_focus_full() {
        let timer = FocusTimer::new(60, 30).unwrap();
        assert_eq!(timer.phase(), Phase::Focus);
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), 60);
        assert_eq!(timer.sessions_completed_today(), 0);
    }

    #[test]
    fn default_is_25_and_5_minutes() {
        let timer = FocusTimer::default();
        assert_eq!(timer.focus_duration_secs(), 1500);
        assert_eq!(timer.break_duration_secs(), 300);
        assert_eq!(timer.remaining_secs(), 1500);
    }

    #[test]
    fn zero_duration_rejected() {
        assert_eq!(FocusTimer::new(0, 5).unwrap_err(), TimerError::InvalidDuration);
        assert_eq!(FocusTimer::new(5, 0).unwrap_err(), TimerError::InvalidDuration);
    }

    #[test]
    fn start_is_noop_when_running() {
        let mut timer = FocusTimer::new(10, 5).unwrap();
        assert!(timer.start().is_some());
        assert!(timer.start().is_none());
        assert!(timer.is_running());
    }

    #[test]
    fn pause_is_noop_when_idle() {
        let mut timer = FocusTimer::new(10, 5).unwrap();
        assert!(timer.pause().is_none());
    }

    #[test]
    fn ticks_while_idle_do_nothing() {
        let mut timer = FocusTimer::new(10, 5).unwrap();
        assert!(run_ticks(&mut timer, 20).is_empty());
        assert_eq!(timer.remaining_secs(), 10);
    }

    #[test]
    fn focus_completion_moves_to_idle_break_and_counts() {
        let mut timer = FocusTimer::new(3, 2).unwrap();
        timer.start();
        assert!(timer.tick().is_none());
        assert!(timer.tick().is_none());
        let event = timer.tick().unwrap();
        assert!(matches!(
            event,
            Event::PhaseCompleted {
                completed: Phase::Focus,
                next: Phase::Break,
                sessions_completed_today: 1,
                ..
            }
        ));
        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), 2);
    }

    #[test]
    fn full_cycle_counts_one_session() {
        let (f, b) = (4, 2);
        let mut timer = FocusTimer::new(f, b).unwrap();
        timer.start();
        run_ticks(&mut timer, f);
        assert_eq!(timer.sessions_completed_today(), 1);

        // No auto-continue: idle ticks change nothing.
        run_ticks(&mut timer, b);
        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.remaining_secs(), b);

        timer.start();
        let events = run_ticks(&mut timer, b);
        assert_eq!(events.len(), 1);
        assert_eq!(timer.phase(), Phase::Focus);
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), f);
        assert_eq!(timer.sessions_completed_today(), 1);

        timer.start();
        run_ticks(&mut timer, f);
        assert_eq!(timer.sessions_completed_today(), 2);
    }

    #[test]
    fn pause_and_resume_preserve_remaining() {
        let mut timer = FocusTimer::new(10, 5).unwrap();
        timer.start();
        run_ticks(&mut timer, 4);
        let event = timer.pause().unwrap();
        assert!(matches!(event, Event::TimerPaused { remaining_secs: 6, .. }));
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), 6);
        timer.start();
        assert_eq!(timer.remaining_secs(), 6);
        assert!(timer.is_running());
    }

    #[test]
    fn reset_discards_progress_but_keeps_phase() {
        let mut timer = FocusTimer::new(10, 5).unwrap();
        timer.start();
        run_ticks(&mut timer, 3);
        timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.phase(), Phase::Focus);
        assert_eq!(timer.remaining_secs(), 10);

        timer.start();
        run_ticks(&mut timer, 10);
        timer.start();
        run_ticks(&mut timer, 2);
        timer.reset();
        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.remaining_secs(), 5);
    }

    #[test]
    fn focus_duration_change_only_when_idle_in_focus() {
        let mut timer = FocusTimer::new(10, 5).unwrap();
        timer.start();
        timer.tick();
        timer.pause();
        timer.set_focus_duration(20).unwrap();
        assert_eq!(timer.remaining_secs(), 20);
        assert_eq!(timer.focus_duration_secs(), 20);

        timer.start();
        let before = timer.clone();
        assert_eq!(
            timer.set_focus_duration(30).unwrap_err(),
            TimerError::InvalidConfigState {
                phase: Phase::Focus,
                running: true
            }
        );
        assert_eq!(timer, before);
    }

    #[test]
    fn duration_change_rejected_during_break() {
        let mut timer = FocusTimer::new(1, 5).unwrap();
        timer.start();
        timer.tick();
        assert_eq!(timer.phase(), Phase::Break);
        let before = timer.clone();
        assert!(matches!(
            timer.set_focus_duration(30),
            Err(TimerError::InvalidConfigState { phase: Phase::Break, running: false })
        ));
        assert!(timer.set_break_duration(30).is_err());
        assert_eq!(timer, before);
    }

    #[test]
    fn break_duration_change_keeps_focus_countdown() {
        let mut timer = FocusTimer::new(10, 5).unwrap();
        timer.start();
        timer.tick();
        timer.pause();
        timer.set_break_duration(7).unwrap();
        assert_eq!(timer.remaining_secs(), 9);
        assert_eq!(timer.break_duration_secs(), 7);
        assert_eq!(
            timer.set_break_duration(0).unwrap_err(),
            TimerError::InvalidDuration
        );
    }

    #[test]
    fn roll_over_day_only_clears_counter() {
        let mut timer = FocusTimer::new(1, 1).unwrap();
        timer.start();
        timer.tick();
        assert_eq!(timer.sessions_completed_today(), 1);
        timer.roll_over_day();
        assert_eq!(timer.sessions_completed_today(), 0);
        assert_eq!(timer.phase(), Phase::Break);
    }

    #[test]
    fn snapshot_reports_progress() {
        let mut timer = FocusTimer::new(100, 5).unwrap();
        timer.start();
        run_ticks(&mut timer, 25);
        let snap = timer.snapshot();
        assert_eq!(snap.remaining_secs, 75);
        assert_eq!(snap.total_secs, 100);
        assert!((snap.progress_pct - 25.0).abs() < 1e-9);
        assert_eq!(snap.clock, "01:15");
        assert_eq!(snap.state, TimerState::Running);
    }

    #[test]
    fn serde_roundtrip_validates() {
        let mut timer = FocusTimer::new(10, 5).unwrap();
        timer.start();
        timer.tick();
        let json = serde_json::to_string(&timer).unwrap();
        let back: FocusTimer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, timer);

        let bad = r#"{"phase":"break","state":"idle","remaining_secs":99,
            "focus_duration_secs":10,"break_duration_secs":5}"#;
        assert!(serde_json::from_str::<FocusTimer>(bad).is_err());
    }
}
