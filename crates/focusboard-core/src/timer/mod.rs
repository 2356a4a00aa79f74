mod driver;
mod engine;

pub use driver::{TimerDriver, TICK_INTERVAL};
pub use engine::{
    FocusTimer, Phase, TimerSnapshot, TimerState, DEFAULT_BREAK_SECS, DEFAULT_FOCUS_SECS,
};
