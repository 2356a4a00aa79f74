use chrono::Utc;
use clap::Subcommand;
use focusboard_core::storage::Database;
use focusboard_core::{Config, Event, FocusTimer, Phase, TimerDriver};
use tracing::{debug, info};

use super::{emit, print_json, today, CmdResult};

const TIMER_KEY: &str = "focus_timer";
const TIMER_DAY_KEY: &str = "focus_timer_day";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print current timer state as JSON
    Status,
    /// Run the countdown in the foreground until the phase ends (Ctrl-C pauses)
    Start,
    /// Pause a timer left running
    Pause,
    /// Reset the current phase to its full duration
    Reset,
    /// Set the focus length (only while idle in focus)
    SetFocus {
        /// Minutes
        minutes: u64,
    },
    /// Set the break length (only while idle in focus)
    SetBreak {
        /// Minutes
        minutes: u64,
    },
    /// Start a new day: zero the session counter
    RollOver,
}

fn day_key() -> String {
    today().to_string()
}

/// Load the persisted timer, or a fresh one from config. The session
/// counter restarts when the stored day is not today.
pub fn load_timer(db: &Database) -> Result<FocusTimer, Box<dyn std::error::Error>> {
    let mut timer = match db.kv_get_json::<FocusTimer>(TIMER_KEY)? {
        Some(timer) => timer,
        None => Config::load()?.timer()?,
    };
    let today = day_key();
    if db.kv_get(TIMER_DAY_KEY)?.is_some_and(|day| day != today) {
        info!(sessions = timer.sessions_completed_today(), "new day, rolling over");
        timer.roll_over_day();
    }
    Ok(timer)
}

pub fn save_timer(db: &Database, timer: &FocusTimer) -> CmdResult {
    db.kv_set_json(TIMER_KEY, timer)?;
    db.kv_set(TIMER_DAY_KEY, &day_key())?;
    Ok(())
}

async fn run_in_foreground(db: &Database, timer: FocusTimer) -> CmdResult {
    let (mut driver, mut events) = TimerDriver::new(timer);
    if let Some(event) = driver.start() {
        emit(&event)?;
    }
    save_timer(db, &driver.timer())?;

    tokio::select! {
        event = events.recv() => {
            if let Some(event) = event {
                if matches!(event, Event::PhaseCompleted { completed: Phase::Focus, .. }) {
                    let secs = driver.timer().focus_duration_secs();
                    db.record_focus_session(secs, Utc::now())?;
                }
                emit(&event)?;
            }
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            debug!("interrupted");
            if let Some(event) = driver.pause() {
                emit(&event)?;
            }
        }
    }

    let timer = driver.into_timer();
    save_timer(db, &timer)?;
    print_json(&timer.snapshot())
}

fn save_duration(key: &str, minutes: u64) -> CmdResult {
    let mut config = Config::load()?;
    config.set(key, &minutes.to_string())?;
    config.save()?;
    Ok(())
}

pub fn run(action: TimerAction) -> CmdResult {
    let db = Database::open()?;
    let mut timer = load_timer(&db)?;

    match action {
        TimerAction::Status => {
            print_json(&timer.snapshot())?;
        }
        TimerAction::Start => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            return runtime.block_on(run_in_foreground(&db, timer));
        }
        TimerAction::Pause => match timer.pause() {
            Some(event) => emit(&event)?,
            None => print_json(&timer.snapshot())?,
        },
        TimerAction::Reset => {
            let event = timer.reset();
            emit(&event)?;
        }
        TimerAction::SetFocus { minutes } => {
            timer.set_focus_duration(minutes.saturating_mul(60))?;
            save_duration("timer.focus_minutes", minutes)?;
            print_json(&timer.snapshot())?;
        }
        TimerAction::SetBreak { minutes } => {
            timer.set_break_duration(minutes.saturating_mul(60))?;
            save_duration("timer.break_minutes", minutes)?;
            print_json(&timer.snapshot())?;
        }
        TimerAction::RollOver => {
            timer.roll_over_day();
            print_json(&timer.snapshot())?;
        }
    }

    save_timer(&db, &timer)
}
