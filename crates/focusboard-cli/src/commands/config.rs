use clap::Subcommand;
use focusboard_core::storage::Database;
use focusboard_core::Config;

use super::timer::{load_timer, save_timer};
use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "timer.focus_minutes", "dashboard.widgets")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value (lists are comma-separated)
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

/// Timer lengths also live in the saved timer. The new length goes through
/// the timer's guard before the config file is written.
fn apply_to_saved_timer(key: &str, config: &Config) -> CmdResult {
    let secs = match key {
        "timer.focus_minutes" => config.timer.focus_minutes,
        "timer.break_minutes" => config.timer.break_minutes,
        _ => return Ok(()),
    }
    .saturating_mul(60);

    let db = Database::open()?;
    let mut timer = load_timer(&db)?;
    if key == "timer.focus_minutes" {
        timer.set_focus_duration(secs)?;
    } else {
        timer.set_break_duration(secs)?;
    }
    save_timer(&db, &timer)
}

pub fn run(action: ConfigAction) -> CmdResult {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            apply_to_saved_timer(&key, &config)?;
            config.save()?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            print_json(&config)?;
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
