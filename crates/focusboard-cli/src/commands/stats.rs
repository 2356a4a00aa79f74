use chrono::NaiveDate;
use clap::Subcommand;
use focusboard_core::storage::Database;
use focusboard_core::{Config, FocusStats, TaskStats};

use super::timer::load_timer;
use super::{print_json, today, CmdResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's focus sessions against the daily target
    Focus,
    /// Task totals, due today and overdue
    Tasks,
    /// Logged focus sessions for one day (UTC)
    Day {
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: StatsAction) -> CmdResult {
    let db = Database::open()?;

    match action {
        StatsAction::Focus => {
            let config = Config::load()?;
            let timer = load_timer(&db)?;
            print_json(&FocusStats::from_timer(&timer, config.timer.daily_target))?;
        }
        StatsAction::Tasks => {
            let list = db.load_tasks()?;
            print_json(&TaskStats::compute(list.tasks(), today()))?;
        }
        StatsAction::Day { date } => {
            let date = date.unwrap_or_else(today);
            print_json(&db.focus_day(date)?)?;
        }
    }
    Ok(())
}
