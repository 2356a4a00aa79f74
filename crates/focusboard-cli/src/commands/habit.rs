use clap::Subcommand;
use focusboard_core::storage::Database;
use focusboard_core::Habit;

use super::{emit, print_json, CmdResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a habit
    Add {
        name: String,
        /// Units that make up a day's goal
        #[arg(long, default_value = "1")]
        target: u32,
    },
    /// List habits as JSON
    List,
    /// Check off (or uncheck) a habit for today
    Toggle {
        /// Habit ID
        id: String,
    },
    /// Remove a habit
    Remove {
        /// Habit ID
        id: String,
    },
    /// Completed count, completion rate and best streak
    Summary,
}

pub fn run(action: HabitAction) -> CmdResult {
    let db = Database::open()?;
    let mut tracker = db.load_habits()?;

    match action {
        HabitAction::Add { name, target } => {
            let habit = Habit::new(name, target);
            print_json(&habit)?;
            tracker.add(habit);
            db.save_habits(&tracker)?;
        }
        HabitAction::List => print_json(&tracker.habits())?,
        HabitAction::Toggle { id } => {
            let event = tracker.toggle(&id)?;
            db.save_habits(&tracker)?;
            emit(&event)?;
        }
        HabitAction::Remove { id } => {
            let removed = tracker.remove(&id)?;
            db.save_habits(&tracker)?;
            println!("removed habit: {}", removed.name);
        }
        HabitAction::Summary => print_json(&tracker.summary())?,
    }
    Ok(())
}
