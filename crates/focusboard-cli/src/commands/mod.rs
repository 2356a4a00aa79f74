pub mod config;
pub mod finance;
pub mod habit;
pub mod layout;
pub mod note;
pub mod stats;
pub mod task;
pub mod timer;

use focusboard_core::{Event, LogNotifier, Notifier};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn print_json<T: Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the event and pass its message on as a notification.
pub fn emit(event: &Event) -> CmdResult {
    print_json(event)?;
    LogNotifier.notify(&event.message());
    Ok(())
}

/// The calendar day every command works in. UTC, matching the focus
/// session log and the timer's day key.
pub fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
