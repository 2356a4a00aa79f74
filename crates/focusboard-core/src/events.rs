use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the system produces an Event.
/// Adapters print them and hand [`Event::message`] to a notifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TaskAdded {
        id: String,
        title: String,
        at: DateTime<Utc>,
    },
    TaskToggled {
        id: String,
        completed: bool,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        id: String,
        at: DateTime<Utc>,
    },
    TasksReordered {
        from: usize,
        to: usize,
        len: usize,
        at: DateTime<Utc>,
    },
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A countdown reached zero; the timer now waits in `next`.
    PhaseCompleted {
        completed: Phase,
        next: Phase,
        sessions_completed_today: u32,
        at: DateTime<Utc>,
    },
    HabitToggled {
        id: String,
        completed: bool,
        at: DateTime<Utc>,
    },
    NoteAdded {
        id: String,
        title: String,
        at: DateTime<Utc>,
    },
    NoteDeleted {
        id: String,
        at: DateTime<Utc>,
    },
    WidgetMoved {
        from: usize,
        to: usize,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short user-facing message for toast-style notification.
    pub fn message(&self) -> String {
        match self {
            Event::TaskAdded { title, .. } => format!("Task added: \"{title}\""),
            Event::TaskToggled { completed: true, .. } => "Task completed".into(),
            Event::TaskToggled { completed: false, .. } => "Task reopened".into(),
            Event::TaskDeleted { .. } => "Task deleted".into(),
            Event::TasksReordered { .. } => {
                "Tasks reordered; priorities updated from position".into()
            }
            Event::TimerStarted { phase, .. } => format!("{phase} started"),
            Event::TimerPaused { phase, remaining_secs, .. } => {
                format!("{phase} paused at {}", format_clock(*remaining_secs))
            }
            Event::TimerReset { phase, .. } => format!("{phase} reset"),
            Event::PhaseCompleted { completed, next, sessions_completed_today, .. } => format!(
                "{completed} complete ({sessions_completed_today} sessions today); {next} is ready"
            ),
            Event::HabitToggled { completed: true, .. } => "Habit done for today".into(),
            Event::HabitToggled { completed: false, .. } => "Habit unchecked".into(),
            Event::NoteAdded { title, .. } => format!("Note saved: \"{title}\""),
            Event::NoteDeleted { .. } => "Note deleted".into(),
            Event::WidgetMoved { .. } => "Dashboard layout updated".into(),
        }
    }
}

/// `MM:SS`, minutes uncapped.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
