//! # Focusboard Core Library
//!
//! Core logic for the Focusboard productivity dashboard. Everything here is
//! UI-independent; the `focusboard` CLI (and any other front end) is a thin
//! layer over the same library.
//!
//! ## Architecture
//!
//! - **Reorder engine**: stable drag-and-drop moves over an ordered task list,
//!   with priority tiers derived from position after every move
//! - **Focus timer**: a tick-driven focus/break state machine, plus a tokio
//!   driver that ticks it once per second
//! - **Storage**: SQLite persistence for tasks, habits and timer state, and
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TaskList`]: ordered tasks and the operations on them
//! - [`FocusTimer`]: focus/break state machine
//! - [`TimerDriver`]: periodic ticking with synchronous cancellation
//! - [`Database`]: persistence
//! - [`Config`]: application configuration management

pub mod dashboard;
pub mod error;
pub mod events;
pub mod habit;
pub mod notes;
pub mod notify;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timer;

pub use dashboard::{DashboardLayout, WidgetKind, WidgetSlot};
pub use error::{
    ConfigError, CoreError, DatabaseError, HabitError, NoteError, QuickAddError, ReorderError,
    TaskError, TimerError,
};
pub use events::Event;
pub use habit::{Habit, HabitSummary, HabitTracker};
pub use notes::{Note, Notes};
pub use notify::{LogNotifier, MemoryNotifier, Notifier};
pub use stats::{BudgetCategory, FinanceSummary, FocusStats, TaskStats};
pub use storage::{Config, Database, FocusDay};
pub use task::{parse_quick_add, Priority, QuickAdd, Task, TaskList, TaskSort, TaskView};
pub use timer::{FocusTimer, Phase, TimerDriver, TimerSnapshot, TimerState};
