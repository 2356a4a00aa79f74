//! Tasks and the ordered task list.
//!
//! A task's priority is normally derived from where it sits in its list:
//! dragging a task up or down is how priority gets edited (see [`reorder`]).
//! New tasks start at the lowest tier and go to the front of the list.

pub mod quick_add;
pub mod reorder;
pub mod view;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{CoreError, ReorderError, TaskError};
use crate::events::Event;

pub use quick_add::{parse_quick_add, QuickAdd};
pub use reorder::{assign_priorities, move_item, tier_for_position, TIER_COUNT};
pub use view::{TaskSort, TaskView};

/// Priority tier, 1 (most urgent) through 4 (lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const URGENT: Priority = Priority(1);
    pub const HIGH: Priority = Priority(2);
    pub const MEDIUM: Priority = Priority(3);
    pub const LOW: Priority = Priority(4);

    /// Returns `None` outside 1..=4.
    pub fn new(tier: u8) -> Option<Self> {
        (1..=TIER_COUNT as u8).contains(&tier).then_some(Priority(tier))
    }

    /// Clamp any tier value into 1..=4.
    pub fn clamped(tier: usize) -> Self {
        Priority(tier.clamp(1, TIER_COUNT) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::LOW
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(tier: u8) -> Result<Self, Self::Error> {
        Priority::new(tier).ok_or_else(|| format!("priority tier must be 1-4, got {tier}"))
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        p.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub project: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// New uncompleted task at the lowest tier.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            completed: false,
            priority: Priority::default(),
            due_date: None,
            project: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project;
        self
    }

    /// Due strictly before `today` and not yet done.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|d| d < today)
    }
}

/// Ordered list of tasks; index is position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    fn position_or_err(&self, id: &str) -> Result<usize, TaskError> {
        self.position(id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// Insert at the front (newest first).
    pub fn add(&mut self, task: Task) -> Event {
        let event = Event::TaskAdded {
            id: task.id.clone(),
            title: task.title.clone(),
            at: Utc::now(),
        };
        self.tasks.insert(0, task);
        event
    }

    pub fn toggle_complete(&mut self, id: &str) -> Result<Event, TaskError> {
        let index = self.position_or_err(id)?;
        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        Ok(Event::TaskToggled {
            id: task.id.clone(),
            completed: task.completed,
            at: Utc::now(),
        })
    }

    /// Remove the task entirely.
    pub fn delete(&mut self, id: &str) -> Result<Event, TaskError> {
        let index = self.position_or_err(id)?;
        let task = self.tasks.remove(index);
        debug!(id = %task.id, "deleted task");
        Ok(Event::TaskDeleted {
            id: task.id,
            at: Utc::now(),
        })
    }

    /// Move by index and recompute every priority. Unmodified on error.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<Event, ReorderError> {
        self.tasks = reorder::reorder(&self.tasks, from, to)?;
        Ok(Event::TasksReordered {
            from,
            to,
            len: self.tasks.len(),
            at: Utc::now(),
        })
    }

    /// Move the `active` task onto the slot held by `over`, the way a
    /// drag-release reports it. Dropping a task on itself changes nothing.
    pub fn reorder_by_id(&mut self, active: &str, over: &str) -> Result<Option<Event>, CoreError> {
        if active == over {
            return Ok(None);
        }
        let from = self.position_or_err(active)?;
        let to = self.position_or_err(over)?;
        Ok(Some(self.reorder(from, to)?))
    }

    /// Filtered and sorted view; positions in the result are not list positions.
    pub fn view(&self, view: &TaskView, sort: TaskSort, today: NaiveDate) -> Vec<&Task> {
        view::select(&self.tasks, view, sort, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(titles: &[&str]) -> TaskList {
        TaskList::from_tasks(titles.iter().map(|t| Task::new(*t)).collect())
    }

    #[test]
    fn new_task_defaults_to_lowest_tier() {
        let task = Task::new("Write report");
        assert_eq!(task.priority, Priority::LOW);
        assert!(!task.completed);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn priority_rejects_out_of_range() {
        assert!(Priority::new(0).is_none());
        assert!(Priority::new(5).is_none());
        assert_eq!(Priority::new(2), Some(Priority::HIGH));
        assert_eq!(Priority::clamped(9), Priority::LOW);
        assert_eq!(Priority::clamped(0), Priority::URGENT);
    }

    #[test]
    fn priority_serializes_as_number() {
        let json = serde_json::to_string(&Priority::MEDIUM).unwrap();
        assert_eq!(json, "3");
        assert!(serde_json::from_str::<Priority>("7").is_err());
    }

    #[test]
    fn add_inserts_at_front() {
        let mut list = list_of(&["old"]);
        let event = list.add(Task::new("new"));
        assert_eq!(list.tasks()[0].title, "new");
        assert!(matches!(event, Event::TaskAdded { ref title, .. } if title == "new"));
    }

    #[test]
    fn toggle_flips_completion() {
        let mut list = list_of(&["a"]);
        let id = list.tasks()[0].id.clone();
        list.toggle_complete(&id).unwrap();
        assert!(list.get(&id).unwrap().completed);
        let event = list.toggle_complete(&id).unwrap();
        assert!(!list.get(&id).unwrap().completed);
        assert!(matches!(event, Event::TaskToggled { completed: false, .. }));
    }

    #[test]
    fn delete_removes_without_trace() {
        let mut list = list_of(&["a", "b"]);
        let id = list.tasks()[0].id.clone();
        list.delete(&id).unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.get(&id).is_none());
        assert_eq!(
            list.delete(&id).unwrap_err(),
            TaskError::NotFound(id.clone())
        );
    }

    #[test]
    fn failed_reorder_leaves_list_unmodified() {
        let mut list = list_of(&["a", "b", "c"]);
        let before = list.clone();
        assert!(list.reorder(0, 3).is_err());
        assert_eq!(list, before);
    }

    #[test]
    fn reorder_by_id_moves_onto_target_slot() {
        let mut list = list_of(&["A", "B", "C", "D"]);
        let a = list.tasks()[0].id.clone();
        let d = list.tasks()[3].id.clone();
        let event = list.reorder_by_id(&a, &d).unwrap();
        assert!(event.is_some());
        let titles: Vec<_> = list.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C", "D", "A"]);
        assert_eq!(list.get(&a).unwrap().priority, Priority::LOW);
    }

    #[test]
    fn reorder_by_id_on_itself_is_noop() {
        let mut list = list_of(&["A", "B"]);
        let before = list.clone();
        let a = list.tasks()[0].id.clone();
        assert!(list.reorder_by_id(&a, &a).unwrap().is_none());
        assert_eq!(list, before);
    }

    #[test]
    fn reorder_by_unknown_id_fails() {
        let mut list = list_of(&["A"]);
        let a = list.tasks()[0].id.clone();
        let err = list.reorder_by_id(&a, "missing").unwrap_err();
        assert!(matches!(err, CoreError::Task(TaskError::NotFound(_))));
    }

    #[test]
    fn overdue_requires_open_task_with_past_date() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let mut task = Task::new("x").with_due_date(Some(yesterday));
        assert!(task.is_overdue(today));
        task.completed = true;
        assert!(!task.is_overdue(today));
        assert!(!Task::new("y").with_due_date(Some(today)).is_overdue(today));
    }
}
