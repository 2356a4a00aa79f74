//! Filtered, sorted views over a task list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use super::Task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "view", content = "name")]
pub enum TaskView {
    /// Every open task.
    Inbox,
    /// Open tasks due today.
    Today,
    /// Open tasks due after today.
    Upcoming,
    /// Tasks in a project, done or not.
    Project(String),
}

impl TaskView {
    pub fn includes(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            TaskView::Inbox => !task.completed,
            TaskView::Today => !task.completed && task.due_date == Some(today),
            TaskView::Upcoming => !task.completed && task.due_date.is_some_and(|d| d > today),
            TaskView::Project(name) => task.project.as_deref() == Some(name.as_str()),
        }
    }

    pub fn title(&self) -> String {
        match self {
            TaskView::Inbox => "Inbox".into(),
            TaskView::Today => "Today".into(),
            TaskView::Upcoming => "Upcoming".into(),
            TaskView::Project(name) => format!("Project: {name}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSort {
    /// Most urgent tier first.
    #[default]
    Priority,
    /// Earliest due date first; undated tasks last.
    DueDate,
    /// Newest first.
    Created,
}

impl TaskSort {
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            TaskSort::Priority => a.priority.cmp(&b.priority),
            TaskSort::DueDate => match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            TaskSort::Created => b.created_at.cmp(&a.created_at),
        }
    }
}

impl FromStr for TaskSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priority" => Ok(TaskSort::Priority),
            "due_date" | "due" => Ok(TaskSort::DueDate),
            "created" => Ok(TaskSort::Created),
            other => Err(format!("unknown sort: {other}")),
        }
    }
}

/// Stable: ties keep list order.
pub(crate) fn select<'a>(
    tasks: &'a [Task],
    view: &TaskView,
    sort: TaskSort,
    today: NaiveDate,
) -> Vec<&'a Task> {
    let mut selected: Vec<&Task> = tasks.iter().filter(|t| view.includes(t, today)).collect();
    selected.sort_by(|a, b| sort.compare(a, b));
    selected
}
