use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use focusboard_core::storage::Database;
use focusboard_core::{parse_quick_add, Config, Task, TaskSort, TaskView};

use super::{emit, print_json, today, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the front of the list
    Add {
        /// Task title
        title: String,
        /// Parse " p1".." p3", "today" and "tomorrow" out of the title
        #[arg(long)]
        quick: bool,
        /// Project name
        #[arg(long)]
        project: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// List tasks (the full ordered list unless a view is given)
    List {
        #[arg(long, value_enum)]
        view: Option<ViewArg>,
        /// Only tasks in this project
        #[arg(long, conflicts_with = "view")]
        project: Option<String>,
        /// priority, due_date or created (default from config)
        #[arg(long)]
        sort: Option<TaskSort>,
    },
    /// Toggle a task's completed flag
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Move a task by position; priorities follow the new order
    Move {
        from: usize,
        to: usize,
    },
    /// Drop the task `active` onto the slot held by `over`
    MoveId {
        active: String,
        over: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ViewArg {
    Inbox,
    Today,
    Upcoming,
}

impl From<ViewArg> for TaskView {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Inbox => TaskView::Inbox,
            ViewArg::Today => TaskView::Today,
            ViewArg::Upcoming => TaskView::Upcoming,
        }
    }
}

pub fn run(action: TaskAction) -> CmdResult {
    let db = Database::open()?;
    let mut list = db.load_tasks()?;

    match action {
        TaskAction::Add {
            title,
            quick,
            project,
            due,
        } => {
            let task = if quick {
                let parsed = parse_quick_add(&title, today())?;
                let mut task = parsed.into_task();
                if due.is_some() {
                    task.due_date = due;
                }
                task.with_project(project)
            } else {
                Task::new(title).with_due_date(due).with_project(project)
            };
            let event = list.add(task);
            db.save_tasks(&list)?;
            emit(&event)?;
        }
        TaskAction::List {
            view,
            project,
            sort,
        } => {
            let view = match (view, project) {
                (Some(view), _) => Some(TaskView::from(view)),
                (None, Some(name)) => Some(TaskView::Project(name)),
                (None, None) => None,
            };
            match view {
                Some(view) => {
                    let sort = match sort {
                        Some(sort) => sort,
                        None => Config::load()?.tasks.default_sort,
                    };
                    print_json(&list.view(&view, sort, today()))?;
                }
                None => print_json(&list.tasks())?,
            }
        }
        TaskAction::Toggle { id } => {
            let event = list.toggle_complete(&id)?;
            db.save_tasks(&list)?;
            emit(&event)?;
        }
        TaskAction::Delete { id } => {
            let event = list.delete(&id)?;
            db.save_tasks(&list)?;
            emit(&event)?;
        }
        TaskAction::Move { from, to } => {
            let event = list.reorder(from, to)?;
            db.save_tasks(&list)?;
            emit(&event)?;
        }
        TaskAction::MoveId { active, over } => match list.reorder_by_id(&active, &over)? {
            Some(event) => {
                db.save_tasks(&list)?;
                emit(&event)?;
            }
            None => print_json(&list.tasks())?,
        },
    }
    Ok(())
}
