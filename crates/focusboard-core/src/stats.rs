//! Small derived numbers for dashboard tiles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::Task;
use crate::timer::FocusTimer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusStats {
    pub sessions_completed: u32,
    pub target_sessions: u32,
    /// Completed sessions times the configured focus length.
    pub focus_minutes: u64,
    /// 0.0 .. 100.0, capped.
    pub target_progress_pct: f64,
    pub avg_minutes_per_session: f64,
}

impl FocusStats {
    pub fn from_timer(timer: &FocusTimer, target_sessions: u32) -> Self {
        let sessions = timer.sessions_completed_today();
        let focus_minutes = u64::from(sessions) * timer.focus_duration_secs() / 60;
        let target_progress_pct = if target_sessions == 0 {
            0.0
        } else {
            (f64::from(sessions) / f64::from(target_sessions) * 100.0).min(100.0)
        };
        let avg_minutes_per_session = if sessions == 0 {
            0.0
        } else {
            focus_minutes as f64 / f64::from(sessions)
        };
        Self {
            sessions_completed: sessions,
            target_sessions,
            focus_minutes,
            target_progress_pct,
            avg_minutes_per_session,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub due_today: usize,
    pub overdue: usize,
    pub completion_rate_pct: f64,
}

impl TaskStats {
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let due_today = tasks
            .iter()
            .filter(|t| !t.completed && t.due_date == Some(today))
            .count();
        let overdue = tasks.iter().filter(|t| t.is_overdue(today)).count();
        let completion_rate_pct = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        Self {
            total,
            completed,
            due_today,
            overdue,
            completion_rate_pct,
        }
    }
}

/// Monthly budget line for one spending category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub name: String,
    pub budget: f64,
    #[serde(default)]
    pub spent: f64,
}

impl BudgetCategory {
    pub fn new(name: impl Into<String>, budget: f64, spent: f64) -> Self {
        Self {
            name: name.into(),
            budget,
            spent,
        }
    }

    /// Percent of this category's budget spent; 0 for a zero budget.
    pub fn used_pct(&self) -> f64 {
        if self.budget <= 0.0 {
            return 0.0;
        }
        self.spent / self.budget * 100.0
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budget
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub total_budget: f64,
    pub total_spent: f64,
    /// Total spent over total budget, uncapped; 0 with no budget.
    pub budget_used_pct: f64,
    pub over_budget: Vec<String>,
}

impl FinanceSummary {
    pub fn compute(categories: &[BudgetCategory]) -> Self {
        let total_budget: f64 = categories.iter().map(|c| c.budget).sum();
        let total_spent: f64 = categories.iter().map(|c| c.spent).sum();
        let budget_used_pct = if total_budget <= 0.0 {
            0.0
        } else {
            total_spent / total_budget * 100.0
        };
        Self {
            total_budget,
            total_spent,
            budget_used_pct,
            over_budget: categories
                .iter()
                .filter(|c| c.is_over_budget())
                .map(|c| c.name.clone())
                .collect(),
        }
    }
}
