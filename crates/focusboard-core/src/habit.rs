//! Daily habit tracking.
//!
//! A habit is either done for today or not. Checking it off fills its
//! counter to the target; unchecking empties it.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::HabitError;
use crate::events::Event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
    /// Consecutive days completed.
    #[serde(default)]
    pub streak: u32,
    /// Units that make up today's goal (glasses, minutes, ...).
    pub target: u32,
    #[serde(default)]
    pub current: u32,
}

impl Habit {
    pub fn new(name: impl Into<String>, target: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            completed: false,
            streak: 0,
            target: target.max(1),
            current: 0,
        }
    }

    /// 0.0 .. 100.0 toward today's target.
    pub fn progress_pct(&self) -> f64 {
        if self.target == 0 {
            return 0.0;
        }
        (self.current as f64 / self.target as f64 * 100.0).min(100.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitSummary {
    pub completed: usize,
    pub total: usize,
    pub completion_rate_pct: f64,
    pub best_streak: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitTracker {
    habits: Vec<Habit>,
}

impl HabitTracker {
    pub fn new(habits: Vec<Habit>) -> Self {
        Self { habits }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn into_habits(self) -> Vec<Habit> {
        self.habits
    }

    pub fn add(&mut self, habit: Habit) {
        self.habits.push(habit);
    }

    pub fn remove(&mut self, id: &str) -> Result<Habit, HabitError> {
        let index = self
            .habits
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| HabitError::NotFound(id.to_string()))?;
        Ok(self.habits.remove(index))
    }

    pub fn toggle(&mut self, id: &str) -> Result<Event, HabitError> {
        let habit = self
            .habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| HabitError::NotFound(id.to_string()))?;
        habit.current = if habit.completed { 0 } else { habit.target };
        habit.completed = !habit.completed;
        Ok(Event::HabitToggled {
            id: habit.id.clone(),
            completed: habit.completed,
            at: Utc::now(),
        })
    }

    pub fn summary(&self) -> HabitSummary {
        let total = self.habits.len();
        let completed = self.habits.iter().filter(|h| h.completed).count();
        let completion_rate_pct = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        HabitSummary {
            completed,
            total,
            completion_rate_pct,
            best_streak: self.habits.iter().map(|h| h.streak).max().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> HabitTracker {
        let mut water = Habit::new("Drink Water", 8);
        water.completed = true;
        water.current = 8;
        water.streak = 12;
        let mut read = Habit::new("Read", 30);
        read.current = 45;
        read.streak = 8;
        HabitTracker::new(vec![water, read, Habit::new("Exercise", 1)])
    }

    #[test]
    fn toggle_fills_and_empties_counter() {
        let mut t = tracker();
        let id = t.habits()[2].id.clone();
        let event = t.toggle(&id).unwrap();
        assert!(matches!(event, Event::HabitToggled { completed: true, .. }));
        assert_eq!(t.habits()[2].current, 1);

        t.toggle(&id).unwrap();
        assert!(!t.habits()[2].completed);
        assert_eq!(t.habits()[2].current, 0);
    }

    #[test]
    fn progress_caps_at_hundred() {
        let t = tracker();
        assert_eq!(t.habits()[1].progress_pct(), 100.0);
        assert_eq!(t.habits()[2].progress_pct(), 0.0);
    }

    #[test]
    fn summary_counts_and_best_streak() {
        let s = tracker().summary();
        assert_eq!(s.completed, 1);
        assert_eq!(s.total, 3);
        assert!((s.completion_rate_pct - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(s.best_streak, 12);
    }

    #[test]
    fn empty_tracker_summary_is_zero() {
        let s = HabitTracker::default().summary();
        assert_eq!(s.completion_rate_pct, 0.0);
        assert_eq!(s.best_streak, 0);
    }

    #[test]
    fn unknown_habit_is_an_error() {
        let mut t = tracker();
        assert_eq!(
            t.toggle("nope").unwrap_err(),
            HabitError::NotFound("nope".into())
        );
        assert!(t.remove("nope").is_err());
    }
}
