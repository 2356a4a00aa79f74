//! Dashboard layout: which widgets show, in what order, and whether each
//! is collapsed. Widgets reorder with the same stable move as tasks, but
//! carry no priority.

mod weather;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReorderError;
use crate::events::Event;
use crate::task::move_item;

pub use weather::{DailyForecast, WeatherReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Tasks,
    Habits,
    Focus,
    Finance,
    Weather,
    Notes,
    Calendar,
    Analytics,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 8] = [
        WidgetKind::Tasks,
        WidgetKind::Focus,
        WidgetKind::Habits,
        WidgetKind::Weather,
        WidgetKind::Calendar,
        WidgetKind::Finance,
        WidgetKind::Notes,
        WidgetKind::Analytics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Tasks => "tasks",
            WidgetKind::Habits => "habits",
            WidgetKind::Focus => "focus",
            WidgetKind::Finance => "finance",
            WidgetKind::Weather => "weather",
            WidgetKind::Notes => "notes",
            WidgetKind::Calendar => "calendar",
            WidgetKind::Analytics => "analytics",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown widget: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSlot {
    pub kind: WidgetKind,
    #[serde(default)]
    pub collapsed: bool,
}

/// Ordered widget slots, each kind at most once. Stored layouts are
/// de-duplicated on load, keeping the first slot of each kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<WidgetSlot>", into = "Vec<WidgetSlot>")]
pub struct DashboardLayout {
    slots: Vec<WidgetSlot>,
}

impl From<Vec<WidgetSlot>> for DashboardLayout {
    fn from(stored: Vec<WidgetSlot>) -> Self {
        let mut slots: Vec<WidgetSlot> = Vec::with_capacity(stored.len());
        for slot in stored {
            if !slots.iter().any(|s| s.kind == slot.kind) {
                slots.push(slot);
            }
        }
        Self { slots }
    }
}

impl From<DashboardLayout> for Vec<WidgetSlot> {
    fn from(layout: DashboardLayout) -> Self {
        layout.slots
    }
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self::from_kinds(&WidgetKind::ALL)
    }
}

impl DashboardLayout {
    /// Expanded slots in the given order; duplicates are dropped.
    pub fn from_kinds(kinds: &[WidgetKind]) -> Self {
        kinds
            .iter()
            .map(|&kind| WidgetSlot {
                kind,
                collapsed: false,
            })
            .collect::<Vec<_>>()
            .into()
    }

    pub fn slots(&self) -> &[WidgetSlot] {
        &self.slots
    }

    pub fn kinds(&self) -> Vec<WidgetKind> {
        self.slots.iter().map(|s| s.kind).collect()
    }

    pub fn move_widget(&mut self, from: usize, to: usize) -> Result<Event, ReorderError> {
        self.slots = move_item(&self.slots, from, to)?;
        Ok(Event::WidgetMoved {
            from,
            to,
            at: Utc::now(),
        })
    }

    /// Returns the new collapsed flag, or `None` if the widget is not shown.
    pub fn toggle_collapsed(&mut self, kind: WidgetKind) -> Option<bool> {
        let slot = self.slots.iter_mut().find(|s| s.kind == kind)?;
        slot.collapsed = !slot.collapsed;
        Some(slot.collapsed)
    }
}
