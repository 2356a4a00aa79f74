//! Natural-language quick-add.
//!
//! Pulls a priority tag (`p1`..`p3`) and a relative date keyword
//! (`today`, `tomorrow`) out of free-form text:
//!
//! ```text
//! "Review budget p1 tomorrow"  ->  title "Review budget", P1, due today+1
//! ```
//!
//! Matching is case-insensitive and only the first occurrence of a matched
//! tag or keyword is removed. Without a tag the task gets the lowest tier.

use chrono::{Days, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::{Priority, Task};
use crate::error::QuickAddError;

/// Tags are checked in this order; the first hit wins.
static PRIORITY_TAGS: LazyLock<Vec<(Regex, Priority)>> = LazyLock::new(|| {
    [("1", Priority::URGENT), ("2", Priority::HIGH), ("3", Priority::MEDIUM)]
        .into_iter()
        .map(|(n, p)| (Regex::new(&format!("(?i) p{n}")).expect("static regex"), p))
        .collect()
});

static TODAY: LazyLock<Regex> = LazyLock::new(|| Regex::new("(?i)today").expect("static regex"));
static TOMORROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(?i)tomorrow").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAdd {
    pub title: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl QuickAdd {
    pub fn into_task(self) -> Task {
        Task::new(self.title)
            .with_priority(self.priority)
            .with_due_date(self.due_date)
    }
}

/// Parse `input` relative to `today`.
pub fn parse_quick_add(input: &str, today: NaiveDate) -> Result<QuickAdd, QuickAddError> {
    let mut text = input.to_string();

    let mut priority = Priority::LOW;
    for (tag, tier) in PRIORITY_TAGS.iter() {
        if tag.is_match(&text) {
            priority = *tier;
            text = tag.replace(&text, "").into_owned();
            break;
        }
    }

    let mut due_date = None;
    if TODAY.is_match(&text) {
        due_date = Some(today);
        text = TODAY.replace(&text, "").into_owned();
    } else if TOMORROW.is_match(&text) {
        due_date = today.checked_add_days(Days::new(1));
        text = TOMORROW.replace(&text, "").into_owned();
    }

    let title = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() {
        return Err(QuickAddError::EmptyTitle);
    }

    Ok(QuickAdd {
        title,
        priority,
        due_date,
    })
}
