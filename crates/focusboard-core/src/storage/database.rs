//! SQLite-backed persistence.
//!
//! Provides persistent storage for:
//! - The ordered task list (position column), habits and notes
//! - A key-value store for serialized state (timer, dashboard layout)
//! - A log of completed focus sessions
//!
//! The reorder engine and timer never touch this; adapters load state,
//! run the pure transitions, and save the result.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{data_dir, migrations};
use crate::error::{CoreError, DatabaseError};
use crate::habit::{Habit, HabitTracker};
use crate::notes::{parse_tags, Note, Notes};
use crate::task::{Priority, Task, TaskList};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Focus sessions completed on one calendar day (UTC).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusDay {
    pub date: String,
    pub sessions: u64,
    pub focus_minutes: u64,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open `<data dir>/focusboard.db`, creating and migrating as needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("focusboard.db");
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for tests and dry runs).
    pub fn open_memory() -> Result<Self, CoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, CoreError> {
        migrations::migrate(&conn)?;
        Ok(Self { conn })
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Replace the stored list with `list`, positions taken from its order.
    pub fn save_tasks(&self, list: &TaskList) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM tasks", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tasks (id, position, title, completed, priority, due_date, project, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for (position, task) in list.tasks().iter().enumerate() {
                stmt.execute(params![
                    task.id,
                    position as i64,
                    task.title,
                    task.completed,
                    task.priority.get(),
                    task.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
                    task.project,
                    task.created_at.to_rfc3339(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn load_tasks(&self) -> Result<TaskList, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, completed, priority, due_date, project, created_at
             FROM tasks
             ORDER BY position ASC",
        )?;
        let tasks = stmt
            .query_map([], |row| {
                let priority: u8 = row.get(3)?;
                let priority = Priority::try_from(priority).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, e.into())
                })?;
                let due_date = row
                    .get::<_, Option<String>>(4)?
                    .map(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT))
                    .transpose()
                    .map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
                    })?;
                Ok(Task {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    completed: row.get(2)?,
                    priority,
                    due_date,
                    project: row.get(5)?,
                    created_at: parse_datetime_fallback(&row.get::<_, String>(6)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TaskList::from_tasks(tasks))
    }

    // ── Habits ───────────────────────────────────────────────────────

    pub fn save_habits(&self, tracker: &HabitTracker) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM habits", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO habits (id, position, name, completed, streak, target, current)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (position, habit) in tracker.habits().iter().enumerate() {
                stmt.execute(params![
                    habit.id,
                    position as i64,
                    habit.name,
                    habit.completed,
                    habit.streak,
                    habit.target,
                    habit.current,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn load_habits(&self) -> Result<HabitTracker, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, completed, streak, target, current
             FROM habits
             ORDER BY position ASC",
        )?;
        let habits = stmt
            .query_map([], |row| {
                Ok(Habit {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    completed: row.get(2)?,
                    streak: row.get(3)?,
                    target: row.get(4)?,
                    current: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(HabitTracker::new(habits))
    }

    // ── Notes ────────────────────────────────────────────────────────

    pub fn save_notes(&self, notes: &Notes) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM notes", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO notes (id, position, title, content, tags, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (position, note) in notes.notes().iter().enumerate() {
                stmt.execute(params![
                    note.id,
                    position as i64,
                    note.title,
                    note.content,
                    note.tags.join(","),
                    note.created_at.to_rfc3339(),
                    note.updated_at.to_rfc3339(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn load_notes(&self) -> Result<Notes, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, tags, created_at, updated_at
             FROM notes
             ORDER BY position ASC",
        )?;
        let notes = stmt
            .query_map([], |row| {
                Ok(Note {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    content: row.get(2)?,
                    tags: parse_tags(&row.get::<_, String>(3)?),
                    created_at: parse_datetime_fallback(&row.get::<_, String>(4)?),
                    updated_at: parse_datetime_fallback(&row.get::<_, String>(5)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Notes::new(notes))
    }

    // ── Focus sessions ───────────────────────────────────────────────

    pub fn record_focus_session(
        &self,
        duration_secs: u64,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO focus_sessions (duration_secs, completed_at) VALUES (?1, ?2)",
            params![duration_secs as i64, completed_at.to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn focus_day(&self, date: NaiveDate) -> Result<FocusDay, DatabaseError> {
        let day = date.format(DATE_FORMAT).to_string();
        let (sessions, secs) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(duration_secs), 0)
             FROM focus_sessions
             WHERE substr(completed_at, 1, 10) = ?1",
            params![day],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
        )?;
        Ok(FocusDay {
            date: day,
            sessions: sessions.max(0) as u64,
            focus_minutes: secs.max(0) as u64 / 60,
        })
    }

    // ── Key-value ────────────────────────────────────────────────────

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        Ok(self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CoreError> {
        match self.kv_get(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn kv_set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        let json = serde_json::to_string(value)?;
        self.kv_set(key, &json)?;
        Ok(())
    }
}

/// Parse datetime from RFC3339 string with fallback to current time
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::FocusTimer;

    #[test]
    fn tasks_roundtrip_in_order() {
        let db = Database::open_memory().unwrap();
        let mut list = TaskList::new();
        list.add(Task::new("third"));
        list.add(
            Task::new("second")
                .with_due_date(NaiveDate::from_ymd_opt(2024, 2, 29))
                .with_project(Some("work".into())),
        );
        list.add(Task::new("first"));
        list.reorder(0, 2).unwrap();

        db.save_tasks(&list).unwrap();
        let loaded = db.load_tasks().unwrap();
        let titles: Vec<_> = loaded.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "third", "first"]);
        let second = &loaded.tasks()[0];
        assert_eq!(second.due_date, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(second.project.as_deref(), Some("work"));
        let priorities: Vec<_> = loaded.tasks().iter().map(|t| t.priority.get()).collect();
        assert_eq!(priorities, vec![1, 2, 3]);
    }

    #[test]
    fn saving_replaces_deleted_tasks() {
        let db = Database::open_memory().unwrap();
        let mut list = TaskList::new();
        list.add(Task::new("a"));
        db.save_tasks(&list).unwrap();
        let id = list.tasks()[0].id.clone();
        list.delete(&id).unwrap();
        db.save_tasks(&list).unwrap();
        assert!(db.load_tasks().unwrap().is_empty());
    }

    fn insert_raw_task(db: &Database, priority: i64, due_date: &str) {
        db.conn()
            .execute(
                "INSERT INTO tasks (id, position, title, completed, priority, due_date, project, created_at)
                 VALUES ('t1', 0, 'raw', 0, ?1, ?2, NULL, '2024-01-01T00:00:00+00:00')",
                params![priority, due_date],
            )
            .unwrap();
    }

    #[test]
    fn out_of_range_priority_is_reported() {
        let db = Database::open_memory().unwrap();
        insert_raw_task(&db, 9, "2024-01-02");
        assert!(matches!(
            db.load_tasks(),
            Err(DatabaseError::QueryFailed(_))
        ));
    }

    #[test]
    fn unparseable_due_date_is_reported() {
        let db = Database::open_memory().unwrap();
        insert_raw_task(&db, 2, "next week");
        assert!(db.load_tasks().is_err());
    }

    #[test]
    fn valid_raw_row_loads() {
        let db = Database::open_memory().unwrap();
        insert_raw_task(&db, 2, "2024-01-02");
        let list = db.load_tasks().unwrap();
        assert_eq!(list.tasks()[0].priority, Priority::HIGH);
        assert_eq!(list.tasks()[0].due_date, NaiveDate::from_ymd_opt(2024, 1, 2));
    }

    #[test]
    fn habits_roundtrip() {
        let db = Database::open_memory().unwrap();
        let mut tracker = HabitTracker::default();
        tracker.add(Habit::new("Read", 30));
        tracker.add(Habit::new("Stretch", 1));
        let id = tracker.habits()[1].id.clone();
        tracker.toggle(&id).unwrap();
        db.save_habits(&tracker).unwrap();
        assert_eq!(db.load_habits().unwrap(), tracker);
    }

    #[test]
    fn notes_roundtrip_newest_first() {
        let db = Database::open_memory().unwrap();
        let mut notes = Notes::default();
        notes.add("Older", "body", "work, meeting").unwrap();
        notes.add("Newer", "", "").unwrap();
        db.save_notes(&notes).unwrap();

        let loaded = db.load_notes().unwrap();
        assert_eq!(loaded, notes);
        assert_eq!(loaded.notes()[0].title, "Newer");
        assert_eq!(loaded.notes()[1].tags, vec!["work", "meeting"]);

        notes.delete(&notes.notes()[0].id.clone()).unwrap();
        db.save_notes(&notes).unwrap();
        assert_eq!(db.load_notes().unwrap().len(), 1);
    }

    #[test]
    fn focus_sessions_grouped_by_day() {
        let db = Database::open_memory().unwrap();
        let at = DateTime::parse_from_rfc3339("2024-04-02T09:30:00+00:00")
            .unwrap()
            .with_timezone(&Utc);
        db.record_focus_session(1500, at).unwrap();
        db.record_focus_session(1500, at).unwrap();
        let day = db
            .focus_day(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap())
            .unwrap();
        assert_eq!(day.sessions, 2);
        assert_eq!(day.focus_minutes, 50);
        let other = db
            .focus_day(NaiveDate::from_ymd_opt(2024, 4, 3).unwrap())
            .unwrap();
        assert_eq!(other.sessions, 0);
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }

    #[test]
    fn kv_json_roundtrip_for_timer() {
        let db = Database::open_memory().unwrap();
        let mut timer = FocusTimer::new(60, 10).unwrap();
        timer.start();
        timer.tick();
        timer.pause();
        db.kv_set_json("timer", &timer).unwrap();
        let loaded: FocusTimer = db.kv_get_json("timer").unwrap().unwrap();
        assert_eq!(loaded, timer);
        assert!(db.kv_get_json::<FocusTimer>("missing").unwrap().is_none());
    }

    #[test]
    fn open_at_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.kv_set("k", "v").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.kv_get("k").unwrap().as_deref(), Some("v"));
    }
}
