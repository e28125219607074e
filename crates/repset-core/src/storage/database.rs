//! SQLite-based persistence.
//!
//! Stores:
//! - Completed workout sessions (one row per completion)
//! - Saved workout definitions (JSON documents)
//! - A key-value table holding the persisted session engine
//!
//! A completion is written once; a failed insert is reported to the user
//! and not retried or queued.

use chrono::{DateTime, Utc};
use indoc::indoc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::DatabaseError;
use crate::session::CompletionRecord;
use crate::workout::Workout;

/// One stored completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRow {
    pub id: i64,
    pub title: String,
    pub workout_type: String,
    pub duration_min: u32,
    pub calories: u32,
    pub completed_at: DateTime<Utc>,
}

/// Aggregated completion statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    pub total_workouts: u64,
    pub total_minutes: u64,
    pub total_calories: u64,
}

/// SQLite database for completions, saved workouts, and engine state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/repset/repset.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?
            .join("repset.db");
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open a database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at<P: AsRef<std::path::Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(indoc! {"
                CREATE TABLE IF NOT EXISTS completions (
                    id           INTEGER PRIMARY KEY AUTOINCREMENT,
                    title        TEXT NOT NULL,
                    workout_type TEXT NOT NULL DEFAULT '',
                    duration_min INTEGER NOT NULL,
                    calories     INTEGER NOT NULL,
                    completed_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS workouts (
                    id         TEXT PRIMARY KEY,
                    title      TEXT NOT NULL,
                    document   TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_completions_completed_at
                    ON completions(completed_at);
            "})
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    // ── Completions ──────────────────────────────────────────────────

    /// Record a completed session.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_completion(
        &self,
        record: &CompletionRecord,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO completions (title, workout_type, duration_min, calories, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.title,
                record.workout_type,
                record.duration_min,
                record.calories,
                completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent completions, newest first.
    pub fn recent_completions(&self, limit: u32) -> Result<Vec<CompletionRow>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, workout_type, duration_min, calories, completed_at
             FROM completions ORDER BY completed_at DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, u32>(3)?,
                row.get::<_, u32>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, title, workout_type, duration_min, calories, completed_at) = row?;
            let completed_at = DateTime::parse_from_rfc3339(&completed_at)
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
                .with_timezone(&Utc);
            out.push(CompletionRow {
                id,
                title,
                workout_type,
                duration_min,
                calories,
                completed_at,
            });
        }
        Ok(out)
    }

    pub fn stats_today(&self) -> Result<Stats, DatabaseError> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        self.stats_where(
            "WHERE completed_at >= ?1",
            params![format!("{today}T00:00:00+00:00")],
        )
    }

    pub fn stats_all(&self) -> Result<Stats, DatabaseError> {
        self.stats_where("", params![])
    }

    fn stats_where(
        &self,
        clause: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Stats, DatabaseError> {
        let sql = format!(
            "SELECT COUNT(*), COALESCE(SUM(duration_min), 0), COALESCE(SUM(calories), 0)
             FROM completions {clause}"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let stats = stmt.query_row(params, |row| {
            Ok(Stats {
                total_workouts: row.get(0)?,
                total_minutes: row.get(1)?,
                total_calories: row.get(2)?,
            })
        })?;
        Ok(stats)
    }

    // ── Saved workouts ───────────────────────────────────────────────

    /// Store (or replace) a workout definition.
    ///
    /// # Errors
    /// Returns an error if serialization or the insert fails.
    pub fn save_workout(&self, workout: &Workout) -> Result<(), DatabaseError> {
        let document = serde_json::to_string(workout)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO workouts (id, title, document, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![workout.id, workout.title, document, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Load a saved workout by id.
    pub fn load_workout(&self, id: &str) -> Result<Option<Workout>, DatabaseError> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT document FROM workouts WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        match document {
            Some(doc) => serde_json::from_str(&doc)
                .map(Some)
                .map_err(|e| DatabaseError::QueryFailed(e.to_string())),
            None => Ok(None),
        }
    }

    /// Saved workout ids and titles, newest first.
    pub fn list_workouts(&self) -> Result<Vec<(String, String)>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title FROM workouts ORDER BY created_at DESC")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Delete a saved workout. Returns whether a row was removed.
    pub fn delete_workout(&self, id: &str) -> Result<bool, DatabaseError> {
        let n = self
            .conn
            .execute("DELETE FROM workouts WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }

    // ── Key-value store ──────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}
