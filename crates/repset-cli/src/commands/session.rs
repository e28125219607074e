use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde::{Deserialize, Serialize};

use repset_core::storage::Database;
use repset_core::workout::{find_builtin, RawWorkout, Workout};
use repset_core::{Config, Event, WorkoutSession};

const SESSION_KEY: &str = "workout_session";

#[derive(Subcommand)]
pub enum SessionAction {
    /// Start a new session
    Start {
        /// Built-in workout ID
        #[arg(long, default_value = "starter-hiit")]
        builtin: String,
        /// Saved workout ID (overrides --builtin)
        #[arg(long)]
        saved: Option<String>,
        /// Raw workout JSON file (overrides --saved and --builtin)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Catch the timer up and print the current state as JSON
    Status,
    /// Resume (or first-start) the timer
    Resume,
    /// Pause the timer
    Pause,
    /// Skip the current phase (rest or work)
    Skip,
    /// Skip past the current exercise
    Next,
    /// Mark the current exercise complete
    Complete,
    /// Jump to a pack item
    Select {
        /// Zero-based pack item index
        index: usize,
    },
    /// Force-complete the session
    Finish,
    /// Cancel and discard the session
    Cancel,
}

/// Session engine plus the wall-clock instant it was persisted, so the
/// next invocation can catch the timer up.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    session: WorkoutSession,
    saved_at: DateTime<Utc>,
}

fn load_session(db: &Database) -> Result<Option<WorkoutSession>, Box<dyn std::error::Error>> {
    let Some(json) = db.kv_get(SESSION_KEY)? else {
        return Ok(None);
    };
    let stored: StoredSession = serde_json::from_str(&json)?;
    let mut session = stored.session;

    // Catch up against wall-clock time. tick_many stops at the first
    // transition that pauses the session, so a long-abandoned timer does
    // not burn through later exercises.
    let behind = (Utc::now() - stored.saved_at).num_seconds().max(0) as u64;
    for event in session.tick_many(behind) {
        report(db, &event)?;
    }
    Ok(Some(session))
}

fn save_session(db: &Database, session: &WorkoutSession) -> Result<(), Box<dyn std::error::Error>> {
    if session.is_over() {
        db.kv_delete(SESSION_KEY)?;
        return Ok(());
    }
    let stored = StoredSession {
        session: session.clone(),
        saved_at: Utc::now(),
    };
    db.kv_set(SESSION_KEY, &serde_json::to_string(&stored)?)?;
    Ok(())
}

/// Print an event; on completion, persist the record. A failed insert is
/// reported once and the record is not retried or queued.
fn report(db: &Database, event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    if let Event::SessionCompleted { record, .. } = event {
        if let Err(e) = db.record_completion(record, Utc::now()) {
            eprintln!("error: failed to save completed workout: {e}");
        }
    }
    Ok(())
}

fn require_session(db: &Database) -> Result<WorkoutSession, Box<dyn std::error::Error>> {
    load_session(db)?.ok_or_else(|| "no session in progress (run `session start`)".into())
}

fn load_workout(
    builtin: String,
    saved: Option<String>,
    file: Option<PathBuf>,
    db: &Database,
) -> Result<Workout, Box<dyn std::error::Error>> {
    if let Some(path) = file {
        let raw: RawWorkout = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        let defaults = Config::load_or_default().defaults;
        return Ok(Workout::from_raw_with_defaults(
            raw,
            defaults.planned_duration_min,
            defaults.calorie_budget,
        )?);
    }
    if let Some(id) = saved {
        return db
            .load_workout(&id)?
            .ok_or_else(|| format!("no saved workout with id '{id}'").into());
    }
    find_builtin(&builtin).ok_or_else(|| format!("no built-in workout with id '{builtin}'").into())
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        SessionAction::Start { builtin, saved, file } => {
            if db.kv_get(SESSION_KEY)?.is_some() {
                return Err("a session is already in progress (cancel it first)".into());
            }
            let workout = load_workout(builtin, saved, file, &db)?;
            let session = WorkoutSession::new(workout)?;
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            save_session(&db, &session)?;
        }
        SessionAction::Status => {
            let session = require_session(&db)?;
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            save_session(&db, &session)?;
        }
        SessionAction::Resume => {
            let mut session = require_session(&db)?;
            if let Some(event) = session.resume() {
                report(&db, &event)?;
            }
            save_session(&db, &session)?;
        }
        SessionAction::Pause => {
            let mut session = require_session(&db)?;
            if let Some(event) = session.pause() {
                report(&db, &event)?;
            }
            save_session(&db, &session)?;
        }
        SessionAction::Skip => {
            let mut session = require_session(&db)?;
            if let Some(event) = session.skip_phase() {
                report(&db, &event)?;
            }
            save_session(&db, &session)?;
        }
        SessionAction::Next => {
            let mut session = require_session(&db)?;
            if let Some(event) = session.skip_exercise() {
                report(&db, &event)?;
            }
            save_session(&db, &session)?;
        }
        SessionAction::Complete => {
            let mut session = require_session(&db)?;
            if let Some(event) = session.complete_exercise() {
                report(&db, &event)?;
            }
            save_session(&db, &session)?;
        }
        SessionAction::Select { index } => {
            let mut session = require_session(&db)?;
            if let Some(event) = session.select_pack_item(index)? {
                report(&db, &event)?;
            }
            save_session(&db, &session)?;
        }
        SessionAction::Finish => {
            let mut session = require_session(&db)?;
            if let Some(event) = session.complete() {
                report(&db, &event)?;
            }
            save_session(&db, &session)?;
        }
        SessionAction::Cancel => {
            let mut session = require_session(&db)?;
            if let Some(event) = session.cancel() {
                report(&db, &event)?;
            }
            save_session(&db, &session)?;
        }
    }

    Ok(())
}
