use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{CompletionRecord, Phase, SessionState};

/// Every state change in a running session produces an Event.
/// A hosting surface subscribes to these instead of reaching into the
/// session; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// First resume of a fresh session.
    SessionStarted {
        workout_title: String,
        total_exercises: usize,
        at: DateTime<Utc>,
    },
    SessionPaused {
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    SessionResumed {
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    /// A new set of the current exercise began (rest finished or was
    /// skipped).
    SetStarted {
        exercise: String,
        set: u32,
        sets: u32,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// The rest phase began.
    RestStarted {
        exercise: String,
        set: u32,
        rest_secs: u32,
        at: DateTime<Utc>,
    },
    /// The timer ran out of sets and moved to the next exercise;
    /// the session is paused awaiting resume.
    ExerciseAdvanced {
        exercise: String,
        exercise_index: usize,
        at: DateTime<Utc>,
    },
    /// The user marked the current exercise complete.
    ExerciseCompleted {
        exercise: String,
        completed_count: usize,
        at: DateTime<Utc>,
    },
    /// The user skipped past the current exercise.
    ExerciseSkipped {
        exercise: String,
        at: DateTime<Utc>,
    },
    /// Moving to the next workout of a pack.
    NextWorkout {
        title: String,
        pack_index: usize,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        record: CompletionRecord,
        at: DateTime<Utc>,
    },
    SessionCancelled {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: SessionState,
        phase: Phase,
        pack_index: usize,
        exercise_index: usize,
        exercise: Option<String>,
        set: u32,
        sets: u32,
        time_left_secs: u32,
        time_left_display: String,
        elapsed_secs: u64,
        elapsed_display: String,
        progress_pct: u32,
        completed_count: usize,
        skipped_count: usize,
        total_exercises: usize,
        live_calories: u32,
        pulse: bool,
        at: DateTime<Utc>,
    },
}
