//! Workout session engine.
//!
//! One value owns the whole session: position (pack item, exercise, set),
//! phase, pause state, countdown, elapsed time, and the completed/skipped
//! name sets. Every transition is a method that mutates the value
//! atomically and returns at most one [`Event`] -- there are no
//! independently-observed fields to fall out of sync.
//!
//! The engine never spawns threads. The caller drives it with one
//! [`WorkoutSession::tick`] per second while running; pause, skip, and
//! index changes re-seed the countdown from the new phase's configured
//! duration, so a stale tick can never fire across a transition.
//!
//! ## State transitions
//!
//! ```text
//! Paused <-> Running -> Finished
//!        \-> Cancelled
//! ```

use std::collections::BTreeSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::summary;
use crate::error::WorkoutError;
use crate::events::Event;
use crate::timefmt::format_time;
use crate::workout::{Exercise, Routine, Workout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Paused,
    Running,
    Finished,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Exercising,
    Resting,
}

/// A running workout session.
///
/// Serializable so a host can persist it between ticks (the CLI stores it
/// in the database's key-value table and catches it up on each call).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    workout: Workout,
    pack_index: usize,
    exercise_index: usize,
    current_set: u32,
    phase: Phase,
    state: SessionState,
    /// Seconds remaining in the current phase.
    time_left: u32,
    /// Cumulative seconds since session start; accumulates through rest.
    elapsed_secs: u64,
    /// Exercise names marked done. Keyed by display name, so two
    /// exercises sharing a name are indistinguishable here.
    completed: BTreeSet<String>,
    /// Exercise names advanced past without completion. Disjoint from
    /// `completed`.
    skipped: BTreeSet<String>,
    /// One-tick visual pulse raised when a phase hits zero.
    #[serde(default)]
    pulse: bool,
    #[serde(default)]
    started: bool,
}

impl WorkoutSession {
    /// Create a session over a normalized workout. Starts paused on the
    /// first exercise's active phase.
    pub fn new(workout: Workout) -> Result<Self, WorkoutError> {
        if workout.total_exercises() == 0 {
            return Err(WorkoutError::EmptyExercises(workout.title));
        }
        let mut session = Self {
            workout,
            pack_index: 0,
            exercise_index: 0,
            current_set: 1,
            phase: Phase::Exercising,
            state: SessionState::Paused,
            time_left: 0,
            elapsed_secs: 0,
            completed: BTreeSet::new(),
            skipped: BTreeSet::new(),
            pulse: false,
            started: false,
        };
        session.reseed();
        Ok(session)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pack_index(&self) -> usize {
        self.pack_index
    }

    pub fn exercise_index(&self) -> usize {
        self.exercise_index
    }

    pub fn current_set(&self) -> u32 {
        self.current_set
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn workout(&self) -> &Workout {
        &self.workout
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, SessionState::Finished | SessionState::Cancelled)
    }

    /// Exercise list of the active pack item (or the plain list).
    pub fn active_exercises(&self) -> &[Exercise] {
        match &self.workout.routine {
            Routine::Single { exercises } => exercises,
            Routine::Pack { items } => items
                .get(self.pack_index)
                .map(|i| i.exercises.as_slice())
                .unwrap_or(&[]),
        }
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.active_exercises().get(self.exercise_index)
    }

    pub fn total_exercises(&self) -> usize {
        self.workout.total_exercises()
    }

    /// Distinct exercise names ever marked complete, across all pack items.
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn completed_names(&self) -> impl Iterator<Item = &str> {
        self.completed.iter().map(String::as_str)
    }

    pub fn skipped_names(&self) -> impl Iterator<Item = &str> {
        self.skipped.iter().map(String::as_str)
    }

    pub fn is_completed(&self, name: &str) -> bool {
        self.completed.contains(name)
    }

    /// Whole-percent completion across the full pack.
    pub fn progress_pct(&self) -> u32 {
        let total = self.total_exercises().max(1);
        ((self.completed.len() as f64 / total as f64) * 100.0).round() as u32
    }

    /// Live calorie estimate for the elapsed time so far.
    pub fn live_calories(&self) -> u32 {
        summary::live_estimate(
            self.elapsed_secs,
            self.workout.calorie_budget,
            self.workout.planned_duration_min,
        )
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let exercise = self.current_exercise();
        Event::StateSnapshot {
            state: self.state,
            phase: self.phase,
            pack_index: self.pack_index,
            exercise_index: self.exercise_index,
            exercise: exercise.map(|e| e.name.clone()),
            set: self.current_set,
            sets: exercise.map(|e| e.sets).unwrap_or(0),
            time_left_secs: self.time_left,
            time_left_display: format_time(self.time_left as f64),
            elapsed_secs: self.elapsed_secs,
            elapsed_display: format_time(self.elapsed_secs as f64),
            progress_pct: self.progress_pct(),
            completed_count: self.completed.len(),
            skipped_count: self.skipped.len(),
            total_exercises: self.total_exercises(),
            live_calories: self.live_calories(),
            pulse: self.pulse,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// One-second tick. Only advances while running; returns the
    /// transition event when the countdown crosses zero.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        self.pulse = false;

        if self.time_left > 0 {
            self.time_left -= 1;
            self.elapsed_secs += 1;
            if self.time_left > 0 {
                return None;
            }
        }

        // Countdown hit zero: flag the pulse and run the progression.
        self.pulse = true;
        self.phase_expired()
    }

    /// Drive up to `n` ticks, stopping early if the session pauses or
    /// ends. Used by hosts catching the timer up against wall-clock time.
    pub fn tick_many(&mut self, n: u64) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..n {
            if self.state != SessionState::Running {
                break;
            }
            if let Some(event) = self.tick() {
                events.push(event);
            }
        }
        events
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        self.state = SessionState::Paused;
        Some(Event::SessionPaused {
            time_left_secs: self.time_left,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state != SessionState::Paused {
            return None;
        }
        self.state = SessionState::Running;
        if !self.started {
            self.started = true;
            return Some(Event::SessionStarted {
                workout_title: self.workout.title.clone(),
                total_exercises: self.total_exercises(),
                at: Utc::now(),
            });
        }
        Some(Event::SessionResumed {
            time_left_secs: self.time_left,
            at: Utc::now(),
        })
    }

    /// Play/pause toggle. Alters only the running flag.
    pub fn toggle(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Running => self.pause(),
            SessionState::Paused => self.resume(),
            _ => None,
        }
    }

    /// Skip the current phase: out of rest back into the exercise, or out
    /// of the exercise into rest (advancing the set counter), or -- on the
    /// final set -- past the exercise entirely.
    pub fn skip_phase(&mut self) -> Option<Event> {
        if self.is_over() {
            return None;
        }
        let exercise = self.current_exercise()?;
        let (name, sets, duration, rest_time) = (
            exercise.name.clone(),
            exercise.sets,
            exercise.duration,
            exercise.rest_time,
        );

        match self.phase {
            Phase::Resting => {
                self.phase = Phase::Exercising;
                self.time_left = duration;
                Some(Event::SetStarted {
                    exercise: name,
                    set: self.current_set,
                    sets,
                    duration_secs: duration,
                    at: Utc::now(),
                })
            }
            Phase::Exercising if self.current_set < sets => {
                self.phase = Phase::Resting;
                self.time_left = rest_time;
                self.current_set += 1;
                Some(Event::RestStarted {
                    exercise: name,
                    set: self.current_set,
                    rest_secs: rest_time,
                    at: Utc::now(),
                })
            }
            Phase::Exercising => self.skip_exercise(),
        }
    }

    /// Skip past the current exercise. Marks it skipped unless it was
    /// already completed.
    pub fn skip_exercise(&mut self) -> Option<Event> {
        if self.is_over() {
            return None;
        }
        let name = self.current_exercise()?.name.clone();
        match self.advance(true)? {
            Event::ExerciseAdvanced { .. } => Some(Event::ExerciseSkipped {
                exercise: name,
                at: Utc::now(),
            }),
            other => Some(other),
        }
    }

    /// Mark the current exercise complete (idempotent per name), then
    /// advance. Never marks as skipped; un-skips a previously skipped name.
    pub fn complete_exercise(&mut self) -> Option<Event> {
        if self.is_over() {
            return None;
        }
        let name = self.current_exercise()?.name.clone();
        self.completed.insert(name.clone());
        self.skipped.remove(&name);

        match self.advance(false)? {
            Event::ExerciseAdvanced { .. } => Some(Event::ExerciseCompleted {
                exercise: name,
                completed_count: self.completed.len(),
                at: Utc::now(),
            }),
            other => Some(other),
        }
    }

    /// Jump to a pack item. Resets position and pauses.
    pub fn select_pack_item(&mut self, index: usize) -> Result<Option<Event>, WorkoutError> {
        let items = match &self.workout.routine {
            Routine::Pack { items } => items,
            Routine::Single { .. } => {
                return Err(WorkoutError::OutOfBounds {
                    collection: "pack items".to_string(),
                    index,
                    len: 1,
                })
            }
        };
        if index >= items.len() {
            return Err(WorkoutError::OutOfBounds {
                collection: "pack items".to_string(),
                index,
                len: items.len(),
            });
        }
        if self.is_over() || index == self.pack_index {
            return Ok(None);
        }

        let title = items[index].title.clone();
        self.pack_index = index;
        self.exercise_index = 0;
        self.current_set = 1;
        self.phase = Phase::Exercising;
        self.state = SessionState::Paused;
        self.reseed();
        Ok(Some(Event::NextWorkout {
            title,
            pack_index: index,
            at: Utc::now(),
        }))
    }

    /// Force-complete the session from wherever it is.
    pub fn complete(&mut self) -> Option<Event> {
        if self.is_over() {
            return None;
        }
        self.finish()
    }

    /// Cancel: halt and discard without summarizing.
    pub fn cancel(&mut self) -> Option<Event> {
        if self.is_over() {
            return None;
        }
        self.state = SessionState::Cancelled;
        Some(Event::SessionCancelled { at: Utc::now() })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Progression on a countdown reaching zero.
    fn phase_expired(&mut self) -> Option<Event> {
        let exercise = self.current_exercise()?;
        let (name, sets, duration, rest_time) = (
            exercise.name.clone(),
            exercise.sets,
            exercise.duration,
            exercise.rest_time,
        );

        match self.phase {
            Phase::Resting if self.current_set < sets => {
                self.phase = Phase::Exercising;
                self.current_set += 1;
                self.time_left = duration;
                Some(Event::SetStarted {
                    exercise: name,
                    set: self.current_set,
                    sets,
                    duration_secs: duration,
                    at: Utc::now(),
                })
            }
            Phase::Exercising if self.current_set < sets => {
                self.phase = Phase::Resting;
                self.time_left = rest_time;
                Some(Event::RestStarted {
                    exercise: name,
                    set: self.current_set,
                    rest_secs: rest_time,
                    at: Utc::now(),
                })
            }
            // Last set ran out in either phase: move on.
            _ => self.advance(true),
        }
    }

    /// Advance to the next exercise, pack item, or completion.
    fn advance(&mut self, mark_skipped: bool) -> Option<Event> {
        if let Some(exercise) = self.current_exercise() {
            let name = exercise.name.clone();
            if mark_skipped && !self.completed.contains(&name) {
                self.skipped.insert(name);
            }
        }

        let list_len = self.active_exercises().len();
        if self.exercise_index + 1 < list_len {
            self.exercise_index += 1;
            self.rewind_to_exercise_start();
            let next = self.current_exercise()?;
            return Some(Event::ExerciseAdvanced {
                exercise: next.name.clone(),
                exercise_index: self.exercise_index,
                at: Utc::now(),
            });
        }

        if let Routine::Pack { items } = &self.workout.routine {
            if self.pack_index + 1 < items.len() {
                let title = items[self.pack_index + 1].title.clone();
                self.pack_index += 1;
                self.exercise_index = 0;
                self.rewind_to_exercise_start();
                return Some(Event::NextWorkout {
                    title,
                    pack_index: self.pack_index,
                    at: Utc::now(),
                });
            }
        }

        self.finish()
    }

    fn finish(&mut self) -> Option<Event> {
        self.state = SessionState::Finished;
        let record = summary::summarize(
            &self.workout,
            self.elapsed_secs,
            self.completed.len(),
            self.total_exercises(),
        );
        Some(Event::SessionCompleted {
            record,
            at: Utc::now(),
        })
    }

    /// Fresh-exercise position: first set, active phase, paused awaiting
    /// an explicit resume.
    fn rewind_to_exercise_start(&mut self) {
        self.current_set = 1;
        self.phase = Phase::Exercising;
        self.state = SessionState::Paused;
        self.reseed();
    }

    /// Re-seed the countdown from the current phase's configured length.
    fn reseed(&mut self) {
        self.time_left = match (self.current_exercise(), self.phase) {
            (Some(e), Phase::Exercising) => e.duration,
            (Some(e), Phase::Resting) => e.rest_time,
            (None, _) => 0,
        };
    }
}
