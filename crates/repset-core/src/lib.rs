//! # Repset Core Library
//!
//! This library provides the core business logic for the repset workout
//! player. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI surface being a
//! thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Session Engine**: a caller-driven state machine; the host invokes
//!   `tick()` once per second while the session runs
//! - **Workout Model**: one-shot normalization of the three workout/pack
//!   wire shapes into a single tagged routine
//! - **Chat Heuristics**: topic classification and recipe/plan extraction
//!   from free-text assistant replies
//! - **Storage**: SQLite session/completion storage and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`WorkoutSession`]: the session state machine
//! - [`Workout`]: normalized workout definition
//! - [`Database`]: completion and saved-workout persistence
//! - [`Config`]: application configuration management

pub mod chat;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod timefmt;
pub mod workout;

pub use error::{ConfigError, CoreError, DatabaseError, WorkoutError};
pub use events::Event;
pub use session::{CompletionRecord, Phase, SessionState, WorkoutSession};
pub use storage::{Config, Database, Stats};
pub use timefmt::format_time;
pub use workout::{Exercise, RawWorkout, Routine, Workout, WorkoutItem};
