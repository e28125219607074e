mod engine;
mod summary;

pub use engine::{Phase, SessionState, WorkoutSession};
pub use summary::{live_estimate, minutes_spent, summarize, CompletionRecord};
