//! Completion summary and calorie estimation.
//!
//! Two estimates exist: the live in-session figure (pacing credit only,
//! capped at the budget) and the final completion figure, which takes the
//! maximum of raw completion credit, pacing-scaled completion credit, and
//! a 30% floor scaled by completion.

use serde::{Deserialize, Serialize};

use crate::workout::Workout;

/// Minimum credit fraction applied at completion, scaled by how much of
/// the workout was actually completed.
const MIN_CALORIE_FRACTION: f64 = 0.3;

/// Produced once when a session finishes; handed to persistence, then the
/// session is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub title: String,
    pub workout_type: String,
    /// Wall-clock minutes spent, rounded, at least 1.
    pub duration_min: u32,
    /// Estimated calories burned.
    pub calories: u32,
}

/// Minutes spent in the session: elapsed seconds rounded to minutes,
/// floored at 1.
pub fn minutes_spent(elapsed_secs: u64) -> u32 {
    ((elapsed_secs as f64 / 60.0).round() as u32).max(1)
}

/// Build the final completion record for a finished session.
pub fn summarize(
    workout: &Workout,
    elapsed_secs: u64,
    completed_count: usize,
    total_exercises: usize,
) -> CompletionRecord {
    let minutes = minutes_spent(elapsed_secs);
    let completion = completed_count as f64 / total_exercises.max(1) as f64;
    let planned = workout.planned_duration_min.max(1) as f64;
    let pacing = (minutes as f64 / planned).min(1.0);

    let credit = completion
        .max(pacing * completion)
        .max(MIN_CALORIE_FRACTION * completion);
    let calories = (workout.calorie_budget as f64 * credit).round() as u32;

    CompletionRecord {
        title: workout.title.clone(),
        workout_type: workout.workout_type.clone(),
        duration_min: minutes,
        calories,
    }
}

/// Live mid-session estimate: pacing credit against the planned duration,
/// capped at the budget.
pub fn live_estimate(elapsed_secs: u64, calorie_budget: u32, planned_duration_min: u32) -> u32 {
    let planned = planned_duration_min.max(1) as f64;
    let minutes = elapsed_secs as f64 / 60.0;
    let estimate = (calorie_budget as f64 * minutes / planned).round() as u64;
    estimate.min(calorie_budget as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::{find_builtin, Routine, Workout};
    use proptest::prelude::*;

    fn workout(planned_min: u32, budget: u32) -> Workout {
        let mut w = find_builtin("starter-hiit").unwrap();
        w.planned_duration_min = planned_min;
        w.calorie_budget = budget;
        w
    }

    #[test]
    fn nothing_completed_yields_zero_calories() {
        // One exercise, ten seconds on the clock, nothing marked done.
        let w = workout(30, 300);
        let record = summarize(&w, 10, 0, 1);
        assert_eq!(record.duration_min, 1);
        assert_eq!(record.calories, 0);
    }

    #[test]
    fn full_completion_earns_the_whole_budget() {
        let w = workout(30, 300);
        let record = summarize(&w, 30 * 60, 5, 5);
        assert_eq!(record.calories, 300);
    }

    #[test]
    fn partial_completion_scales_the_budget() {
        let w = workout(30, 300);
        let record = summarize(&w, 15 * 60, 2, 4);
        assert_eq!(record.calories, 150);
    }

    #[test]
    fn minutes_are_floored_at_one() {
        assert_eq!(minutes_spent(0), 1);
        assert_eq!(minutes_spent(29), 1);
        assert_eq!(minutes_spent(90), 2);
    }

    #[test]
    fn live_estimate_is_capped_at_budget() {
        // Three hours against a 30-minute plan.
        assert_eq!(live_estimate(3 * 3600, 300, 30), 300);
        assert_eq!(live_estimate(0, 300, 30), 0);
        // Half the planned time earns half the budget.
        assert_eq!(live_estimate(15 * 60, 300, 30), 150);
    }

    #[test]
    fn zero_planned_duration_does_not_divide_by_zero() {
        assert!(live_estimate(600, 300, 0) <= 300);
        let w = workout(0, 300);
        let record = summarize(&w, 600, 1, 1);
        assert!(record.calories <= 300);
    }

    proptest! {
        #[test]
        fn estimate_never_exceeds_budget(
            elapsed in 0u64..1_000_000,
            completed in 0usize..50,
            total in 0usize..50,
            planned in 0u32..600,
            budget in 0u32..5_000,
        ) {
            let w = workout(planned, budget);
            let done = completed.min(total);
            let record = summarize(&w, elapsed, done, total);
            prop_assert!(record.calories <= budget);
            prop_assert!(record.duration_min >= 1);
            prop_assert!(live_estimate(elapsed, budget, planned) <= budget);
        }
    }

    #[test]
    fn routine_shape_does_not_affect_summary() {
        let mut w = workout(30, 200);
        w.routine = Routine::Single { exercises: vec![] };
        let record = summarize(&w, 60, 0, 0);
        assert_eq!(record.calories, 0);
    }
}
