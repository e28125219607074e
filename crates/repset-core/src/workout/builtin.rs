//! Built-in starter workouts.
//!
//! Shipped so a fresh install has something to play before the user saves
//! or generates their own routines.

use indoc::indoc;

use super::model::{Exercise, Routine, Workout, WorkoutItem};

/// Returns all built-in workouts.
pub fn builtin_workouts() -> Vec<Workout> {
    vec![starter_hiit(), morning_yoga(), full_body_pack()]
}

/// Find a built-in workout by ID.
pub fn find_builtin(id: &str) -> Option<Workout> {
    builtin_workouts().into_iter().find(|w| w.id == id)
}

/// Built-in IDs for listing.
pub fn builtin_ids() -> Vec<&'static str> {
    vec!["starter-hiit", "morning-yoga", "full-body-pack"]
}

fn ex(
    name: &str,
    sets: u32,
    reps: u32,
    duration: u32,
    rest_time: u32,
    instructions: &[&str],
) -> Exercise {
    Exercise {
        name: name.to_string(),
        sets,
        reps,
        duration,
        rest_time,
        instructions: instructions.iter().map(|s| s.to_string()).collect(),
    }
}

fn hiit_exercises() -> Vec<Exercise> {
    vec![
        ex(
            "Jumping Jacks",
            3,
            20,
            30,
            15,
            &[
                "Stand upright with your legs together, arms at your sides",
                "Jump up, spreading your legs and raising your arms overhead",
                "Jump back to the starting position and repeat",
            ],
        ),
        ex(
            "Push-ups",
            3,
            12,
            30,
            20,
            &[
                "Start in a high plank with hands under your shoulders",
                "Lower your chest until it nearly touches the floor",
                "Push back up to the starting position",
            ],
        ),
        ex(
            "Air Squats",
            3,
            15,
            40,
            20,
            &[
                "Stand with feet shoulder-width apart",
                "Sit back and down as if into a chair, keeping your chest up",
                "Drive through your heels to stand back up",
            ],
        ),
        ex(
            "Mountain Climbers",
            3,
            20,
            30,
            15,
            &[
                "Start in a high plank",
                "Drive one knee toward your chest, then switch legs quickly",
            ],
        ),
        ex(
            "Plank",
            3,
            1,
            45,
            30,
            &[
                "Rest on your forearms and toes, body in a straight line",
                "Brace your core and hold",
            ],
        ),
    ]
}

fn yoga_exercises() -> Vec<Exercise> {
    vec![
        ex(
            "Sun Salutation (Surya Namaskar)",
            2,
            1,
            60,
            15,
            &[
                "Begin standing, palms together at your chest",
                "Flow through the twelve poses with your breath",
            ],
        ),
        ex(
            "Warrior II (Virabhadrasana II)",
            2,
            1,
            45,
            15,
            &[
                "Step one foot back, front knee bent over the ankle",
                "Extend your arms and gaze over the front hand",
            ],
        ),
        ex(
            "Tree Pose (Vrksasana)",
            2,
            1,
            30,
            15,
            &[
                "Shift your weight onto one leg",
                "Place the other foot on your inner thigh and balance",
            ],
        ),
    ]
}

fn starter_hiit() -> Workout {
    Workout {
        id: "starter-hiit".to_string(),
        title: "Starter HIIT".to_string(),
        workout_type: "HIIT".to_string(),
        description: indoc! {"
            Five bodyweight staples in short timed bursts. No equipment,
            small footprint, done in about twenty minutes.
        "}
        .trim_end()
        .to_string(),
        level: "Beginner".to_string(),
        planned_duration_min: 20,
        calorie_budget: 220,
        routine: Routine::Single {
            exercises: hiit_exercises(),
        },
    }
}

fn morning_yoga() -> Workout {
    Workout {
        id: "morning-yoga".to_string(),
        title: "Morning Yoga Flow".to_string(),
        workout_type: "Yoga".to_string(),
        description: indoc! {"
            A short standing flow to loosen up before the day. Move with
            your breath; the timer paces each hold.
        "}
        .trim_end()
        .to_string(),
        level: "Beginner".to_string(),
        planned_duration_min: 15,
        calorie_budget: 90,
        routine: Routine::Single {
            exercises: yoga_exercises(),
        },
    }
}

fn full_body_pack() -> Workout {
    Workout {
        id: "full-body-pack".to_string(),
        title: "Full Body Starter Pack".to_string(),
        workout_type: "Mixed".to_string(),
        description: indoc! {"
            The starter HIIT circuit followed by the morning yoga flow,
            played back to back as one session.
        "}
        .trim_end()
        .to_string(),
        level: "Beginner".to_string(),
        planned_duration_min: 35,
        calorie_budget: 310,
        routine: Routine::Pack {
            items: vec![
                WorkoutItem {
                    title: "Starter HIIT".to_string(),
                    exercises: hiit_exercises(),
                },
                WorkoutItem {
                    title: "Morning Yoga Flow".to_string(),
                    exercises: yoga_exercises(),
                },
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_id_resolves() {
        for id in builtin_ids() {
            assert!(find_builtin(id).is_some(), "missing builtin: {id}");
        }
    }

    #[test]
    fn builtins_have_playable_routines() {
        for w in builtin_workouts() {
            assert!(w.total_exercises() > 0);
            assert!(w.calorie_budget > 0);
            assert!(w.planned_duration_min > 0);
        }
    }

    #[test]
    fn pack_counts_exercises_across_items() {
        let pack = find_builtin("full-body-pack").unwrap();
        assert!(pack.is_pack());
        assert_eq!(pack.item_count(), 2);
        assert_eq!(pack.total_exercises(), 5 + 3);
    }
}
