//! Workout data model and pack normalization.
//!
//! Workouts arrive in three overlapping shapes: a plain exercise list, a
//! manually-assembled pack (`isPack` + `packItems`), and an AI-assembled
//! pack descriptor stored in the `exercises` field (`isWorkoutPack` flag +
//! flattened `list` + optional `originalWorkouts`). All three are
//! normalized once, at load, into [`Routine`] -- the rest of the crate
//! never branches on wire shape.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WorkoutError;

/// Planned minutes assumed when a workout does not carry one.
pub const DEFAULT_PLANNED_DURATION_MIN: u32 = 30;
/// Calorie budget assumed when a workout does not carry one.
pub const DEFAULT_CALORIE_BUDGET: u32 = 300;

/// A single exercise within a workout. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    /// Informational only; progression is time-driven.
    #[serde(default)]
    pub reps: u32,
    /// Active-phase length in seconds.
    pub duration: u32,
    /// Rest-phase length in seconds.
    pub rest_time: u32,
    /// Step-by-step instructions, rendered one at a time.
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// The `exercises` field of a raw workout: either a plain list or an
/// AI-pack descriptor object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawExercises {
    List(Vec<Exercise>),
    Pack(PackDescriptor),
}

/// AI-assembled pack descriptor carried inside the `exercises` field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackDescriptor {
    #[serde(default)]
    pub is_workout_pack: bool,
    /// Flattened exercise list generated from the sub-workouts.
    #[serde(default)]
    pub list: Vec<Exercise>,
    /// The per-workout sources the flattened list was built from.
    #[serde(default)]
    pub original_workouts: Option<Vec<RawWorkout>>,
}

/// Wire shape of a workout as supplied by the catalog, user storage, or
/// the chat assistant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWorkout {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub workout_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    /// Planned minutes, used for calorie pacing -- not wall-clock truth.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default, alias = "calories_burned")]
    pub calories_burn: Option<u32>,
    #[serde(default)]
    pub exercises: Option<RawExercises>,
    #[serde(default)]
    pub is_pack: bool,
    #[serde(default)]
    pub pack_items: Option<Vec<RawWorkout>>,
}

/// One sub-workout of a pack after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutItem {
    pub title: String,
    pub exercises: Vec<Exercise>,
}

/// Normalized exercise plan: either one exercise list or an ordered pack
/// of sub-workouts, each iterated with its own list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Routine {
    Single { exercises: Vec<Exercise> },
    Pack { items: Vec<WorkoutItem> },
}

/// A workout ready to be played. Produced by [`Workout::from_raw`];
/// construction guarantees a non-empty routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub title: String,
    pub workout_type: String,
    pub description: String,
    pub level: String,
    /// Planned minutes for calorie pacing.
    pub planned_duration_min: u32,
    /// Calorie budget for 100% completion.
    pub calorie_budget: u32,
    pub routine: Routine,
}

impl Workout {
    /// Normalize a raw workout using the built-in pacing defaults.
    pub fn from_raw(raw: RawWorkout) -> Result<Self, WorkoutError> {
        Self::from_raw_with_defaults(raw, DEFAULT_PLANNED_DURATION_MIN, DEFAULT_CALORIE_BUDGET)
    }

    /// Normalize a raw workout, filling absent (or zero) planned duration
    /// and calorie budget from the given defaults.
    ///
    /// Shape precedence: explicit pack, then AI-pack descriptor, then
    /// plain list. An empty resolved exercise list is an error -- no
    /// session may start from it.
    pub fn from_raw_with_defaults(
        raw: RawWorkout,
        default_duration_min: u32,
        default_calorie_budget: u32,
    ) -> Result<Self, WorkoutError> {
        let title = raw.title.clone();
        let routine = resolve_routine(&title, raw.is_pack, raw.pack_items, raw.exercises)?;

        Ok(Self {
            id: raw
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            title,
            workout_type: raw.workout_type,
            description: raw.description.unwrap_or_default(),
            level: raw.level.unwrap_or_default(),
            planned_duration_min: raw
                .duration
                .filter(|d| *d > 0)
                .unwrap_or(default_duration_min),
            calorie_budget: raw
                .calories_burn
                .filter(|c| *c > 0)
                .unwrap_or(default_calorie_budget),
            routine,
        })
    }

    pub fn is_pack(&self) -> bool {
        matches!(self.routine, Routine::Pack { .. })
    }

    /// Exercise count across all pack items (or the plain list's length).
    pub fn total_exercises(&self) -> usize {
        match &self.routine {
            Routine::Single { exercises } => exercises.len(),
            Routine::Pack { items } => items.iter().map(|i| i.exercises.len()).sum(),
        }
    }

    /// Number of pack items; 1 for a plain workout.
    pub fn item_count(&self) -> usize {
        match &self.routine {
            Routine::Single { .. } => 1,
            Routine::Pack { items } => items.len(),
        }
    }
}

fn resolve_routine(
    title: &str,
    is_pack: bool,
    pack_items: Option<Vec<RawWorkout>>,
    exercises: Option<RawExercises>,
) -> Result<Routine, WorkoutError> {
    // (1) Explicit pack: flag plus a non-empty pack-item list.
    if is_pack {
        if let Some(items) = pack_items.filter(|items| !items.is_empty()) {
            return Ok(Routine::Pack {
                items: items
                    .into_iter()
                    .map(pack_item)
                    .collect::<Result<Vec<_>, _>>()?,
            });
        }
    }

    match exercises {
        // (2) AI-pack descriptor: flag set, flattened list present. The
        // original sub-workouts become the pack items when carried;
        // otherwise the flattened list plays as a single workout.
        Some(RawExercises::Pack(desc)) if desc.is_workout_pack && !desc.list.is_empty() => {
            match desc.original_workouts.filter(|o| !o.is_empty()) {
                Some(originals) => Ok(Routine::Pack {
                    items: originals
                        .into_iter()
                        .map(pack_item)
                        .collect::<Result<Vec<_>, _>>()?,
                }),
                None => Ok(Routine::Single {
                    exercises: desc.list,
                }),
            }
        }
        // (3) Plain ordered list.
        Some(RawExercises::List(list)) if !list.is_empty() => {
            Ok(Routine::Single { exercises: list })
        }
        Some(_) => Err(WorkoutError::EmptyExercises(title.to_string())),
        None => Err(WorkoutError::InvalidWorkout {
            title: title.to_string(),
            reason: "no exercises field".to_string(),
        }),
    }
}

fn pack_item(raw: RawWorkout) -> Result<WorkoutItem, WorkoutError> {
    let exercises = match raw.exercises {
        Some(RawExercises::List(list)) if !list.is_empty() => list,
        Some(RawExercises::Pack(desc)) if !desc.list.is_empty() => desc.list,
        _ => return Err(WorkoutError::EmptyExercises(raw.title)),
    };
    Ok(WorkoutItem {
        title: raw.title,
        exercises,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(name: &str) -> Exercise {
        Exercise {
            name: name.to_string(),
            sets: 3,
            reps: 10,
            duration: 30,
            rest_time: 15,
            instructions: vec![],
        }
    }

    fn raw_single(title: &str, names: &[&str]) -> RawWorkout {
        RawWorkout {
            title: title.to_string(),
            exercises: Some(RawExercises::List(
                names.iter().map(|n| exercise(n)).collect(),
            )),
            ..RawWorkout::default()
        }
    }

    #[test]
    fn plain_list_resolves_to_single() {
        let w = Workout::from_raw(raw_single("Morning", &["Push-ups", "Plank"])).unwrap();
        assert!(!w.is_pack());
        assert_eq!(w.total_exercises(), 2);
        assert_eq!(w.planned_duration_min, DEFAULT_PLANNED_DURATION_MIN);
        assert_eq!(w.calorie_budget, DEFAULT_CALORIE_BUDGET);
    }

    #[test]
    fn explicit_pack_takes_precedence() {
        let raw = RawWorkout {
            title: "Pack".to_string(),
            is_pack: true,
            pack_items: Some(vec![
                raw_single("A", &["Push-ups"]),
                raw_single("B", &["Air Squats"]),
            ]),
            // A stray plain list must lose to the pack items.
            exercises: Some(RawExercises::List(vec![exercise("Plank")])),
            ..RawWorkout::default()
        };
        let w = Workout::from_raw(raw).unwrap();
        assert!(w.is_pack());
        assert_eq!(w.item_count(), 2);
        assert_eq!(w.total_exercises(), 2);
    }

    #[test]
    fn descriptor_with_originals_becomes_pack() {
        let raw = RawWorkout {
            title: "AI Pack".to_string(),
            exercises: Some(RawExercises::Pack(PackDescriptor {
                is_workout_pack: true,
                list: vec![exercise("Push-ups"), exercise("Plank")],
                original_workouts: Some(vec![
                    raw_single("A", &["Push-ups"]),
                    raw_single("B", &["Plank"]),
                ]),
            })),
            ..RawWorkout::default()
        };
        let w = Workout::from_raw(raw).unwrap();
        assert!(w.is_pack());
        assert_eq!(w.item_count(), 2);
    }

    #[test]
    fn descriptor_without_originals_plays_flattened_list() {
        let raw = RawWorkout {
            title: "AI Pack".to_string(),
            exercises: Some(RawExercises::Pack(PackDescriptor {
                is_workout_pack: true,
                list: vec![exercise("Push-ups"), exercise("Plank")],
                original_workouts: None,
            })),
            ..RawWorkout::default()
        };
        let w = Workout::from_raw(raw).unwrap();
        assert!(!w.is_pack());
        assert_eq!(w.total_exercises(), 2);
    }

    #[test]
    fn empty_list_is_rejected() {
        let raw = RawWorkout {
            title: "Empty".to_string(),
            exercises: Some(RawExercises::List(vec![])),
            ..RawWorkout::default()
        };
        assert!(matches!(
            Workout::from_raw(raw),
            Err(WorkoutError::EmptyExercises(_))
        ));
    }

    #[test]
    fn missing_exercises_is_invalid() {
        let raw = RawWorkout {
            title: "Nothing".to_string(),
            ..RawWorkout::default()
        };
        assert!(matches!(
            Workout::from_raw(raw),
            Err(WorkoutError::InvalidWorkout { .. })
        ));
    }

    #[test]
    fn pack_item_with_empty_exercises_is_rejected() {
        let raw = RawWorkout {
            title: "Pack".to_string(),
            is_pack: true,
            pack_items: Some(vec![raw_single("A", &["Push-ups"]), RawWorkout {
                title: "B".to_string(),
                exercises: Some(RawExercises::List(vec![])),
                ..RawWorkout::default()
            }]),
            ..RawWorkout::default()
        };
        assert!(Workout::from_raw(raw).is_err());
    }

    #[test]
    fn zero_budget_falls_back_to_default() {
        let mut raw = raw_single("W", &["Plank"]);
        raw.calories_burn = Some(0);
        raw.duration = Some(0);
        let w = Workout::from_raw(raw).unwrap();
        assert_eq!(w.calorie_budget, DEFAULT_CALORIE_BUDGET);
        assert_eq!(w.planned_duration_min, DEFAULT_PLANNED_DURATION_MIN);
    }

    #[test]
    fn wire_shape_round_trips_camel_case() {
        let json = r#"{
            "title": "HIIT Blast",
            "type": "HIIT",
            "duration": 20,
            "caloriesBurn": 250,
            "exercises": [
                {"name": "Jumping Jacks", "sets": 3, "reps": 20,
                 "duration": 30, "restTime": 15, "instructions": ["Jump"]}
            ]
        }"#;
        let raw: RawWorkout = serde_json::from_str(json).unwrap();
        let w = Workout::from_raw(raw).unwrap();
        assert_eq!(w.calorie_budget, 250);
        match &w.routine {
            Routine::Single { exercises } => {
                assert_eq!(exercises[0].rest_time, 15);
            }
            _ => panic!("expected single routine"),
        }
    }

    #[test]
    fn calories_burned_alias_is_accepted() {
        let json = r#"{
            "title": "Saved",
            "calories_burned": 180,
            "exercises": [
                {"name": "Plank", "sets": 2, "reps": 1, "duration": 45, "restTime": 30}
            ]
        }"#;
        let raw: RawWorkout = serde_json::from_str(json).unwrap();
        let w = Workout::from_raw(raw).unwrap();
        assert_eq!(w.calorie_budget, 180);
    }
}
