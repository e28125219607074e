use std::path::PathBuf;

use clap::Subcommand;

use repset_core::storage::Database;
use repset_core::workout::{builtin_workouts, exercise_image, find_builtin, RawWorkout, Workout};
use repset_core::Config;

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// List built-in and saved workouts
    List,
    /// Show a workout as JSON
    Show {
        /// Built-in or saved workout ID
        id: String,
    },
    /// Save a workout from a raw JSON file
    Save {
        /// Path to a raw workout JSON file
        file: PathBuf,
    },
    /// Delete a saved workout
    Delete {
        /// Saved workout ID
        id: String,
    },
    /// Print the display-image URL for an exercise
    Image {
        /// Exercise name
        name: String,
    },
}

fn find_workout(db: &Database, id: &str) -> Result<Workout, Box<dyn std::error::Error>> {
    if let Some(workout) = find_builtin(id) {
        return Ok(workout);
    }
    db.load_workout(id)?
        .ok_or_else(|| format!("no workout with id '{id}'").into())
}

pub fn run(action: WorkoutAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        WorkoutAction::List => {
            for workout in builtin_workouts() {
                println!(
                    "{}\t{}\t{} exercises\t(built-in)",
                    workout.id,
                    workout.title,
                    workout.total_exercises()
                );
            }
            for (id, title) in db.list_workouts()? {
                println!("{id}\t{title}\t(saved)");
            }
        }
        WorkoutAction::Show { id } => {
            let workout = find_workout(&db, &id)?;
            println!("{}", serde_json::to_string_pretty(&workout)?);
        }
        WorkoutAction::Save { file } => {
            let raw: RawWorkout = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
            let defaults = Config::load_or_default().defaults;
            let workout = Workout::from_raw_with_defaults(
                raw,
                defaults.planned_duration_min,
                defaults.calorie_budget,
            )?;
            db.save_workout(&workout)?;
            println!("saved workout '{}' ({})", workout.title, workout.id);
        }
        WorkoutAction::Delete { id } => {
            if db.delete_workout(&id)? {
                println!("deleted '{id}'");
            } else {
                return Err(format!("no saved workout with id '{id}'").into());
            }
        }
        WorkoutAction::Image { name } => {
            println!("{}", exercise_image(&name));
        }
    }
    Ok(())
}
