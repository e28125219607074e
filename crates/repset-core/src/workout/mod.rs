mod builtin;
mod images;
mod model;

pub use builtin::{builtin_ids, builtin_workouts, find_builtin};
pub use images::{exercise_image, DEFAULT_EXERCISE_IMAGE};
pub use model::{
    Exercise, PackDescriptor, RawExercises, RawWorkout, Routine, Workout, WorkoutItem,
    DEFAULT_CALORIE_BUDGET, DEFAULT_PLANNED_DURATION_MIN,
};
