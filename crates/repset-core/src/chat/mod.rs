//! The pure string-processing half of the wellness chat assistant:
//! deciding what a message is about and recovering structured recipe or
//! plan data from free-text replies. The model call itself lives behind
//! an external backend and is out of scope here.

mod classify;
mod extract;

pub use classify::{classify, is_nutrition_query, is_workout_query, Topic};
pub use extract::{
    extract_recipe, looks_like_recipe, parse_plan_marker, ExtractedRecipe, MealPlanDraft,
    ParsedPlan, WorkoutPlanDraft, DEFAULT_RECIPE_IMAGE,
};
