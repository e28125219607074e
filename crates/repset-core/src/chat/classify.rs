//! Chat message topic classification.
//!
//! Keyword matching over the user's message decides whether the assistant
//! should pull in exercise or recipe context. Workout keywords are checked
//! first; a message matching neither list is general conversation.

/// What a chat message is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Workout,
    Nutrition,
    General,
}

const WORKOUT_KEYWORDS: &[&str] = &[
    "workout", "exercise", "training", "lift", "cardio", "strength", "routine", "fitness",
    "muscle", "gym",
];

const NUTRITION_KEYWORDS: &[&str] = &[
    "food", "meal", "recipe", "diet", "nutrition", "eat", "calorie", "protein", "carb", "vegan",
    "vegetarian", "gluten", "cook", "breakfast", "lunch", "dinner", "snack", "dessert",
];

pub fn is_workout_query(message: &str) -> bool {
    let lower = message.to_lowercase();
    WORKOUT_KEYWORDS.iter().any(|k| lower.contains(k))
}

pub fn is_nutrition_query(message: &str) -> bool {
    let lower = message.to_lowercase();
    NUTRITION_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Classify a message. Workout wins when both lists match.
pub fn classify(message: &str) -> Topic {
    if is_workout_query(message) {
        Topic::Workout
    } else if is_nutrition_query(message) {
        Topic::Nutrition
    } else {
        Topic::General
    }
}
