//! Structured data extraction from free-text assistant replies.
//!
//! The AI backend is asked to lead recipes with name/ingredients/
//! instructions and to emit `WORKOUT_PLAN:`/`MEAL_PLAN:` markers for
//! saveable plans, but its replies are still free text. These heuristics
//! pull the structure back out; every field has a fixed fallback so
//! extraction never fails once a reply looks like a recipe.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder image attached to extracted recipes.
pub const DEFAULT_RECIPE_IMAGE: &str =
    "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80";

const DIET_TAGS: &[&str] = &[
    "vegetarian",
    "vegan",
    "gluten-free",
    "keto",
    "paleo",
    "low-carb",
    "high-protein",
];

/// A recipe recovered from an assistant reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecipe {
    pub title: String,
    /// The full reply, kept as the recipe summary.
    pub summary: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub servings: u32,
    pub ready_in_minutes: u32,
    pub diets: Vec<String>,
    pub image: String,
}

/// A saveable workout plan parsed from a `WORKOUT_PLAN:` marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlanDraft {
    pub title: String,
    pub workout_type: String,
    pub level: String,
    pub description: String,
    /// Exercise payload, verbatim; resolved downstream.
    pub exercises: String,
}

/// A saveable meal plan parsed from a `MEAL_PLAN:` marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanDraft {
    pub title: String,
    pub diet: String,
    pub calories: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "plan")]
pub enum ParsedPlan {
    Workout(WorkoutPlanDraft),
    Meal(MealPlanDraft),
}

/// Does this reply read like a recipe at all?
pub fn looks_like_recipe(content: &str) -> bool {
    let lower = content.to_lowercase();
    lower.contains("recipe")
        || lower.contains("ingredients")
        || (lower.contains("instructions") && lower.contains("minutes"))
}

/// Extract a recipe from a free-text reply, or `None` if the reply does
/// not look like one.
pub fn extract_recipe(content: &str) -> Option<ExtractedRecipe> {
    if !looks_like_recipe(content) {
        return None;
    }

    let ingredients = split_after(content, r"(?i)ingredients:")
        .map(|rest| {
            let section = cut_before(rest, r"(?i)instructions:|directions:|steps:|method:");
            lines_of(section, 3, strip_bullet)
        })
        .unwrap_or_default();

    let instructions = split_after(content, r"(?i)instructions:|directions:")
        .map(|rest| {
            let section = cut_before(rest, r"(?i)nutrition information:|nutritional info:|notes:");
            lines_of(section, 5, strip_step_number)
        })
        .unwrap_or_default();

    let lower = content.to_lowercase();
    let diets: Vec<String> = DIET_TAGS
        .iter()
        .filter(|tag| lower.contains(*tag))
        .map(|tag| tag.to_string())
        .collect();

    Some(ExtractedRecipe {
        title: extract_title(content),
        summary: content.to_string(),
        calories: capture_u32(content, r"(?i)calories:?\s*(\d+)").unwrap_or(300),
        protein: capture_u32(content, r"(?i)protein:?\s*(\d+)").unwrap_or(25),
        carbs: capture_u32(content, r"(?i)carbs?:?\s*(\d+)").unwrap_or(40),
        fat: capture_u32(content, r"(?i)fat:?\s*(\d+)").unwrap_or(15),
        ingredients,
        instructions,
        servings: 2,
        ready_in_minutes: 30,
        diets: if diets.is_empty() {
            vec!["Balanced".to_string()]
        } else {
            diets
        },
        image: DEFAULT_RECIPE_IMAGE.to_string(),
    })
}

/// Parse a `WORKOUT_PLAN:` or `MEAL_PLAN:` marker out of a reply.
/// Returns the plan and the reply with the marker stripped.
pub fn parse_plan_marker(reply: &str) -> Option<(ParsedPlan, String)> {
    let workout_re = Regex::new(r"(?s)WORKOUT_PLAN: (.*?)\|(.*?)\|(.*?)\|(.*?)\|(.*)").ok()?;
    if let Some(caps) = workout_re.captures(reply) {
        let whole = caps.get(0)?;
        let plan = ParsedPlan::Workout(WorkoutPlanDraft {
            title: caps[1].trim().to_string(),
            workout_type: caps[2].trim().to_string(),
            level: caps[3].trim().to_string(),
            description: caps[4].trim().to_string(),
            exercises: caps[5].trim().to_string(),
        });
        return Some((plan, reply[..whole.start()].trim().to_string()));
    }

    let meal_re = Regex::new(r"(?s)MEAL_PLAN: (.*?)\|(.*?)\|(.*?)\|(.*)").ok()?;
    if let Some(caps) = meal_re.captures(reply) {
        let whole = caps.get(0)?;
        let plan = ParsedPlan::Meal(MealPlanDraft {
            title: caps[1].trim().to_string(),
            diet: caps[2].trim().to_string(),
            calories: caps[3].trim().to_string(),
            description: caps[4].trim().to_string(),
        });
        return Some((plan, reply[..whole.start()].trim().to_string()));
    }

    None
}

/// Recipe title: the first line, truncated at 60 chars.
fn extract_title(content: &str) -> String {
    let first = content.lines().next().unwrap_or("").trim();
    if first.is_empty() {
        return "AI Generated Recipe".to_string();
    }
    if first.chars().count() > 60 {
        let cut: String = first.chars().take(60).collect();
        format!("{cut}...")
    } else {
        first.to_string()
    }
}

/// Everything after the first match of `pattern`.
fn split_after<'a>(content: &'a str, pattern: &str) -> Option<&'a str> {
    let re = Regex::new(pattern).ok()?;
    let m = re.find(content)?;
    Some(&content[m.end()..])
}

/// Everything before the first match of `pattern`, or the whole input.
fn cut_before<'a>(content: &'a str, pattern: &str) -> &'a str {
    match Regex::new(pattern).ok().and_then(|re| re.find(content)) {
        Some(m) => &content[..m.start()],
        None => content,
    }
}

/// Non-trivial lines of a section, cleaned by `clean`.
fn lines_of(section: &str, min_len: usize, clean: fn(&str) -> String) -> Vec<String> {
    section
        .lines()
        .map(str::trim)
        .filter(|line| line.len() > min_len)
        .map(clean)
        .filter(|line| !line.is_empty())
        .collect()
}

fn strip_bullet(line: &str) -> String {
    line.trim_start_matches(['-', '•', '*'])
        .trim_start()
        .to_string()
}

fn strip_step_number(line: &str) -> String {
    match Regex::new(r"^\d+\.\s*").ok().and_then(|re| re.find(line)) {
        Some(m) => line[m.end()..].to_string(),
        None => strip_bullet(line),
    }
}

fn capture_u32(content: &str, pattern: &str) -> Option<u32> {
    let re = Regex::new(pattern).ok()?;
    re.captures(content)?.get(1)?.as_str().parse().ok()
}
