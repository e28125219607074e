use clap::Subcommand;
use repset_core::chat::{classify, extract_recipe, parse_plan_marker, Topic};

#[derive(Subcommand)]
pub enum ChatAction {
    /// Classify a message as workout, nutrition, or general
    Classify {
        /// The user message
        message: String,
    },
    /// Extract a recipe from assistant reply text
    Recipe {
        /// The reply text
        text: String,
    },
    /// Parse a WORKOUT_PLAN/MEAL_PLAN marker out of reply text
    Plan {
        /// The reply text
        text: String,
    },
}

pub fn run(action: ChatAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ChatAction::Classify { message } => {
            let topic = match classify(&message) {
                Topic::Workout => "workout",
                Topic::Nutrition => "nutrition",
                Topic::General => "general",
            };
            println!("{topic}");
        }
        ChatAction::Recipe { text } => match extract_recipe(&text) {
            Some(recipe) => println!("{}", serde_json::to_string_pretty(&recipe)?),
            None => return Err("text does not look like a recipe".into()),
        },
        ChatAction::Plan { text } => match parse_plan_marker(&text) {
            Some((plan, cleaned)) => {
                println!("{}", serde_json::to_string_pretty(&plan)?);
                println!("{cleaned}");
            }
            None => return Err("no plan marker found".into()),
        },
    }
    Ok(())
}
