//! Exercise display-image lookup.
//!
//! Resolution order: exact name match, then case-insensitive substring
//! match in either direction, then the default image. Lookup never fails;
//! render-time load failures fall back to [`DEFAULT_EXERCISE_IMAGE`] too.

/// Shown for any exercise the table does not cover.
pub const DEFAULT_EXERCISE_IMAGE: &str =
    "https://www.inspireusafoundation.org/wp-content/uploads/2022/03/jumping-jacks-benefits.gif";

const EXERCISE_IMAGES: &[(&str, &str)] = &[
    (
        "Jumping Jacks",
        "https://www.inspireusafoundation.org/wp-content/uploads/2022/11/jumping-jack-animation.gif",
    ),
    (
        "Push-ups",
        "https://thumbs.gfycat.com/GlossySkinnyDuckbillcat-max-1mb.gif",
    ),
    (
        "Air Squats",
        "https://thumbs.gfycat.com/UnlinedTerribleGermanshorthairedpointer-max-1mb.gif",
    ),
    ("Plank", "https://flabfix.com/wp-content/uploads/2019/05/Plank.gif"),
    (
        "Russian Twists",
        "https://media1.tenor.com/m/8byDO_ANDxAAAAAC/exercise-russian-twist.gif",
    ),
    (
        "Mountain Climbers",
        "https://thumbs.gfycat.com/PhonyFaithfulAstrangiacoral-max-1mb.gif",
    ),
    (
        "Sun Salutation (Surya Namaskar)",
        "https://cdn.dribbble.com/users/2931468/screenshots/5720362/media/e87bb48393c8202ff31e10056bbb413c.gif",
    ),
    (
        "Warrior II (Virabhadrasana II)",
        "https://cdn.dribbble.com/users/2106177/screenshots/6834350/warrior2_dr.gif",
    ),
    (
        "Tree Pose (Vrksasana)",
        "https://www.yogadukaan.com/blog/wp-content/uploads/2023/04/Vrikshasana-basic-steps-benefits.gif",
    ),
    (
        "3/4 sit-up",
        "https://www.inspireusafoundation.org/wp-content/uploads/2022/03/situp-exercise.gif",
    ),
    (
        "45° side bend",
        "https://www.inspireusafoundation.org/wp-content/uploads/2022/02/standing-side-bend.gif",
    ),
    (
        "air bike",
        "https://fitnessprogramer.com/wp-content/uploads/2021/02/Bicycle-Crunch.gif",
    ),
    (
        "alternate heel touchers",
        "https://media.tenor.com/CJmLCk8voUgAAAAC/heel-touch-crunches-heel-touchers.gif",
    ),
    (
        "assisted hanging knee raise with throw down",
        "https://www.inspireusafoundation.org/wp-content/uploads/2022/10/hanging-knee-raise.gif",
    ),
];

/// Resolve the display image URL for an exercise name.
pub fn exercise_image(name: &str) -> &'static str {
    if let Some((_, url)) = EXERCISE_IMAGES.iter().find(|(key, _)| *key == name) {
        return url;
    }

    let lower = name.to_lowercase();
    for (key, url) in EXERCISE_IMAGES {
        let key_lower = key.to_lowercase();
        if key_lower.contains(&lower) || lower.contains(&key_lower) {
            return url;
        }
    }

    DEFAULT_EXERCISE_IMAGE
}
