// Wire types for the meal-planning backend
// Request bodies serialize exactly the fields the server reads; response
// types are lenient because the server mixes payload and `{error}` shapes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::view::FormData;

// ============================================================================
// Lenient field decoders
// ============================================================================
// Rows come from user data, so one odd field (null, a number where text is
// expected, a quoted number) must not sink the whole reply.

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(value.filter(|n| n.is_finite()))
}

fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(deserializer)?.unwrap_or(0.0))
}

/// Counters: negative values clamp to zero, fractions are truncated.
fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(deserializer)?.map(|n| n.max(0.0) as u64))
}

/// One pantry entry as returned by `GET /api/pantry/ingredients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub unit: String,
    #[serde(default, deserialize_with = "text")]
    pub storage_method: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub expiry_date: Option<String>,
}

impl Ingredient {
    fn name_or_id(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Name shown in the pantry list; unnamed items fall back to their id
    /// with underscores as spaces, upper-cased.
    pub fn display_name(&self) -> String {
        match self.name_or_id() {
            Some(name) => name.to_string(),
            None => self.id.replace('_', " ").to_uppercase(),
        }
    }

    /// Name shown in the dashboard overview (same fallback, original case).
    pub fn short_name(&self) -> String {
        match self.name_or_id() {
            Some(name) => name.to_string(),
            None => self.id.replace('_', " "),
        }
    }

    pub fn storage(&self) -> &str {
        self.storage_method
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("pantry")
    }
}

/// `GET /api/pantry/ingredients` answers with either a list or `{error}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PantryListing {
    Items(Vec<Ingredient>),
    Failed { error: String },
}

/// `GET /api/user`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserResponse {
    Failed { error: String },
    Profile(UserProfile),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub diet_type: Option<String>,
    #[serde(default)]
    pub cooking_skill: Option<String>,
}

impl UserProfile {
    pub fn diet_label(&self) -> &str {
        self.diet_type
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("Not set")
    }

    pub fn skill_label(&self) -> &str {
        self.cooking_skill
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("beginner")
    }
}

/// `GET /api/dashboard/stats`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StatsResponse {
    Failed { error: String },
    Stats(DashboardStats),
}

/// Counters are optional on the wire; absent, null or non-numeric means zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "count")]
    pub pantry_count: Option<u64>,
    #[serde(default, deserialize_with = "count")]
    pub expiring_count: Option<u64>,
    #[serde(default, deserialize_with = "count")]
    pub recipes_tried: Option<u64>,
    #[serde(default, deserialize_with = "count")]
    pub days_streak: Option<u64>,
}

impl DashboardStats {
    pub fn pantry_count(&self) -> u64 {
        self.pantry_count.unwrap_or(0)
    }

    pub fn expiring_count(&self) -> u64 {
        self.expiring_count.unwrap_or(0)
    }

    pub fn recipes_tried(&self) -> u64 {
        self.recipes_tried.unwrap_or(0)
    }

    pub fn days_streak(&self) -> u64 {
        self.days_streak.unwrap_or(0)
    }
}

/// Generic `{success, message?, error?}` reply used by the mutating routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /api/parse-ingredient`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParsedIngredient {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "number")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "text")]
    pub unit: Option<String>,
}

/// `POST /api/suggestions`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionsResponse {
    #[serde(default)]
    pub suggestions: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SuggestionsResponse {
    pub fn text(&self) -> Option<&str> {
        non_empty(&self.suggestions)
    }

    pub fn error(&self) -> Option<&str> {
        non_empty(&self.error)
    }
}

/// `POST /api/mealplan`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealPlanResponse {
    #[serde(default)]
    pub meal_plan: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl MealPlanResponse {
    pub fn text(&self) -> Option<&str> {
        non_empty(&self.meal_plan)
    }

    pub fn error(&self) -> Option<&str> {
        non_empty(&self.error)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub diet_type: String,
    pub dietary_restrictions: Vec<String>,
    pub preferred_cuisines: Vec<String>,
    pub cooking_skill: String,
}

impl Registration {
    /// Collects the register form; restrictions and cuisines are
    /// multi-select fields, so every value submitted under the name is kept.
    pub fn from_form(form: &FormData) -> Self {
        Self {
            username: form.get("username").unwrap_or_default().to_string(),
            password: form.get("password").unwrap_or_default().to_string(),
            diet_type: form.get("diet_type").unwrap_or_default().to_string(),
            dietary_restrictions: form.get_all("dietary_restrictions"),
            preferred_cuisines: form.get_all("preferred_cuisines"),
            cooking_skill: form.get("cooking_skill").unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub storage_method: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseRequest {
    pub input: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestionFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_mode: Option<bool>,
}

impl SuggestionFilters {
    pub fn recipe(query: impl Into<String>) -> Self {
        Self {
            recipe_query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn cooking(recipe: impl Into<String>) -> Self {
        Self {
            recipe_query: Some(recipe.into()),
            cooking_mode: Some(true),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name_falls_back_to_id() {
        let item: Ingredient = serde_json::from_value(json!({
            "id": "red_onion",
            "quantity": 3,
            "unit": "pcs"
        }))
        .unwrap();

        assert_eq!(item.display_name(), "RED ONION");
        assert_eq!(item.short_name(), "red onion");
        assert_eq!(item.storage(), "pantry");
    }

    #[test]
    fn test_pantry_listing_shapes() {
        let items: PantryListing = serde_json::from_value(json!([])).unwrap();
        assert!(matches!(items, PantryListing::Items(ref v) if v.is_empty()));

        let failed: PantryListing =
            serde_json::from_value(json!({"error": "Not logged in"})).unwrap();
        assert!(matches!(failed, PantryListing::Failed { ref error } if error == "Not logged in"));
    }

    #[test]
    fn test_user_error_takes_precedence() {
        let user: UserResponse = serde_json::from_value(json!({"error": "expired"})).unwrap();
        assert!(matches!(user, UserResponse::Failed { .. }));

        let user: UserResponse =
            serde_json::from_value(json!({"username": "ana", "diet_type": ""})).unwrap();
        match user {
            UserResponse::Profile(profile) => {
                assert_eq!(profile.diet_label(), "Not set");
                assert_eq!(profile.skill_label(), "beginner");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_stats_default_to_zero() {
        let stats: StatsResponse =
            serde_json::from_value(json!({"pantry_count": 4, "days_streak": null})).unwrap();
        match stats {
            StatsResponse::Stats(stats) => {
                assert_eq!(stats.pantry_count(), 4);
                assert_eq!(stats.expiring_count(), 0);
                assert_eq!(stats.days_streak(), 0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_odd_fields_do_not_sink_listing() {
        let listing: PantryListing = serde_json::from_value(json!([
            {"id": "eggs", "name": "Eggs", "quantity": 12, "unit": null},
            {"id": 7, "name": null, "quantity": "2.5", "unit": "kg", "expiry_date": null},
            {"id": "salt", "quantity": null}
        ]))
        .unwrap();

        let items = match listing {
            PantryListing::Items(items) => items,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].display_name(), "Eggs");
        assert_eq!(items[0].unit, "");
        assert_eq!(items[1].id, "7");
        assert_eq!(items[1].quantity, 2.5);
        assert_eq!(items[1].expiry_date, None);
        assert_eq!(items[2].quantity, 0.0);
    }

    #[test]
    fn test_stats_accept_loose_numbers() {
        let stats: StatsResponse = serde_json::from_value(json!({
            "pantry_count": 3.0,
            "expiring_count": -1,
            "recipes_tried": "5",
            "days_streak": "lots"
        }))
        .unwrap();

        match stats {
            StatsResponse::Stats(stats) => {
                assert_eq!(stats.pantry_count(), 3);
                assert_eq!(stats.expiring_count(), 0);
                assert_eq!(stats.recipes_tried(), 5);
                assert_eq!(stats.days_streak(), 0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_filters_omit_unset_fields() {
        let body = serde_json::to_value(SuggestionFilters::cooking("Pad Thai")).unwrap();
        assert_eq!(body, json!({"recipe_query": "Pad Thai", "cooking_mode": true}));

        let body = serde_json::to_value(SuggestionFilters::default()).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn test_registration_keeps_repeated_fields() {
        let mut form = FormData::new();
        form.append("username", "ana");
        form.append("password", "pw");
        form.append("diet_type", "vegetarian");
        form.append("dietary_restrictions", "nuts");
        form.append("dietary_restrictions", "gluten");
        form.append("preferred_cuisines", "thai");
        form.append("cooking_skill", "intermediate");

        let registration = Registration::from_form(&form);
        assert_eq!(registration.dietary_restrictions, vec!["nuts", "gluten"]);
        assert_eq!(registration.preferred_cuisines, vec!["thai"]);
        assert_eq!(registration.cooking_skill, "intermediate");
    }
}
