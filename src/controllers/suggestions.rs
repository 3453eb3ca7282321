// Suggestion-driven workflows: meal ideas, recipe search, weekly plan and
// cooking mode. All of them render server text through the formatter.

use tracing::info;

use crate::cooking::CookingInfo;
use crate::feedback::Feedback;
use crate::format::{escape_html, format_suggestions};
use crate::http::ApiClient;
use crate::models::SuggestionFilters;
use crate::view::{Button, FormData, Region, View};

fn suggestions_block(inner: String) -> String {
    format!(r#"<div class="suggestions-content">{inner}</div>"#)
}

pub struct SuggestionsController<V: View + 'static> {
    api: ApiClient,
    feedback: Feedback<V>,
}

impl<V: View + 'static> SuggestionsController<V> {
    pub fn new(api: ApiClient, feedback: Feedback<V>) -> Self {
        Self { api, feedback }
    }

    pub async fn get_suggestions(&self, filters: &SuggestionFilters) {
        let _loading = self.feedback.loading(Button::GetSuggestions);

        match self.api.suggestions(filters).await {
            Ok(reply) => {
                if let Some(text) = reply.text() {
                    self.feedback.view().set_html(
                        Region::SuggestionsContent,
                        suggestions_block(format_suggestions(text)),
                    );
                } else if let Some(error) = reply.error() {
                    self.feedback.error(error);
                } else {
                    self.feedback.warning("No suggestions available");
                }
            }
            Err(e) => {
                self.feedback
                    .error(format!("Failed to get suggestions: {e}"));
            }
        }
    }

    /// Suggestions form: meal type and cuisine filters.
    pub async fn submit_suggestions_form(&self, form: &FormData) {
        let filters = SuggestionFilters {
            meal_type: form.get("meal_type").map(str::to_string),
            cuisine: form.get("cuisine").map(str::to_string),
            ..SuggestionFilters::default()
        };
        self.get_suggestions(&filters).await;
    }

    pub async fn search_recipe(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.feedback.error("Please enter a recipe name");
            return;
        }

        let _loading = self.feedback.loading(Button::GetSuggestions);

        match self.api.suggestions(&SuggestionFilters::recipe(query)).await {
            Ok(reply) => match reply.text() {
                Some(text) => {
                    let inner = format!(
                        r#"<h3 style="color: var(--primary); margin-bottom: 1rem;">{}</h3>{}"#,
                        escape_html(query),
                        format_suggestions(text)
                    );
                    self.feedback
                        .view()
                        .set_html(Region::QuickRecipeResult, suggestions_block(inner));
                }
                None => {
                    self.feedback.warning("No recipe found");
                }
            },
            Err(e) => {
                self.feedback.error(format!("Search failed: {e}"));
            }
        }
    }

    pub async fn generate_meal_plan(&self) {
        let _loading = self.feedback.loading(Button::GeneratePlan);

        match self.api.meal_plan().await {
            Ok(reply) => {
                if let Some(plan) = reply.text() {
                    self.feedback.view().set_html(
                        Region::MealPlanContent,
                        suggestions_block(format_suggestions(plan)),
                    );
                    self.feedback
                        .success("Weekly meal plan generated successfully!");
                } else if let Some(error) = reply.error() {
                    self.feedback.error(error);
                } else {
                    self.feedback.error("Failed to generate meal plan");
                }
            }
            Err(e) => {
                self.feedback
                    .error(format!("Failed to generate meal plan: {e}"));
            }
        }
    }

    /// Cooking mode: fetch step-by-step instructions, fill the summary
    /// fields and bring the cooking panel into view.
    pub async fn start_cooking(&self, recipe: &str) {
        let recipe = recipe.trim();
        if recipe.is_empty() {
            self.feedback.error("Please enter a recipe name");
            return;
        }

        let _loading = self.feedback.loading(Button::StartCooking);

        let reply = match self.api.suggestions(&SuggestionFilters::cooking(recipe)).await {
            Ok(reply) => reply,
            Err(e) => {
                self.feedback.error(format!("Failed to start cooking: {e}"));
                return;
            }
        };

        let Some(text) = reply.text() else {
            self.feedback
                .error("Could not generate cooking instructions");
            return;
        };

        let view = self.feedback.view();
        view.set_visible(Region::CookingInterface, true);
        view.set_html(
            Region::CookingIngredients,
            suggestions_block(format!(
                "<h4>Ingredients for {}:</h4>{}",
                escape_html(recipe),
                format_suggestions(text)
            )),
        );

        let info = CookingInfo::extract(text);
        view.set_text(Region::TotalTime, info.total_time);
        view.set_text(Region::Difficulty, info.difficulty);
        view.set_text(Region::Servings, info.servings);

        view.scroll_into_view(Region::CookingInterface);

        info!(recipe, "Cooking mode started");
        self.feedback.success(format!(
            "Ready to cook {recipe}! Follow the instructions below."
        ));
    }
}
