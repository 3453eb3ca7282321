// Dashboard page load: profile, counters, pantry preview.
// Failures here are logged only; they never interrupt the page.

use tracing::error;

use crate::feedback::Feedback;
use crate::format::escape_html;
use crate::http::ApiClient;
use crate::models::{Ingredient, PantryListing, StatsResponse, UserResponse};
use crate::view::{Region, View};

/// Preview markup: the first `limit` names, then a "+N more" tag.
pub fn render_overview(items: &[Ingredient], limit: usize) -> String {
    let mut html: String = items
        .iter()
        .take(limit)
        .map(|item| {
            format!(
                r#"<span class="pantry-item">{}</span>"#,
                escape_html(&item.short_name())
            )
        })
        .collect();

    if items.len() > limit {
        html.push_str(&format!(
            r#"<span class="pantry-item">+{} more</span>"#,
            items.len() - limit
        ));
    }

    html
}

pub struct DashboardController<V: View + 'static> {
    api: ApiClient,
    feedback: Feedback<V>,
}

impl<V: View + 'static> DashboardController<V> {
    pub fn new(api: ApiClient, feedback: Feedback<V>) -> Self {
        Self { api, feedback }
    }

    /// Runs the three loads one after another. Stops early, painting
    /// nothing, if the profile can't be read.
    pub async fn init(&self) {
        let profile = match self.api.user().await {
            Ok(UserResponse::Profile(profile)) => profile,
            Ok(UserResponse::Failed { error }) => {
                error!("User error: {error}");
                return;
            }
            Err(e) => {
                error!("Failed to initialize dashboard: {e}");
                return;
            }
        };

        let view = self.feedback.view();
        view.set_text(Region::UserWelcome, format!("Welcome, {}", profile.username));
        view.set_text(Region::UserDiet, profile.diet_label().to_string());
        view.set_text(Region::UserSkill, profile.skill_label().to_string());

        self.load_stats().await;
        self.load_overview().await;
    }

    pub async fn load_stats(&self) {
        let stats = match self.api.dashboard_stats().await {
            Ok(StatsResponse::Stats(stats)) => stats,
            Ok(StatsResponse::Failed { error }) => {
                error!("Stats error: {error}");
                return;
            }
            Err(e) => {
                error!("Error loading dashboard stats: {e}");
                return;
            }
        };

        let view = self.feedback.view();
        view.set_text(Region::PantryCount, stats.pantry_count().to_string());
        view.set_text(Region::ExpiringCount, stats.expiring_count().to_string());
        view.set_text(Region::RecipesTried, stats.recipes_tried().to_string());
        view.set_text(Region::DaysStreak, stats.days_streak().to_string());
    }

    pub async fn load_overview(&self) {
        let items = match self.api.list_ingredients_unchecked().await {
            Ok(PantryListing::Items(items)) => items,
            Ok(PantryListing::Failed { .. }) => return,
            Err(e) => {
                error!("Error loading pantry overview: {e}");
                return;
            }
        };

        if items.is_empty() {
            return;
        }

        let limit = self.api.config().overview_limit;
        self.feedback
            .view()
            .set_html(Region::PantryOverview, render_overview(&items, limit));
    }
}
