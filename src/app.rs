// Page routing and event binding
// Every user interaction is a typed UiEvent handed to App::dispatch; page
// loads go through App::on_load. Nothing is looked up by global name.

use std::sync::Arc;

use tracing::debug;

use crate::config::ClientConfig;
use crate::controllers::{
    AuthController, DashboardController, PantryController, SuggestionsController,
};
use crate::feedback::Feedback;
use crate::http::{ApiClient, ClientError};
use crate::view::{Action, FormData, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Pantry,
    Suggestions,
    MealPlan,
    Cooking,
    Login,
    Register,
    Other,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path {
            "/" | "/dashboard" => Route::Dashboard,
            "/pantry" => Route::Pantry,
            "/suggestions" => Route::Suggestions,
            "/mealplan" => Route::MealPlan,
            "/cooking" => Route::Cooking,
            "/login" => Route::Login,
            "/register" => Route::Register,
            _ => Route::Other,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
            Route::Pantry => "/pantry",
            Route::Suggestions => "/suggestions",
            Route::MealPlan => "/mealplan",
            Route::Cooking => "/cooking",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Other => "/",
        }
    }
}

/// User interactions the page can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    LoginSubmitted(FormData),
    RegisterSubmitted(FormData),
    AddIngredientSubmitted(FormData),
    QuickAdd { input: String, storage_method: String },
    DeleteIngredient { id: String },
    SuggestionsSubmitted(FormData),
    GeneratePlan,
    SearchRecipe { query: String },
    StartCooking { recipe: String },
}

impl UiEvent {
    /// Short name for logs; form contents (passwords) are never logged.
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::LoginSubmitted(_) => "login",
            UiEvent::RegisterSubmitted(_) => "register",
            UiEvent::AddIngredientSubmitted(_) => "add_ingredient",
            UiEvent::QuickAdd { .. } => "quick_add",
            UiEvent::DeleteIngredient { .. } => "delete_ingredient",
            UiEvent::SuggestionsSubmitted(_) => "suggestions",
            UiEvent::GeneratePlan => "generate_plan",
            UiEvent::SearchRecipe { .. } => "search_recipe",
            UiEvent::StartCooking { .. } => "start_cooking",
        }
    }
}

impl From<Action> for UiEvent {
    fn from(action: Action) -> Self {
        match action {
            Action::DeleteIngredient { id, .. } => UiEvent::DeleteIngredient { id },
        }
    }
}

/// All controllers wired to one API client and one view.
pub struct App<V: View + 'static> {
    view: Arc<V>,
    pub auth: AuthController<V>,
    pub pantry: PantryController<V>,
    pub suggestions: SuggestionsController<V>,
    pub dashboard: DashboardController<V>,
}

impl<V: View + 'static> App<V> {
    pub fn new(config: ClientConfig, view: Arc<V>) -> Result<Self, ClientError> {
        let feedback = Feedback::new(Arc::clone(&view), &config);
        let api = ApiClient::new(config)?;

        Ok(Self {
            auth: AuthController::new(api.clone(), feedback.clone()),
            pantry: PantryController::new(api.clone(), feedback.clone()),
            suggestions: SuggestionsController::new(api.clone(), feedback.clone()),
            dashboard: DashboardController::new(api, feedback),
            view,
        })
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    /// Work a page does on its own when opened.
    pub async fn on_load(&self, path: &str) {
        let route = Route::from_path(path);
        debug!(path, ?route, "Page loaded");

        match route {
            Route::Dashboard => self.dashboard.init().await,
            Route::Pantry => self.pantry.load().await,
            _ => {}
        }
    }

    pub async fn dispatch(&self, event: UiEvent) {
        debug!(event = event.name(), "Dispatching");

        match event {
            UiEvent::LoginSubmitted(form) => {
                self.auth.submit_login(&form).await;
            }
            UiEvent::RegisterSubmitted(form) => {
                self.auth.submit_register(&form).await;
            }
            UiEvent::AddIngredientSubmitted(form) => {
                self.pantry.submit_add_form(&form).await;
            }
            UiEvent::QuickAdd {
                input,
                storage_method,
            } => {
                self.pantry.quick_add(&input, &storage_method).await;
            }
            UiEvent::DeleteIngredient { id } => {
                self.pantry.delete_ingredient(&id).await;
            }
            UiEvent::SuggestionsSubmitted(form) => {
                self.suggestions.submit_suggestions_form(&form).await;
            }
            UiEvent::GeneratePlan => self.suggestions.generate_meal_plan().await,
            UiEvent::SearchRecipe { query } => self.suggestions.search_recipe(&query).await,
            UiEvent::StartCooking { recipe } => self.suggestions.start_cooking(&recipe).await,
        }
    }
}
