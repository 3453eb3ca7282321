// Meal Planner Client - Core Library
// API client, suggestion formatter and page controllers, shared by the
// terminal front-end and the tests

pub mod config;
pub mod models;
pub mod http;
pub mod view;
pub mod feedback;     // Alert banner + button loading states
pub mod format;       // Suggestion text -> markup
pub mod cooking;      // Cooking-mode summary extraction
pub mod controllers;
pub mod app;          // Routing + typed event dispatch

// Re-export commonly used types
pub use config::ClientConfig;
pub use http::{ApiClient, ClientError, Method};
pub use models::{
    ActionResponse, Credentials, DashboardStats, Ingredient, MealPlanResponse, NewIngredient,
    PantryListing, ParsedIngredient, Registration, StatsResponse, SuggestionFilters,
    SuggestionsResponse, UserProfile, UserResponse,
};
pub use view::{Action, Button, Form, FormData, Input, MemoryView, Region, View};
pub use feedback::{Alert, AlertKind, Feedback, LoadingGuard, LOADING_LABEL};
pub use format::{escape_html, format_suggestions, to_plain_text};
pub use cooking::CookingInfo;
pub use controllers::{
    AuthController, DashboardController, IngredientForm, PantryController,
    SuggestionsController,
};
pub use app::{App, Route, UiEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
