// Feature controllers
// One per user workflow. Each validates its input, holds the relevant
// button in a loading state, calls the API and paints the result.

pub mod auth;
pub mod dashboard;
pub mod pantry;
pub mod suggestions;

pub use auth::AuthController;
pub use dashboard::DashboardController;
pub use pantry::{IngredientForm, PantryController};
pub use suggestions::SuggestionsController;
