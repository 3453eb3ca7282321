// Pantry workflows: list, add (form or quick-add text), delete

use tracing::{error, info};

use crate::feedback::Feedback;
use crate::format::escape_html;
use crate::http::{ApiClient, ClientError};
use crate::models::{Ingredient, NewIngredient, PantryListing};
use crate::view::{Action, Button, Form, FormData, Input, Region, View};

pub const EMPTY_PANTRY_HTML: &str = r#"<p class="text-center" style="color: var(--gray-light); padding: 2rem;">No ingredients in your pantry yet. Add some to get started!</p>"#;
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this ingredient?";
pub const PARSE_HINT: &str = r#"Could not parse ingredient. Please use format: "2 kg tomatoes""#;

/// Raw add-ingredient form fields, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientForm {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub storage_method: String,
}

impl IngredientForm {
    pub fn from_form(form: &FormData) -> Self {
        let field = |name: &str| form.get(name).unwrap_or_default().to_string();
        Self {
            name: field("name"),
            quantity: field("quantity"),
            unit: field("unit"),
            storage_method: field("storage_method"),
        }
    }

    /// Checks done before anything is sent: a name, and a quantity that
    /// reads as a finite number.
    pub fn validate(&self) -> Result<NewIngredient, ClientError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ClientError::Validation(
                "Please enter an ingredient name".to_string(),
            ));
        }

        let quantity = self
            .quantity
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|q| q.is_finite())
            .ok_or_else(|| ClientError::Validation("Please enter a valid quantity".to_string()))?;

        Ok(NewIngredient {
            name: name.to_string(),
            quantity,
            unit: self.unit.trim().to_string(),
            storage_method: self.storage_method.clone(),
        })
    }
}

pub fn render_row(ingredient: &Ingredient) -> String {
    let expiry = ingredient
        .expiry_date
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!(" • Expires: {}", escape_html(d)))
        .unwrap_or_default();

    format!(
        r#"<div class="pantry-item"><div><div class="pantry-item-name">{name}</div><div class="pantry-item-details">{quantity} {unit} • {storage}{expiry}</div></div><div class="pantry-item-actions"><button class="btn btn-outline btn-sm" data-action="delete" data-id="{id}" title="Delete"><i class="fas fa-trash"></i></button></div></div>"#,
        name = escape_html(&ingredient.display_name()),
        quantity = ingredient.quantity,
        unit = escape_html(&ingredient.unit),
        storage = escape_html(ingredient.storage()),
        id = escape_html(&ingredient.id),
    )
}

pub struct PantryController<V: View + 'static> {
    api: ApiClient,
    feedback: Feedback<V>,
}

impl<V: View + 'static> PantryController<V> {
    pub fn new(api: ApiClient, feedback: Feedback<V>) -> Self {
        Self { api, feedback }
    }

    /// Fetch the pantry and repaint the list with one delete handle per row.
    pub async fn load(&self) {
        let view = self.feedback.view();

        let items = match self.api.list_ingredients().await {
            Ok(PantryListing::Items(items)) => items,
            Ok(PantryListing::Failed { error }) => {
                view.set_html(
                    Region::PantryItems,
                    format!(r#"<p class="text-center">Error: {}</p>"#, escape_html(&error)),
                );
                view.bind_actions(Region::PantryItems, Vec::new());
                return;
            }
            Err(e) => {
                error!("Error loading pantry: {e}");
                view.set_html(
                    Region::PantryItems,
                    format!(
                        r#"<p class="text-center">Error loading pantry: {}</p>"#,
                        escape_html(&e.to_string())
                    ),
                );
                view.bind_actions(Region::PantryItems, Vec::new());
                return;
            }
        };

        if items.is_empty() {
            view.set_html(Region::PantryItems, EMPTY_PANTRY_HTML.to_string());
            view.bind_actions(Region::PantryItems, Vec::new());
            return;
        }

        let html: String = items.iter().map(render_row).collect();
        let actions = items
            .iter()
            .map(|item| Action::DeleteIngredient {
                id: item.id.clone(),
                label: item.display_name(),
            })
            .collect();

        view.set_html(Region::PantryItems, html);
        view.bind_actions(Region::PantryItems, actions);
    }

    /// Add-ingredient form submit: rejected locally unless it validates.
    pub async fn submit_add_form(&self, form: &FormData) -> bool {
        match IngredientForm::from_form(form).validate() {
            Ok(ingredient) => self.add_ingredient(&ingredient).await,
            Err(e) => {
                self.feedback.error(e.to_string());
                false
            }
        }
    }

    pub async fn add_ingredient(&self, ingredient: &NewIngredient) -> bool {
        let _loading = self.feedback.loading(Button::AddIngredientSubmit);

        match self.api.add_ingredient(ingredient).await {
            Ok(reply) if reply.success => {
                info!(name = %ingredient.name, "Ingredient added");
                self.feedback.success("Ingredient added successfully!");
                self.load().await;
                self.feedback.view().reset_form(Form::AddIngredient);
                true
            }
            Ok(reply) => {
                self.feedback.error(
                    reply
                        .error
                        .unwrap_or_else(|| "Failed to add ingredient".to_string()),
                );
                false
            }
            Err(e) => {
                self.feedback.error(format!("Failed to add ingredient: {e}"));
                false
            }
        }
    }

    /// Delete after the user confirms; declining sends nothing.
    pub async fn delete_ingredient(&self, id: &str) -> bool {
        if !self.feedback.view().confirm(DELETE_PROMPT) {
            return false;
        }

        match self.api.delete_ingredient(id).await {
            Ok(reply) if reply.success => {
                info!(id, "Ingredient deleted");
                self.feedback.success("Ingredient deleted successfully!");
                self.load().await;
                true
            }
            Ok(reply) => {
                self.feedback.error(
                    reply
                        .error
                        .unwrap_or_else(|| "Failed to delete ingredient".to_string()),
                );
                false
            }
            Err(e) => {
                self.feedback
                    .error(format!("Failed to delete ingredient: {e}"));
                false
            }
        }
    }

    /// Free-text add ("2 kg tomatoes"): the server parses it, then the
    /// normal add workflow runs with the chosen storage method.
    pub async fn quick_add(&self, input: &str, storage_method: &str) -> bool {
        let input = input.trim();
        if input.is_empty() {
            self.feedback.error("Please enter ingredient details");
            return false;
        }

        let parsed = match self.api.parse_ingredient(input).await {
            Ok(parsed) => parsed,
            Err(e) => {
                self.feedback
                    .error(format!("Failed to parse ingredient: {e}"));
                return false;
            }
        };

        let ingredient = match (parsed.success, parsed.name, parsed.quantity) {
            (true, Some(name), Some(quantity)) => NewIngredient {
                name,
                quantity,
                unit: parsed.unit.unwrap_or_default(),
                storage_method: storage_method.to_string(),
            },
            _ => {
                self.feedback.error(PARSE_HINT);
                return false;
            }
        };

        // A rejected add leaves the text in place for another try
        let added = self.add_ingredient(&ingredient).await;
        if added {
            self.feedback.view().clear_input(Input::QuickAdd);
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, quantity: &str) -> IngredientForm {
        IngredientForm {
            name: name.to_string(),
            quantity: quantity.to_string(),
            unit: "kg".to_string(),
            storage_method: "fridge".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_decimal_quantity() {
        let ingredient = form(" Tomatoes ", "1.5").validate().unwrap();
        assert_eq!(ingredient.name, "Tomatoes");
        assert_eq!(ingredient.quantity, 1.5);
    }

    #[test]
    fn test_validate_rejects_non_numeric_quantity() {
        let err = form("Tomatoes", "abc").validate().unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(err.to_string(), "Please enter a valid quantity");

        assert!(form("Tomatoes", "").validate().is_err());
        assert!(form("Tomatoes", "NaN").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let err = form("   ", "2").validate().unwrap_err();
        assert_eq!(err.to_string(), "Please enter an ingredient name");
    }

    #[test]
    fn test_row_shows_details_and_expiry() {
        let item = Ingredient {
            id: "milk".to_string(),
            name: Some("Milk".to_string()),
            quantity: 2.0,
            unit: "l".to_string(),
            storage_method: Some("fridge".to_string()),
            expiry_date: Some("2026-10-20".to_string()),
        };

        let row = render_row(&item);
        assert!(row.contains(r#"<div class="pantry-item-name">Milk</div>"#));
        assert!(row.contains("2 l • fridge • Expires: 2026-10-20"));
        assert!(row.contains(r#"data-id="milk""#));
    }

    #[test]
    fn test_row_escapes_names() {
        let item = Ingredient {
            id: "x".to_string(),
            name: Some("<img src=x>".to_string()),
            quantity: 1.0,
            unit: String::new(),
            storage_method: None,
            expiry_date: None,
        };

        let row = render_row(&item);
        assert!(row.contains("&lt;img src=x&gt;"));
        assert!(row.contains("1  • pantry</div>"));
    }
}
