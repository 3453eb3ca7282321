// Page abstraction
// Controllers paint into a View instead of looking elements up by id. Every
// element a controller touches is a typed Region/Button/Form/Input.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use tracing::trace;

use crate::feedback::Alert;

/// Content areas a controller can paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    PantryItems,
    PantryOverview,
    SuggestionsContent,
    MealPlanContent,
    QuickRecipeResult,
    CookingInterface,
    CookingIngredients,
    UserWelcome,
    UserDiet,
    UserSkill,
    PantryCount,
    ExpiringCount,
    RecipesTried,
    DaysStreak,
    TotalTime,
    Difficulty,
    Servings,
}

impl Region {
    /// Element id in the server-rendered templates.
    pub fn id(&self) -> &'static str {
        match self {
            Region::PantryItems => "pantry-items",
            Region::PantryOverview => "pantry-overview",
            Region::SuggestionsContent => "suggestions-content",
            Region::MealPlanContent => "meal-plan-content",
            Region::QuickRecipeResult => "quick-recipe-result",
            Region::CookingInterface => "cooking-interface",
            Region::CookingIngredients => "cooking-ingredients",
            Region::UserWelcome => "user-welcome",
            Region::UserDiet => "user-diet",
            Region::UserSkill => "user-skill",
            Region::PantryCount => "pantry-count",
            Region::ExpiringCount => "expiring-count",
            Region::RecipesTried => "recipes-tried",
            Region::DaysStreak => "days-streak",
            Region::TotalTime => "total-time",
            Region::Difficulty => "difficulty",
            Region::Servings => "servings",
        }
    }
}

/// Buttons that show a loading state while their request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    LoginSubmit,
    RegisterSubmit,
    AddIngredientSubmit,
    GetSuggestions,
    GeneratePlan,
    StartCooking,
}

impl Button {
    pub fn default_label(&self) -> &'static str {
        match self {
            Button::LoginSubmit => "Login",
            Button::RegisterSubmit => "Register",
            Button::AddIngredientSubmit => "Add Ingredient",
            Button::GetSuggestions => "Get Suggestions",
            Button::GeneratePlan => "Generate Plan",
            Button::StartCooking => "Start Cooking",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form {
    AddIngredient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    QuickAdd,
}

/// Interactive handle attached to painted content (replaces inline onclick).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    DeleteIngredient { id: String, label: String },
}

/// Submitted form fields. Keeps insertion order and repeated names, like a
/// browser form submission with multi-select inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value submitted under `name`, in order.
    pub fn get_all(&self, name: &str) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (name, value) in iter {
            form.append(name, value);
        }
        form
    }
}

/// The page as seen by controllers. Implementations use interior
/// mutability so one view can be shared with spawned timers.
pub trait View: Send + Sync {
    fn set_html(&self, region: Region, html: String);
    fn set_text(&self, region: Region, text: String);
    fn set_visible(&self, region: Region, visible: bool);
    fn scroll_into_view(&self, region: Region);

    /// Replace the interactive handles attached to a region.
    fn bind_actions(&self, region: Region, actions: Vec<Action>);

    fn button_label(&self, button: Button) -> String;
    fn set_button(&self, button: Button, label: String, enabled: bool);

    /// Prepend an alert to the main content area.
    fn insert_alert(&self, alert: Alert);
    fn remove_alert(&self, id: u64);
    fn clear_alerts(&self);

    /// Blocking yes/no question to the user.
    fn confirm(&self, prompt: &str) -> bool;
    fn navigate(&self, path: &str);
    fn reset_form(&self, form: Form);
    fn clear_input(&self, input: Input);
}

/// How many entries each recording list (prompts, scrolls, resets) keeps.
pub const HISTORY_LIMIT: usize = 64;

fn record<T>(list: &mut Vec<T>, item: T) {
    if list.len() >= HISTORY_LIMIT {
        list.remove(0);
    }
    list.push(item);
}

#[derive(Debug, Default)]
struct PageState {
    html: HashMap<Region, String>,
    text: HashMap<Region, String>,
    visible: HashMap<Region, bool>,
    actions: HashMap<Region, Vec<Action>>,
    buttons: HashMap<Button, (String, bool)>,
    alerts: Vec<Alert>,
    scrolled: Vec<Region>,
    confirm_answers: VecDeque<bool>,
    prompts: Vec<String>,
    location: Option<String>,
    navigations: Vec<String>,
    form_resets: Vec<Form>,
    cleared_inputs: Vec<Input>,
}

/// In-memory page. Backs the terminal front-end and the tests.
#[derive(Debug, Default)]
pub struct MemoryView {
    state: Mutex<PageState>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn html(&self, region: Region) -> Option<String> {
        self.state().html.get(&region).cloned()
    }

    pub fn text(&self, region: Region) -> Option<String> {
        self.state().text.get(&region).cloned()
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.state().visible.get(&region).copied().unwrap_or(false)
    }

    pub fn actions(&self, region: Region) -> Vec<Action> {
        self.state().actions.get(&region).cloned().unwrap_or_default()
    }

    /// Label and enabled flag; untouched buttons report their default label.
    pub fn button(&self, button: Button) -> (String, bool) {
        self.state()
            .buttons
            .get(&button)
            .cloned()
            .unwrap_or_else(|| (button.default_label().to_string(), true))
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.state().alerts.clone()
    }

    pub fn alert(&self) -> Option<Alert> {
        self.state().alerts.first().cloned()
    }

    pub fn scrolled(&self) -> Vec<Region> {
        self.state().scrolled.clone()
    }

    /// Answer for the next `confirm` call. Unanswered prompts are declined.
    pub fn queue_confirm(&self, answer: bool) {
        self.state().confirm_answers.push_back(answer);
    }

    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    pub fn location(&self) -> Option<String> {
        self.state().location.clone()
    }

    /// Navigations requested since the last call, oldest first.
    pub fn take_navigations(&self) -> Vec<String> {
        std::mem::take(&mut self.state().navigations)
    }

    pub fn form_resets(&self) -> Vec<Form> {
        self.state().form_resets.clone()
    }

    pub fn cleared_inputs(&self) -> Vec<Input> {
        self.state().cleared_inputs.clone()
    }
}

impl View for MemoryView {
    fn set_html(&self, region: Region, html: String) {
        trace!(region = region.id(), len = html.len(), "set_html");
        self.state().html.insert(region, html);
    }

    fn set_text(&self, region: Region, text: String) {
        trace!(region = region.id(), %text, "set_text");
        self.state().text.insert(region, text);
    }

    fn set_visible(&self, region: Region, visible: bool) {
        self.state().visible.insert(region, visible);
    }

    fn scroll_into_view(&self, region: Region) {
        record(&mut self.state().scrolled, region);
    }

    fn bind_actions(&self, region: Region, actions: Vec<Action>) {
        self.state().actions.insert(region, actions);
    }

    fn button_label(&self, button: Button) -> String {
        self.button(button).0
    }

    fn set_button(&self, button: Button, label: String, enabled: bool) {
        self.state().buttons.insert(button, (label, enabled));
    }

    fn insert_alert(&self, alert: Alert) {
        self.state().alerts.insert(0, alert);
    }

    fn remove_alert(&self, id: u64) {
        self.state().alerts.retain(|alert| alert.id != id);
    }

    fn clear_alerts(&self) {
        self.state().alerts.clear();
    }

    fn confirm(&self, prompt: &str) -> bool {
        let mut state = self.state();
        record(&mut state.prompts, prompt.to_string());
        state.confirm_answers.pop_front().unwrap_or(false)
    }

    fn navigate(&self, path: &str) {
        let mut state = self.state();
        state.location = Some(path.to_string());
        record(&mut state.navigations, path.to_string());
    }

    fn reset_form(&self, form: Form) {
        record(&mut self.state().form_resets, form);
    }

    fn clear_input(&self, input: Input) {
        record(&mut self.state().cleared_inputs, input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_data_repeated_names() {
        let form: FormData = [("cuisine", "thai"), ("cuisine", "greek"), ("meal_type", "dinner")]
            .into_iter()
            .collect();

        assert_eq!(form.get("cuisine"), Some("thai"));
        assert_eq!(form.get_all("cuisine"), vec!["thai", "greek"]);
        assert_eq!(form.get("missing"), None);
        assert!(form.get_all("missing").is_empty());
    }

    #[test]
    fn test_confirm_defaults_to_decline() {
        let view = MemoryView::new();
        view.queue_confirm(true);

        assert!(view.confirm("first?"));
        assert!(!view.confirm("second?"));
        assert_eq!(view.prompts(), vec!["first?", "second?"]);
    }

    #[test]
    fn test_recordings_keep_only_recent_entries() {
        let view = MemoryView::new();
        for i in 0..HISTORY_LIMIT + 10 {
            view.confirm(&format!("prompt {i}"));
            view.scroll_into_view(Region::CookingInterface);
            view.clear_input(Input::QuickAdd);
        }

        let prompts = view.prompts();
        assert_eq!(prompts.len(), HISTORY_LIMIT);
        assert_eq!(prompts[0], "prompt 10");
        assert_eq!(prompts.last().map(String::as_str), Some("prompt 73"));
        assert_eq!(view.scrolled().len(), HISTORY_LIMIT);
        assert_eq!(view.cleared_inputs().len(), HISTORY_LIMIT);
    }

    #[test]
    fn test_untouched_button_reports_default() {
        let view = MemoryView::new();
        assert_eq!(view.button(Button::GeneratePlan), ("Generate Plan".to_string(), true));
    }
}
