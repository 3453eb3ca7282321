use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mealplan_client::{
    to_plain_text, Action, AlertKind, App, MemoryView, Region, Route, UiEvent,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tokio::runtime::Runtime;

const STORAGE_METHODS: [&str; 3] = ["pantry", "fridge", "freezer"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Pantry,
    Suggestions,
    MealPlan,
    Cooking,
}

impl Page {
    const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Pantry,
        Page::Suggestions,
        Page::MealPlan,
        Page::Cooking,
    ];

    pub fn next(&self) -> Self {
        match self {
            Page::Dashboard => Page::Pantry,
            Page::Pantry => Page::Suggestions,
            Page::Suggestions => Page::MealPlan,
            Page::MealPlan => Page::Cooking,
            Page::Cooking => Page::Dashboard,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Dashboard => Page::Cooking,
            Page::Pantry => Page::Dashboard,
            Page::Suggestions => Page::Pantry,
            Page::MealPlan => Page::Suggestions,
            Page::Cooking => Page::MealPlan,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Pantry => "Pantry",
            Page::Suggestions => "Suggestions",
            Page::MealPlan => "Meal Plan",
            Page::Cooking => "Cooking",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Page::Dashboard => Route::Dashboard,
            Page::Pantry => Route::Pantry,
            Page::Suggestions => Route::Suggestions,
            Page::MealPlan => Route::MealPlan,
            Page::Cooking => Route::Cooking,
        }
    }

    fn from_route(route: Route) -> Option<Self> {
        Page::ALL.into_iter().find(|page| page.route() == route)
    }

    /// What typing into the prompt does on this page, if anything.
    fn prompt_label(&self) -> Option<&'static str> {
        match self {
            Page::Pantry => Some("Quick add (e.g. 2 kg tomatoes)"),
            Page::Suggestions => Some("Search recipe"),
            Page::Cooking => Some("Recipe to cook"),
            Page::Dashboard | Page::MealPlan => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Prompt(String),
    Confirm(Action),
}

pub struct UiState {
    pub current_page: Page,
    pub pantry_state: ListState,
    pub mode: Mode,
    pub storage_index: usize,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            current_page: Page::Dashboard,
            pantry_state: ListState::default(),
            mode: Mode::Normal,
            storage_index: 0,
        }
    }

    fn storage_method(&self) -> &'static str {
        STORAGE_METHODS[self.storage_index % STORAGE_METHODS.len()]
    }

    fn selected_action(&self, view: &MemoryView) -> Option<Action> {
        let actions = view.actions(Region::PantryItems);
        self.pantry_state
            .selected()
            .and_then(|i| actions.get(i).cloned())
    }

    fn move_selection(&mut self, view: &MemoryView, forward: bool) {
        let len = view.actions(Region::PantryItems).len();
        if len == 0 {
            self.pantry_state.select(None);
            return;
        }
        let i = match self.pantry_state.selected() {
            Some(i) if forward => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.pantry_state.select(Some(i));
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run_ui(app: &App<MemoryView>, runtime: &Runtime) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let mut state = UiState::new();
    let res = run_app(&mut terminal, app, runtime, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn open_page(app: &App<MemoryView>, runtime: &Runtime, state: &mut UiState, page: Page) {
    state.current_page = page;
    state.mode = Mode::Normal;
    runtime.block_on(app.on_load(page.route().path()));
    state.move_selection(app.view(), true);
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &App<MemoryView>,
    runtime: &Runtime,
    state: &mut UiState,
) -> io::Result<()> {
    let view = app.view();

    loop {
        // Redirects requested by controllers (e.g. after login)
        for path in view.take_navigations() {
            if let Some(page) = Page::from_route(Route::from_path(&path)) {
                open_page(app, runtime, state, page);
            }
        }

        terminal.draw(|f| ui(f, view, state))?;

        // Poll so expiring alerts and delayed redirects get redrawn
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match state.mode.clone() {
            Mode::Prompt(mut input) => match key.code {
                KeyCode::Esc => state.mode = Mode::Normal,
                KeyCode::Enter => {
                    state.mode = Mode::Normal;
                    if let Some(event) = prompt_event(state, input) {
                        runtime.block_on(app.dispatch(event));
                    }
                }
                KeyCode::Backspace => {
                    input.pop();
                    state.mode = Mode::Prompt(input);
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    state.mode = Mode::Prompt(input);
                }
                _ => {}
            },
            Mode::Confirm(action) => {
                state.mode = Mode::Normal;
                if key.code == KeyCode::Char('y') {
                    view.queue_confirm(true);
                    runtime.block_on(app.dispatch(UiEvent::from(action)));
                    state.move_selection(view, true);
                }
            }
            Mode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    let page = if key.modifiers.contains(KeyModifiers::SHIFT) {
                        state.current_page.previous()
                    } else {
                        state.current_page.next()
                    };
                    open_page(app, runtime, state, page);
                }
                KeyCode::BackTab => {
                    let page = state.current_page.previous();
                    open_page(app, runtime, state, page);
                }
                KeyCode::Char('r') => {
                    let page = state.current_page;
                    open_page(app, runtime, state, page);
                }
                KeyCode::Char('/') if state.current_page.prompt_label().is_some() => {
                    state.mode = Mode::Prompt(String::new());
                }
                KeyCode::Char('s') if state.current_page == Page::Suggestions => {
                    runtime.block_on(app.dispatch(UiEvent::SuggestionsSubmitted(
                        Default::default(),
                    )));
                }
                KeyCode::Char('g') if state.current_page == Page::MealPlan => {
                    runtime.block_on(app.dispatch(UiEvent::GeneratePlan));
                }
                KeyCode::Char('m') if state.current_page == Page::Pantry => {
                    state.storage_index = (state.storage_index + 1) % STORAGE_METHODS.len();
                }
                KeyCode::Char('d') if state.current_page == Page::Pantry => {
                    if let Some(action) = state.selected_action(view) {
                        state.mode = Mode::Confirm(action);
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => state.move_selection(view, true),
                KeyCode::Up | KeyCode::Char('k') => state.move_selection(view, false),
                _ => {}
            },
        }
    }
}

fn prompt_event(state: &UiState, input: String) -> Option<UiEvent> {
    match state.current_page {
        Page::Pantry => Some(UiEvent::QuickAdd {
            input,
            storage_method: state.storage_method().to_string(),
        }),
        Page::Suggestions => Some(UiEvent::SearchRecipe { query: input }),
        Page::Cooking => Some(UiEvent::StartCooking { recipe: input }),
        Page::Dashboard | Page::MealPlan => None,
    }
}

fn ui(f: &mut Frame, view: &MemoryView, state: &mut UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Alert / prompt bar
        ])
        .split(f.size());

    render_header(f, chunks[0], state);

    match state.current_page {
        Page::Dashboard => render_dashboard(f, chunks[1], view),
        Page::Pantry => render_pantry(f, chunks[1], view, state),
        Page::Suggestions => render_suggestions(f, chunks[1], view),
        Page::MealPlan => render_text_region(
            f,
            chunks[1],
            view,
            Region::MealPlanContent,
            "Weekly Plan",
            "Press 'g' to generate a meal plan",
        ),
        Page::Cooking => render_cooking(f, chunks[1], view),
    }

    render_status_bar(f, chunks[2], view, state);
}

fn render_header(f: &mut Frame, area: Rect, state: &UiState) {
    let mut tab_spans = vec![];
    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == state.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn region_text(view: &MemoryView, region: Region) -> String {
    view.text(region).unwrap_or_else(|| "-".to_string())
}

fn render_dashboard(f: &mut Frame, area: Rect, view: &MemoryView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(Span::styled(
            view.text(Region::UserWelcome).unwrap_or_else(|| "Welcome".to_string()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Diet: ", label),
            Span::styled(region_text(view, Region::UserDiet), value),
            Span::styled("   Skill: ", label),
            Span::styled(region_text(view, Region::UserSkill), value),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Pantry items: ", label),
            Span::styled(region_text(view, Region::PantryCount), value),
            Span::styled("   Expiring soon: ", label),
            Span::styled(region_text(view, Region::ExpiringCount), value),
        ]),
        Line::from(vec![
            Span::styled("Recipes tried: ", label),
            Span::styled(region_text(view, Region::RecipesTried), value),
            Span::styled("   Day streak: ", label),
            Span::styled(region_text(view, Region::DaysStreak), value),
        ]),
    ];

    let profile = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Overview"));
    f.render_widget(profile, chunks[0]);

    let overview = view
        .html(Region::PantryOverview)
        .map(|html| to_plain_text(&html.replace("</span>", "</span>  ")))
        .unwrap_or_default();
    let pantry = Paragraph::new(overview)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("In your pantry"));
    f.render_widget(pantry, chunks[1]);
}

fn render_pantry(f: &mut Frame, area: Rect, view: &MemoryView, state: &mut UiState) {
    let actions = view.actions(Region::PantryItems);
    let title = format!("Pantry (storage for new items: {})", state.storage_method());

    if actions.is_empty() {
        let text = view
            .html(Region::PantryItems)
            .map(|html| to_plain_text(&html))
            .unwrap_or_default();
        let empty = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = actions
        .iter()
        .map(|action| match action {
            Action::DeleteIngredient { label, .. } => ListItem::new(label.clone()),
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut state.pantry_state);
}

fn render_suggestions(f: &mut Frame, area: Rect, view: &MemoryView) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_text_region(
        f,
        chunks[0],
        view,
        Region::SuggestionsContent,
        "Meal Ideas",
        "Press 's' for suggestions from your pantry",
    );
    render_text_region(
        f,
        chunks[1],
        view,
        Region::QuickRecipeResult,
        "Recipe Search",
        "Press '/' to search for a recipe",
    );
}

fn render_cooking(f: &mut Frame, area: Rect, view: &MemoryView) {
    if !view.is_visible(Region::CookingInterface) {
        let hint = Paragraph::new("Press '/' and enter a recipe to start cooking")
            .block(Block::default().borders(Borders::ALL).title("Cooking Mode"));
        f.render_widget(hint, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::Yellow);
    let summary = Paragraph::new(Line::from(vec![
        Span::styled("Total time: ", label),
        Span::styled(region_text(view, Region::TotalTime), value),
        Span::styled("   Difficulty: ", label),
        Span::styled(region_text(view, Region::Difficulty), value),
        Span::styled("   Servings: ", label),
        Span::styled(region_text(view, Region::Servings), value),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Cooking Mode"));
    f.render_widget(summary, chunks[0]);

    render_text_region(
        f,
        chunks[1],
        view,
        Region::CookingIngredients,
        "Instructions",
        "",
    );
}

fn render_text_region(
    f: &mut Frame,
    area: Rect,
    view: &MemoryView,
    region: Region,
    title: &str,
    placeholder: &str,
) {
    let text = view
        .html(region)
        .map(|html| to_plain_text(&html))
        .unwrap_or_else(|| placeholder.to_string());

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, view: &MemoryView, state: &UiState) {
    let line = match &state.mode {
        Mode::Prompt(input) => Line::from(vec![
            Span::styled(
                format!("{}: ", state.current_page.prompt_label().unwrap_or("Input")),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(input.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Mode::Confirm(Action::DeleteIngredient { label, .. }) => Line::from(Span::styled(
            format!("Delete {}? (y/n)", label),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Mode::Normal => match view.alert() {
            Some(alert) => {
                let color = match alert.kind {
                    AlertKind::Success => Color::Green,
                    AlertKind::Error => Color::Red,
                    AlertKind::Warning => Color::Yellow,
                    AlertKind::Info => Color::Cyan,
                };
                Line::from(Span::styled(alert.message, Style::default().fg(color)))
            }
            None => Line::from(Span::styled(
                "Tab: pages | /: input | s: suggest | g: plan | d: delete | m: storage | r: reload | q: quit",
                Style::default().fg(Color::DarkGray),
            )),
        },
    };

    let bar = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, area);
}
