// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing_subscriber::{fmt, EnvFilter};

use mealplan_client::{App, ClientConfig, MemoryView, Registration};

fn main() -> Result<()> {
    // Logs go to stderr; redirect it (2>mealplan.log) when using the UI
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = ClientConfig::load();
    let runtime = Runtime::new().context("Failed to start async runtime")?;

    if args.len() > 1 && args[1] == "register" {
        // One-shot registration
        run_register(&args[2..], config, &runtime)?;
    } else {
        // UI mode (default)
        run_ui_mode(config, runtime)?;
    }

    Ok(())
}

fn run_register(args: &[String], config: ClientConfig, runtime: &Runtime) -> Result<()> {
    if args.len() < 2 {
        eprintln!("Usage: mealplan register <username> <password> [diet_type] [cooking_skill]");
        std::process::exit(2);
    }

    let registration = Registration {
        username: args[0].clone(),
        password: args[1].clone(),
        diet_type: args.get(2).cloned().unwrap_or_else(|| "none".to_string()),
        dietary_restrictions: Vec::new(),
        preferred_cuisines: Vec::new(),
        cooking_skill: args.get(3).cloned().unwrap_or_else(|| "beginner".to_string()),
    };

    println!("📝 Registering {} at {}", registration.username, config.base_url);

    let view = Arc::new(MemoryView::new());
    let app = App::new(config, Arc::clone(&view))?;
    let ok = runtime.block_on(app.auth.register(&registration));

    if let Some(alert) = view.alert() {
        println!("{}", alert.message);
    }
    if !ok {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: ClientConfig, runtime: Runtime) -> Result<()> {
    println!("🍳 Connecting to {}...", config.base_url);

    let credentials = config.username.clone().zip(config.password.clone());
    let view = Arc::new(MemoryView::new());
    let app = App::new(config, Arc::clone(&view))?;

    match credentials {
        Some((username, password)) => {
            // The login redirect opens the dashboard once the UI is running
            if !runtime.block_on(app.auth.login(&username, &password)) {
                let message = view.alert().map(|a| a.message).unwrap_or_default();
                eprintln!("❌ {}", message);
                std::process::exit(1);
            }
        }
        None => {
            println!("   MEALPLAN_USERNAME/MEALPLAN_PASSWORD not set, continuing without login");
            runtime.block_on(app.on_load("/dashboard"));
        }
    }

    ui::run_ui(&app, &runtime)?;

    println!("\n✅ Bye!");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: ClientConfig, _runtime: Runtime) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or register an account: mealplan register <username> <password>");
    std::process::exit(1);
}
