use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod app;
mod catalog;
mod config;
mod handler;
mod state;
mod tui;
mod ui;

use api::GenerationClient;
use app::App;
use config::Config;
use tui::{AppEvent, EventHandler, Tui};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::load().unwrap_or_else(|_| Config::new());
    let base_url = config.base_url();
    tracing::info!(%base_url, "starting studio");

    // The client gets its base URL exactly once; it never changes afterwards.
    let client = GenerationClient::new(&base_url);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();
    let mut app = App::new(client);

    let result = run(&mut terminal, &mut events, &mut app).await;

    tui::restore()?;
    result
}

async fn run(terminal: &mut Tui, events: &mut EventHandler, app: &mut App) -> Result<()> {
    terminal.draw(|frame| ui::render(app, frame))?;

    while !app.should_quit {
        let Some(event) = events.next().await else {
            break;
        };

        let mut needs_redraw = false;
        match event {
            AppEvent::Key(key) => {
                handler::handle_key_event(app, key)?;
                needs_redraw = true;
            }
            AppEvent::Resize => {
                needs_redraw = true;
            }
            AppEvent::Tick => {
                app.poll_submissions();
                app.tick_animation();
                needs_redraw = app.submitting();
            }
        }

        // Observable state changes force a redraw even when the event itself
        // would not (task outcomes land on the Tick path).
        if !app.state.take_changes().is_empty() {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|frame| ui::render(app, frame))?;
        }
    }

    Ok(())
}

/// Initialize tracing with optional file output.
///
/// Logging is disabled by default so the TUI display stays clean. Set
/// `STUDIO_LOG` to a file path to enable it; `RUST_LOG` controls the filter.
fn init_tracing() {
    let Ok(log_path) = std::env::var("STUDIO_LOG") else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&log_path) else {
        eprintln!("Warning: Failed to create log file: {}", log_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
