//! Terminal User Interface Module
//!
//! Interactive front-end for MED-LANE, built with Ratatui.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  💊 MED-LANE Drug Repurposing                  ☀️ [Ctrl+T]      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Dashboard        search box, drug cards, research history      │
//! │  Research         drug details, modification input, Yes / No    │
//! │  AgentProcessing  agent cards + progress line                   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  status │ [Enter] ... [Ctrl+Q] Quit [F1] Help                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Key presses become [`AppAction`]s, the [`App`] turns them into
//! controller transitions, and every frame is drawn from a fresh
//! [`crate::screen::Screen`] projection.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, AppEvent, Focus};
pub use event::{AppAction, EventHandler};

use crate::config::Config;
use crate::settings::SettingsStorage;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{error, info};

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI application
pub async fn run(config: Config) -> anyhow::Result<()> {
    info!("Starting TUI mode");

    let settings_storage = SettingsStorage::with_path(config.data_dir());
    let settings = settings_storage.load().await;
    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms);

    let mut app = App::new(config, settings, settings_storage);
    let mut events = EventHandler::new(tick_rate);

    let mut terminal = init_terminal()?;
    let result = run_app(&mut terminal, &mut app, &mut events).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        error!("Failed to restore terminal: {}", e);
    }

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    events: &mut EventHandler,
) -> anyhow::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Ticks arrive every tick_rate, so runner events are drained at least that often
        let Some(action) = events.next().await else {
            break;
        };
        app.handle_action(action).await;

        // Drain any queued input before redrawing
        while let Some(action) = events.try_next() {
            app.handle_action(action).await;
        }

        app.poll_events();
    }

    info!("TUI exited normally");
    Ok(())
}
