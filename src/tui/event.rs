//! Event Handling
//!
//! Handles keyboard and timer events for the TUI.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::warn;

/// Everything the main loop reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Quit the application
    Quit,
    /// Ctrl+C, leaves immediately
    ForceQuit,
    /// Enter: select drug / confirm (Yes) / return to dashboard
    Submit,
    /// Esc: close help, or decline (No) in the research view
    Escape,
    /// Toggle light/dark theme
    ToggleTheme,
    /// Toggle help view
    ToggleHelp,
    /// Move selection up
    SelectPrev,
    /// Move selection down
    SelectNext,
    /// Switch focus between drug cards and history (Tab)
    NextField,
    /// Delete character
    DeleteKey,
    /// Anything else, forwarded to the focused text input
    Input(KeyEvent),
    /// Drives the loading spinner and drains runner events
    Tick,
}

/// Keyboard and tick source for the main loop
pub struct EventHandler {
    actions: mpsc::Receiver<AppAction>,
}

impl EventHandler {
    /// Start reading terminal input; a `Tick` is emitted every `tick_rate`
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, actions) = mpsc::channel(100);
        tokio::spawn(input_loop(tx, tick_rate));
        Self { actions }
    }

    /// Next queued action, if one is ready
    pub fn try_next(&mut self) -> Option<AppAction> {
        self.actions.try_recv().ok()
    }

    /// Wait for input or the next tick. `None` once the input loop has stopped.
    pub async fn next(&mut self) -> Option<AppAction> {
        self.actions.recv().await
    }

    fn map_event(event: Event) -> Option<AppAction> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::map_key_event(key),
            _ => None,
        }
    }

    /// Map a key event to an app action
    pub(crate) fn map_key_event(key: KeyEvent) -> Option<AppAction> {
        match (key.modifiers, key.code) {
            // Quit shortcuts
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(AppAction::ForceQuit),
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => Some(AppAction::Quit),

            // Toggles
            (KeyModifiers::CONTROL, KeyCode::Char('t')) => Some(AppAction::ToggleTheme),
            (KeyModifiers::CONTROL, KeyCode::Char('h')) => Some(AppAction::ToggleHelp),

            (KeyModifiers::NONE, code) | (KeyModifiers::SHIFT, code) => match code {
                KeyCode::Esc => Some(AppAction::Escape),
                KeyCode::Enter => Some(AppAction::Submit),
                KeyCode::F(1) => Some(AppAction::ToggleHelp),
                KeyCode::Up => Some(AppAction::SelectPrev),
                KeyCode::Down => Some(AppAction::SelectNext),
                KeyCode::Tab | KeyCode::BackTab => Some(AppAction::NextField),
                KeyCode::Backspace => Some(AppAction::DeleteKey),
                _ => Some(AppAction::Input(key)),
            },

            // Alt and other combinations still reach the text inputs
            _ => Some(AppAction::Input(key)),
        }
    }
}

/// Forwards terminal events and ticks until the receiver is dropped or
/// the terminal stream ends
async fn input_loop(tx: mpsc::Sender<AppAction>, tick_rate: Duration) {
    let mut reader = EventStream::new();
    let mut ticks = tokio::time::interval(tick_rate);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let action = tokio::select! {
            _ = ticks.tick() => Some(AppAction::Tick),
            event = reader.next() => match event {
                Some(Ok(event)) => EventHandler::map_event(event),
                Some(Err(e)) => {
                    warn!("Terminal input error: {}", e);
                    None
                }
                None => break,
            },
        };

        if let Some(action) = action {
            if tx.send(action).await.is_err() {
                break;
            }
        }
    }
}
