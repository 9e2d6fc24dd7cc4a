//! Application State
//!
//! Contains the TUI state and translates key actions into controller
//! transitions. Timers (the research-load delay and the agent run) live on
//! spawned tasks and report back through an event channel.

use crate::agents::{
    default_pipeline, AgentStatus, RunEvent, RunObserver, RunOutcome, StageRunner, TaskStatus,
};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::controller::{RunTicket, ViewController};
use crate::models::View;
use crate::settings::{SettingsStorage, UserSettings};
use crate::tui::event::AppAction;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tui_textarea::TextArea;
use uuid::Uuid;

const MODIFICATION_PLACEHOLDER: &str =
    "Describe the modification to explore (new indication, dosage, delivery...)";

/// Events from spawned timers and the agent run
#[derive(Debug)]
pub enum AppEvent {
    /// The research view finished "loading" drug details
    ResearchLoaded(Uuid),
    /// Progress from the Stage Runner
    Run { run_id: u64, event: RunEvent },
    /// The Stage Runner returned
    RunFinished { run_id: u64, outcome: RunOutcome },
}

/// Which dashboard list has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Cards,
    History,
}

/// Forwards runner notifications into the app's event channel
struct ChannelObserver {
    run_id: u64,
    tx: mpsc::Sender<AppEvent>,
}

impl ChannelObserver {
    async fn send(&self, event: RunEvent) {
        let run_id = self.run_id;
        self.tx.send(AppEvent::Run { run_id, event }).await.ok();
    }
}

#[async_trait]
impl RunObserver for ChannelObserver {
    async fn on_progress(&mut self, text: &str) {
        self.send(RunEvent::Progress {
            text: text.to_string(),
        })
        .await;
    }

    async fn on_agent_status(&mut self, agent_id: &str, status: AgentStatus) {
        self.send(RunEvent::AgentStatus {
            agent_id: agent_id.to_string(),
            status,
        })
        .await;
    }

    async fn on_task_done(&mut self, agent_id: &str, task_index: usize, status: TaskStatus) {
        self.send(RunEvent::TaskDone {
            agent_id: agent_id.to_string(),
            task_index,
            status,
        })
        .await;
    }
}

/// Main application state
pub struct App {
    pub config: Config,
    pub controller: ViewController,
    pub runner: StageRunner,
    pub settings_storage: SettingsStorage,

    // UI State
    pub show_help: bool,
    pub should_quit: bool,
    pub focus: Focus,
    pub card_index: usize,
    pub history_index: usize,
    pub modification: TextArea<'static>,
    pub tick: usize,

    // Async communication
    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, settings: UserSettings, settings_storage: SettingsStorage) -> Self {
        let controller = ViewController::new(Catalog::demo(), default_pipeline(), settings.theme);
        let runner = StageRunner::from_config(&config.runner);
        let (event_tx, event_rx) = mpsc::channel(100);

        Self {
            config,
            controller,
            runner,
            settings_storage,
            show_help: false,
            should_quit: false,
            focus: Focus::Cards,
            card_index: 0,
            history_index: 0,
            modification: Self::new_textarea(),
            tick: 0,
            event_rx,
            event_tx,
        }
    }

    fn new_textarea() -> TextArea<'static> {
        let mut input = TextArea::default();
        input.set_cursor_line_style(ratatui::style::Style::default());
        input.set_placeholder_text(MODIFICATION_PLACEHOLDER);
        input
    }

    pub fn modification_text(&self) -> String {
        self.modification.lines().join("\n")
    }

    /// Poll for async events
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Handle an async event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ResearchLoaded(session_id) => {
                if self.controller.mark_loaded(session_id) {
                    self.modification = Self::new_textarea();
                }
            }
            AppEvent::Run { run_id, event } => {
                self.controller.apply_run_event(run_id, &event);
            }
            AppEvent::RunFinished { run_id, outcome } => {
                self.controller.finish_run(run_id, outcome);
            }
        }
    }

    /// Handle a user action
    pub async fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit | AppAction::ForceQuit => {
                self.should_quit = true;
            }
            AppAction::Tick => {
                self.tick = self.tick.wrapping_add(1);
            }
            AppAction::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            AppAction::ToggleTheme => {
                let theme = self.controller.toggle_theme();
                self.settings_storage.save_theme(theme).await;
            }
            _ if self.show_help => {
                // Any other key closes the help modal
                self.show_help = false;
            }
            action => match self.controller.view() {
                View::Dashboard => self.handle_dashboard(action),
                View::Research => self.handle_research(action),
                View::AgentProcessing => self.handle_processing(action),
            },
        }
    }

    fn handle_dashboard(&mut self, action: AppAction) {
        match action {
            AppAction::Input(key) => {
                if let KeyCode::Char(c) = key.code {
                    let mut search = self.controller.search().to_string();
                    search.push(c);
                    self.set_search(search);
                }
            }
            AppAction::DeleteKey => {
                let mut search = self.controller.search().to_string();
                search.pop();
                self.set_search(search);
            }
            AppAction::NextField => {
                self.focus = match self.focus {
                    Focus::Cards if !self.controller.history().is_empty() => Focus::History,
                    _ => Focus::Cards,
                };
            }
            AppAction::SelectPrev => match self.focus {
                Focus::Cards => self.card_index = self.card_index.saturating_sub(1),
                Focus::History => self.history_index = self.history_index.saturating_sub(1),
            },
            AppAction::SelectNext => match self.focus {
                Focus::Cards => {
                    let len = self.controller.filtered_drugs().len();
                    if self.card_index + 1 < len {
                        self.card_index += 1;
                    }
                }
                Focus::History => {
                    if self.history_index + 1 < self.controller.history().len() {
                        self.history_index += 1;
                    }
                }
            },
            AppAction::Submit => match self.focus {
                Focus::Cards => self.select_current_card(),
                Focus::History => {
                    if let Err(e) = self.controller.search_from_history(self.history_index) {
                        warn!("History selection failed: {}", e);
                    }
                    self.card_index = 0;
                    self.focus = Focus::Cards;
                }
            },
            _ => {}
        }
    }

    fn handle_research(&mut self, action: AppAction) {
        let loaded = self
            .controller
            .session()
            .map(|s| s.loaded)
            .unwrap_or(false);

        match action {
            AppAction::Submit => self.confirm(),
            AppAction::Escape => {
                if let Err(e) = self.controller.decline() {
                    warn!("Decline failed: {}", e);
                }
                self.reset_dashboard_cursor();
            }
            AppAction::Input(key) if loaded => {
                self.modification.input(key);
            }
            AppAction::DeleteKey if loaded => {
                self.modification
                    .input(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
            }
            _ => {}
        }
    }

    fn handle_processing(&mut self, action: AppAction) {
        if action == AppAction::Submit && self.controller.can_return() {
            self.controller.return_to_dashboard();
            self.reset_dashboard_cursor();
        }
    }

    fn set_search(&mut self, search: String) {
        self.controller.set_search(search);
        self.card_index = 0;
    }

    fn reset_dashboard_cursor(&mut self) {
        self.focus = Focus::Cards;
        self.card_index = 0;
        self.modification = Self::new_textarea();
    }

    fn select_current_card(&mut self) {
        let Some(drug_id) = self
            .controller
            .filtered_drugs()
            .get(self.card_index)
            .map(|d| d.id)
        else {
            return;
        };

        match self.controller.select_drug(drug_id) {
            Ok(session_id) => {
                self.modification = Self::new_textarea();
                self.history_index = 0;
                self.schedule_research_load(session_id);
            }
            Err(e) => warn!("Drug selection failed: {}", e),
        }
    }

    fn schedule_research_load(&self, session_id: Uuid) {
        let tx = self.event_tx.clone();
        let delay = Duration::from_millis(self.config.runner.research_load_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send(AppEvent::ResearchLoaded(session_id)).await.ok();
        });
    }

    fn confirm(&mut self) {
        let text = self.modification_text();
        match self.controller.confirm(&text) {
            Ok(ticket) => self.start_run(ticket),
            Err(e) => info!("Confirmation refused: {}", e),
        }
    }

    /// Spawn the Stage Runner for a confirmed session
    fn start_run(&self, ticket: RunTicket) {
        let tx = self.event_tx.clone();
        let runner = self.runner.clone();
        let RunTicket {
            run_id,
            mut agents,
            drug,
            ..
        } = ticket;

        info!(run_id, drug = %drug.name, "Starting multi-agent processing");
        tokio::spawn(async move {
            let mut observer = ChannelObserver {
                run_id,
                tx: tx.clone(),
            };
            let outcome = runner.run(&mut agents, &mut observer).await;
            tx.send(AppEvent::RunFinished { run_id, outcome }).await.ok();
        });
    }
}
