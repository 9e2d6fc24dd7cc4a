//! View Controller
//!
//! Owns which screen is visible, the current research session, the research
//! history, the search filter and a mirror of the agent board. Every mutation
//! goes through one of the transitions below; an invalid transition returns an
//! error and leaves state untouched.
//!
//! ```text
//!             select_drug                  confirm(text)
//!  Dashboard ────────────▶ Research ──────────────────────▶ AgentProcessing
//!      ▲                      │                                   │
//!      └──────── decline ─────┘                                   │
//!      └────────────────────── return_to_dashboard ───────────────┘
//! ```

use crate::agents::runner::PROGRESS_INITIALIZING;
use crate::agents::{Agent, AgentStatus, RunEvent, RunOutcome, StageRunner};
use crate::catalog::Catalog;
use crate::models::{Drug, ResearchSession, ThemeMode, View};
use crate::types::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const EMPTY_MODIFICATION_NOTICE: &str =
    "Please describe the modifications you want to explore.";
pub const STILL_LOADING_NOTICE: &str = "Drug details are still loading.";

/// Where the agent board is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    Running {
        run_id: u64,
    },
    Finished {
        run_id: u64,
        outcome: RunOutcome,
    },
}

/// Everything needed to start the Stage Runner after a confirmation
#[derive(Debug, Clone)]
pub struct RunTicket {
    pub run_id: u64,
    pub session_id: Uuid,
    pub drug: Drug,
    pub modification: String,
    /// Freshly reset copy of the board for the runner to drive
    pub agents: Vec<Agent>,
}

#[derive(Debug, Clone)]
pub struct ViewController {
    catalog: Catalog,
    view: View,
    session: Option<ResearchSession>,
    history: Vec<String>,
    search: String,
    theme: ThemeMode,
    agents: Vec<Agent>,
    run: RunState,
    next_run_id: u64,
    progress: String,
    notice: Option<String>,
}

impl ViewController {
    pub fn new(catalog: Catalog, pipeline: Vec<Agent>, theme: ThemeMode) -> Self {
        Self {
            catalog,
            view: View::Dashboard,
            session: None,
            history: Vec::new(),
            search: String::new(),
            theme,
            agents: pipeline,
            run: RunState::Idle,
            next_run_id: 1,
            progress: String::new(),
            notice: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn session(&self) -> Option<&ResearchSession> {
        self.session.as_ref()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn progress(&self) -> &str {
        &self.progress
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Catalog entries matching the current search filter
    pub fn filtered_drugs(&self) -> Vec<&Drug> {
        self.catalog.search(&self.search)
    }

    /// The return control is only offered once the run is over
    pub fn can_return(&self) -> bool {
        self.view == View::AgentProcessing && matches!(self.run, RunState::Finished { .. })
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Re-populate the search filter from a history entry
    pub fn search_from_history(&mut self, index: usize) -> AppResult<()> {
        self.require(View::Dashboard, "search from history")?;
        let name = self
            .history
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("history entry {}", index)))?;
        self.search = name;
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Dashboard → Research for the given catalog entry
    pub fn select_drug(&mut self, drug_id: u32) -> AppResult<Uuid> {
        self.require(View::Dashboard, "select a drug")?;
        let drug = self
            .catalog
            .get(drug_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("drug {}", drug_id)))?;

        info!(drug = %drug.name, "Analyzing drug");
        if !self.history.contains(&drug.name) {
            self.history.push(drug.name.clone());
        }

        let session = ResearchSession::new(drug);
        let id = session.id;
        self.session = Some(session);
        self.notice = None;
        self.view = View::Research;
        Ok(id)
    }

    /// Reveal the drug details once the loading delay has passed.
    /// Returns false if the session has since been left.
    pub fn mark_loaded(&mut self, session_id: Uuid) -> bool {
        match self.session.as_mut() {
            Some(session) if session.id == session_id && self.view == View::Research => {
                session.loaded = true;
                session.modification.clear();
                true
            }
            _ => {
                debug!(%session_id, "Ignoring load for a session that is no longer active");
                false
            }
        }
    }

    /// Research → AgentProcessing, provided the modification text is not blank
    pub fn confirm(&mut self, modification: &str) -> AppResult<RunTicket> {
        self.require(View::Research, "confirm")?;
        let Some(session) = self.session.as_mut() else {
            return Err(AppError::Internal("research view without a session".into()));
        };

        if !session.loaded {
            self.notice = Some(STILL_LOADING_NOTICE.to_string());
            return Err(AppError::Validation(STILL_LOADING_NOTICE.to_string()));
        }

        let modification = modification.trim();
        if modification.is_empty() {
            self.notice = Some(EMPTY_MODIFICATION_NOTICE.to_string());
            return Err(AppError::Validation(EMPTY_MODIFICATION_NOTICE.to_string()));
        }

        session.modification = modification.to_string();
        let session_id = session.id;
        let drug = session.drug.clone();

        let run_id = self.next_run_id;
        self.next_run_id += 1;

        StageRunner::reset(&mut self.agents);
        self.run = RunState::Running { run_id };
        self.progress = PROGRESS_INITIALIZING.to_string();
        self.notice = None;
        self.view = View::AgentProcessing;

        info!(drug = %drug.name, modification, run_id, "Proceeding to agent processing");
        Ok(RunTicket {
            run_id,
            session_id,
            drug,
            modification: modification.to_string(),
            agents: self.agents.clone(),
        })
    }

    /// Research → Dashboard without running anything
    pub fn decline(&mut self) -> AppResult<()> {
        self.require(View::Research, "decline")?;
        if let Some(session) = &self.session {
            info!(drug = %session.drug.name, "User declined to proceed");
        }
        self.return_to_dashboard();
        Ok(())
    }

    /// Back to the dashboard from anywhere, clearing the session and search
    pub fn return_to_dashboard(&mut self) {
        self.view = View::Dashboard;
        self.session = None;
        self.search.clear();
        self.notice = None;
        if let RunState::Running { run_id } = self.run {
            warn!(run_id, "Leaving an unfinished run; its progress will be ignored");
            self.run = RunState::Idle;
        }
    }

    /// Mirror one runner notification onto the board.
    /// Events from a run other than the active one are ignored.
    pub fn apply_run_event(&mut self, run_id: u64, event: &RunEvent) -> bool {
        if self.run != (RunState::Running { run_id }) {
            debug!(run_id, "Ignoring event from inactive run");
            return false;
        }

        let result = match event {
            RunEvent::Progress { text } => {
                self.progress = text.clone();
                Ok(())
            }
            RunEvent::AgentStatus { agent_id, status } => {
                self.agent_mut(agent_id).and_then(|agent| match status {
                    AgentStatus::Processing => agent.start(),
                    AgentStatus::Completed => agent.complete(),
                    AgentStatus::Pending => {
                        agent.reset();
                        Ok(())
                    }
                })
            }
            RunEvent::TaskDone {
                agent_id,
                task_index,
                status,
            } => self
                .agent_mut(agent_id)
                .and_then(|agent| agent.resolve_task(*task_index, *status)),
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(run_id, "Run event could not be applied: {}", e);
                false
            }
        }
    }

    /// Record how the active run ended
    pub fn finish_run(&mut self, run_id: u64, outcome: RunOutcome) -> bool {
        if self.run != (RunState::Running { run_id }) {
            return false;
        }
        info!(run_id, ?outcome, "Multi-agent processing finished");
        self.run = RunState::Finished { run_id, outcome };
        true
    }

    fn agent_mut(&mut self, agent_id: &str) -> AppResult<&mut Agent> {
        self.agents
            .iter_mut()
            .find(|a| a.id == agent_id)
            .ok_or_else(|| AppError::NotFound(format!("agent '{}'", agent_id)))
    }

    fn require(&self, expected: View, action: &'static str) -> AppResult<()> {
        if self.view == expected {
            Ok(())
        } else {
            Err(AppError::InvalidTransition {
                from: self.view,
                action,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::runner::PROGRESS_COMPLETE;
    use crate::agents::{default_pipeline, ScriptedFailure, TaskStatus};
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    fn controller() -> ViewController {
        ViewController::new(Catalog::demo(), default_pipeline(), ThemeMode::Dark)
    }

    /// Dashboard → Research with the details already loaded
    fn open_research(c: &mut ViewController, drug_id: u32) -> Uuid {
        let id = c.select_drug(drug_id).unwrap();
        assert!(c.mark_loaded(id));
        id
    }

    #[test]
    fn test_select_drug_enters_research() {
        let mut c = controller();
        let id = c.select_drug(2).unwrap();
        assert_eq!(c.view(), View::Research);
        let session = c.session().unwrap();
        assert_eq!(session.id, id);
        assert_eq!(session.drug.name, "Metformin");
        assert_eq!(c.history(), ["Metformin"]);
    }

    #[test]
    fn test_unknown_drug_is_rejected() {
        let mut c = controller();
        assert!(matches!(c.select_drug(99), Err(AppError::NotFound(_))));
        assert_eq!(c.view(), View::Dashboard);
        assert!(c.history().is_empty());
    }

    #[test]
    fn test_history_has_no_duplicates_and_keeps_first_seen_order() {
        let mut c = controller();
        for id in [3, 1, 3, 3, 2, 1] {
            c.select_drug(id).unwrap();
            c.decline().unwrap();
        }
        assert_eq!(c.history(), ["Lisinopril", "Aspirin", "Metformin"]);
    }

    #[test]
    fn test_select_requires_dashboard() {
        let mut c = controller();
        c.select_drug(1).unwrap();
        let err = c.select_drug(2).unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { from: View::Research, .. }));
        assert_eq!(c.session().unwrap().drug.name, "Aspirin");
    }

    #[test]
    fn test_blank_confirm_fails_validation() {
        let mut c = controller();
        open_research(&mut c, 1);

        for text in ["", "   ", "\n\t"] {
            let err = c.confirm(text).unwrap_err();
            assert!(err.is_validation());
            assert_eq!(c.view(), View::Research);
            assert_eq!(c.notice(), Some(EMPTY_MODIFICATION_NOTICE));
            assert_eq!(c.run_state(), &RunState::Idle);
        }
    }

    #[test]
    fn test_confirm_while_loading_is_refused() {
        let mut c = controller();
        c.select_drug(1).unwrap();
        assert_err!(c.confirm("reduce dosage"));
        assert_eq!(c.view(), View::Research);
        assert_eq!(c.notice(), Some(STILL_LOADING_NOTICE));
    }

    #[test]
    fn test_confirm_starts_a_run() {
        let mut c = controller();
        let session_id = open_research(&mut c, 1);

        let ticket = assert_ok!(c.confirm("  reduce dosage "));
        assert_eq!(c.view(), View::AgentProcessing);
        assert_eq!(ticket.session_id, session_id);
        assert_eq!(ticket.modification, "reduce dosage");
        assert_eq!(ticket.drug.name, "Aspirin");
        assert_eq!(ticket.agents.len(), 3);
        assert_eq!(c.run_state(), &RunState::Running { run_id: ticket.run_id });
        assert_eq!(c.progress(), PROGRESS_INITIALIZING);
        assert_eq!(c.session().unwrap().modification, "reduce dosage");
        assert!(c.notice().is_none());
        assert!(!c.can_return());
    }

    #[test]
    fn test_decline_returns_to_dashboard() {
        let mut c = controller();
        open_research(&mut c, 1);
        c.set_search("asp");
        assert_ok!(c.decline());
        assert_eq!(c.view(), View::Dashboard);
        assert!(c.session().is_none());
        assert_eq!(c.search(), "");
    }

    #[test]
    fn test_decline_on_dashboard_changes_nothing() {
        let mut c = controller();
        c.select_drug(2).unwrap();
        c.decline().unwrap();
        c.set_search("met");
        let before = format!("{:?}", c);

        let err = c.decline().unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { from: View::Dashboard, .. }));
        assert_eq!(format!("{:?}", c), before);
    }

    #[test]
    fn test_decline_during_processing_is_invalid() {
        let mut c = controller();
        open_research(&mut c, 1);
        c.confirm("reduce dosage").unwrap();
        assert_err!(c.decline());
        assert_eq!(c.view(), View::AgentProcessing);
    }

    #[test]
    fn test_return_to_dashboard_from_every_view() {
        let mut c = controller();
        c.set_search("lis");
        c.return_to_dashboard();
        assert_eq!(c.view(), View::Dashboard);
        assert_eq!(c.search(), "");

        c.select_drug(3).unwrap();
        c.set_search("lis");
        c.return_to_dashboard();
        assert_eq!(c.view(), View::Dashboard);
        assert!(c.session().is_none());
        assert_eq!(c.search(), "");

        open_research(&mut c, 3);
        let ticket = c.confirm("lower dose for pediatric use").unwrap();
        c.finish_run(ticket.run_id, RunOutcome::Completed { failed_tasks: 0 });
        assert!(c.can_return());
        c.return_to_dashboard();
        assert_eq!(c.view(), View::Dashboard);
        assert!(c.session().is_none());
        assert_eq!(c.history(), ["Lisinopril"]);
    }

    #[test]
    fn test_mark_loaded_ignores_stale_sessions() {
        let mut c = controller();
        let first = c.select_drug(1).unwrap();
        c.decline().unwrap();
        let second = c.select_drug(2).unwrap();

        assert!(!c.mark_loaded(first));
        assert!(!c.session().unwrap().loaded);
        assert!(c.mark_loaded(second));
        assert!(c.session().unwrap().loaded);
    }

    #[test]
    fn test_search_from_history() {
        let mut c = controller();
        c.select_drug(3).unwrap();
        c.decline().unwrap();

        assert_ok!(c.search_from_history(0));
        assert_eq!(c.search(), "Lisinopril");
        let names: Vec<&str> = c.filtered_drugs().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Lisinopril"]);

        assert!(matches!(c.search_from_history(4), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_theme_toggle() {
        let mut c = controller();
        assert_eq!(c.toggle_theme(), ThemeMode::Light);
        assert_eq!(c.theme(), ThemeMode::Light);
        assert_eq!(c.toggle_theme(), ThemeMode::Dark);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mirrored_run_matches_runner() {
        let mut c = controller();
        open_research(&mut c, 2);
        let mut ticket = c.confirm("extend release").unwrap();

        let runner = StageRunner::new(Duration::from_secs(10)).with_policy(ScriptedFailure::demo());
        let mut events = Vec::new();
        let outcome = runner.run(&mut ticket.agents, &mut events).await;

        for event in &events {
            assert!(c.apply_run_event(ticket.run_id, event));
        }
        assert!(c.finish_run(ticket.run_id, outcome));

        assert_eq!(c.agents(), ticket.agents.as_slice());
        assert_eq!(c.agents()[1].tasks[3].status, TaskStatus::Failed);
        assert_eq!(c.progress(), PROGRESS_COMPLETE);
        assert!(c.can_return());
    }

    #[test]
    fn test_stale_run_events_are_ignored() {
        let mut c = controller();
        open_research(&mut c, 1);
        let first = c.confirm("topical form").unwrap();
        c.return_to_dashboard();
        assert_eq!(c.run_state(), &RunState::Idle);

        open_research(&mut c, 1);
        let second = c.confirm("topical form").unwrap();
        assert_ne!(first.run_id, second.run_id);

        let progress = RunEvent::Progress {
            text: "late".to_string(),
        };
        assert!(!c.apply_run_event(first.run_id, &progress));
        assert!(!c.finish_run(first.run_id, RunOutcome::Completed { failed_tasks: 0 }));
        assert_eq!(c.progress(), PROGRESS_INITIALIZING);
        assert!(c.apply_run_event(second.run_id, &progress));
        assert_eq!(c.progress(), "late");
    }

    #[test]
    fn test_out_of_order_event_is_rejected() {
        let mut c = controller();
        open_research(&mut c, 1);
        let ticket = c.confirm("nasal spray").unwrap();
        let event = RunEvent::TaskDone {
            agent_id: "literature".to_string(),
            task_index: 0,
            status: TaskStatus::Completed,
        };
        assert!(!c.apply_run_event(ticket.run_id, &event));
        assert_eq!(c.agents()[0].tasks[0].status, TaskStatus::Pending);
    }
}
