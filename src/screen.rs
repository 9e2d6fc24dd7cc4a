//! Screen projection
//!
//! [`Screen::project`] turns controller state into a plain snapshot that any
//! front-end can draw. It holds no references back into the controller and
//! performs no mutation.

use crate::agents::{Agent, AgentStatus};
use crate::controller::{RunState, ViewController};
use crate::models::{Drug, ThemeMode, View};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugCard {
    pub id: u32,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchPanel {
    pub drug: Drug,
    pub loading: bool,
    pub modification: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub view: View,
    pub theme: ThemeMode,
    pub search: String,
    pub cards: Vec<DrugCard>,
    pub history: Vec<String>,
    pub research: Option<ResearchPanel>,
    pub agents: Vec<Agent>,
    pub progress: String,
    pub notice: Option<String>,
    pub run: RunState,
    pub can_return: bool,
}

impl Screen {
    pub fn project(controller: &ViewController) -> Self {
        Self {
            view: controller.view(),
            theme: controller.theme(),
            search: controller.search().to_string(),
            cards: controller
                .filtered_drugs()
                .into_iter()
                .map(|d| DrugCard {
                    id: d.id,
                    name: d.name.clone(),
                    description: d.description.clone(),
                })
                .collect(),
            history: controller.history().to_vec(),
            research: controller.session().map(|s| ResearchPanel {
                drug: s.drug.clone(),
                loading: !s.loaded,
                modification: s.modification.clone(),
            }),
            agents: controller.agents().to_vec(),
            progress: controller.progress().to_string(),
            notice: controller.notice().map(str::to_string),
            run: controller.run_state().clone(),
            can_return: controller.can_return(),
        }
    }

    /// Agent currently marked Processing, if any
    pub fn active_agent(&self) -> Option<&Agent> {
        self.agents
            .iter()
            .find(|a| a.status == AgentStatus::Processing)
    }

    /// Resolved and total task counts across the board
    pub fn task_totals(&self) -> (usize, usize) {
        let total = self.agents.iter().map(|a| a.tasks.len()).sum();
        let done = self
            .agents
            .iter()
            .flat_map(|a| a.tasks.iter())
            .filter(|t| t.status.is_terminal())
            .count();
        (done, total)
    }
}
