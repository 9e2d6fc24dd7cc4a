//! Agent System
//!
//! The simulated repurposing pipeline. Three agents run one after another,
//! each working through its own task checklist:
//!
//! - **Literature Agent**: scientific literature and trial evidence
//! - **Patent Agent**: intellectual property landscape
//! - **Safety Agent**: risk profile of the modified use
//!
//! ## Pipeline Overview
//!
//! ```text
//! Confirmed modification
//!      │
//!      ▼
//! ┌─────────────┐
//! │ Literature  │  → 4 tasks
//! │   Agent     │
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │   Patent    │  → 4 tasks
//! │   Agent     │
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │   Safety    │  → 3 tasks
//! │   Agent     │
//! └─────────────┘
//!      │
//!      ▼
//!  Analysis ready
//! ```
//!
//! Nothing here does real work. The [`runner::StageRunner`] paces each task
//! with a timer and asks an [`outcome::OutcomePolicy`] how it ended.

pub mod literature;
pub mod outcome;
pub mod pacer;
pub mod patent;
pub mod runner;
pub mod safety;

pub use literature::LiteratureAgent;
pub use outcome::{AlwaysSucceed, OutcomePolicy, ScriptedFailure};
pub use pacer::{Pacer, TokioPacer};
pub use patent::PatentAgent;
pub use runner::{RunEvent, RunObserver, RunOutcome, StageRunner};
pub use safety::SafetyAgent;

use crate::types::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Lifecycle of an agent within one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    #[default]
    Pending,
    Processing,
    Completed,
}

/// Outcome of a single task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub status: TaskStatus,
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TaskStatus::Pending,
        }
    }
}

/// A named pipeline stage and its task checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    /// Progress line shown while this agent is processing
    pub message: String,
    pub status: AgentStatus,
    pub tasks: Vec<Task>,
}

impl Agent {
    pub fn new<I, S>(
        id: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
        tasks: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            message: message.into(),
            status: AgentStatus::Pending,
            tasks: tasks.into_iter().map(Task::new).collect(),
        }
    }

    /// Put the agent and all of its tasks back to Pending
    pub fn reset(&mut self) {
        self.status = AgentStatus::Pending;
        for task in &mut self.tasks {
            task.status = TaskStatus::Pending;
        }
    }

    pub fn start(&mut self) -> AppResult<()> {
        if self.status != AgentStatus::Pending {
            return Err(AppError::Internal(format!(
                "agent '{}' started while {:?}",
                self.id, self.status
            )));
        }
        self.status = AgentStatus::Processing;
        Ok(())
    }

    /// Record the terminal outcome of one task
    pub fn resolve_task(&mut self, index: usize, status: TaskStatus) -> AppResult<()> {
        if !status.is_terminal() {
            return Err(AppError::Internal(format!(
                "task {} of '{}' resolved to Pending",
                index, self.id
            )));
        }
        if self.status != AgentStatus::Processing {
            return Err(AppError::Internal(format!(
                "task {} of '{}' resolved while agent is {:?}",
                index, self.id, self.status
            )));
        }
        let task = self
            .tasks
            .get_mut(index)
            .ok_or_else(|| AppError::NotFound(format!("task {} of agent '{}'", index, self.id)))?;
        if task.status.is_terminal() {
            return Err(AppError::Internal(format!(
                "task {} of '{}' resolved twice",
                index, self.id
            )));
        }
        task.status = status;
        Ok(())
    }

    /// Mark the agent Completed. Every task must already be terminal.
    pub fn complete(&mut self) -> AppResult<()> {
        if self.status != AgentStatus::Processing {
            return Err(AppError::Internal(format!(
                "agent '{}' completed while {:?}",
                self.id, self.status
            )));
        }
        if let Some(pending) = self.tasks.iter().position(|t| !t.status.is_terminal()) {
            return Err(AppError::Internal(format!(
                "agent '{}' completed with task {} still pending",
                self.id, pending
            )));
        }
        self.status = AgentStatus::Completed;
        Ok(())
    }

    pub fn failed_tasks(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Failed)
            .count()
    }
}

/// The default Literature → Patent → Safety pipeline
pub fn default_pipeline() -> Vec<Agent> {
    vec![
        LiteratureAgent::agent(),
        PatentAgent::agent(),
        SafetyAgent::agent(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline_shape() {
        let agents = default_pipeline();
        let ids: Vec<&str> = agents.iter().map(|a| a.id.as_str()).collect();
        let counts: Vec<usize> = agents.iter().map(|a| a.tasks.len()).collect();
        assert_eq!(ids, vec!["literature", "patent", "safety"]);
        assert_eq!(counts, vec![4, 4, 3]);
        assert!(agents.iter().all(|a| a.status == AgentStatus::Pending));
    }

    #[test]
    fn test_agent_lifecycle() {
        let mut agent = Agent::new("a", "A", "working", ["one", "two"]);
        agent.start().unwrap();
        agent.resolve_task(0, TaskStatus::Completed).unwrap();
        assert!(agent.complete().is_err());
        agent.resolve_task(1, TaskStatus::Failed).unwrap();
        agent.complete().unwrap();
        assert_eq!(agent.status, AgentStatus::Completed);
        assert_eq!(agent.failed_tasks(), 1);
    }

    #[test]
    fn test_tasks_are_terminal_until_reset() {
        let mut agent = Agent::new("a", "A", "working", ["one"]);
        agent.start().unwrap();
        agent.resolve_task(0, TaskStatus::Completed).unwrap();
        assert!(agent.resolve_task(0, TaskStatus::Failed).is_err());
        assert!(agent.resolve_task(5, TaskStatus::Completed).is_err());
        assert!(agent.resolve_task(0, TaskStatus::Pending).is_err());

        agent.reset();
        assert_eq!(agent.status, AgentStatus::Pending);
        assert_eq!(agent.tasks[0].status, TaskStatus::Pending);
    }

    #[test]
    fn test_agent_cannot_restart_mid_run() {
        let mut agent = Agent::new("a", "A", "working", ["one"]);
        agent.start().unwrap();
        assert!(agent.start().is_err());
    }
}
