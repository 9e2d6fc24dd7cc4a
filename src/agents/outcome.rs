//! Task outcome policies
//!
//! The runner never decides on its own whether a task failed. It asks a
//! policy, so the demo's scripted failure lives here instead of in the loop.

use super::{PatentAgent, TaskStatus};

/// Decides the terminal status of a task once its pause elapses
pub trait OutcomePolicy: Send + Sync {
    fn decide(&self, agent_id: &str, task_index: usize) -> TaskStatus;
}

/// Every task completes
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysSucceed;

impl OutcomePolicy for AlwaysSucceed {
    fn decide(&self, _agent_id: &str, _task_index: usize) -> TaskStatus {
        TaskStatus::Completed
    }
}

/// Fails exactly one task, completes the rest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedFailure {
    pub agent_id: String,
    pub task_index: usize,
}

impl ScriptedFailure {
    pub fn new(agent_id: impl Into<String>, task_index: usize) -> Self {
        Self {
            agent_id: agent_id.into(),
            task_index,
        }
    }

    /// The failed freedom-to-operate check shown in the demo
    pub fn demo() -> Self {
        Self::new(PatentAgent::ID, PatentAgent::FREEDOM_TO_OPERATE)
    }
}

impl OutcomePolicy for ScriptedFailure {
    fn decide(&self, agent_id: &str, task_index: usize) -> TaskStatus {
        if agent_id == self.agent_id && task_index == self.task_index {
            TaskStatus::Failed
        } else {
            TaskStatus::Completed
        }
    }
}

impl<F> OutcomePolicy for F
where
    F: Fn(&str, usize) -> TaskStatus + Send + Sync,
{
    fn decide(&self, agent_id: &str, task_index: usize) -> TaskStatus {
        self(agent_id, task_index)
    }
}
