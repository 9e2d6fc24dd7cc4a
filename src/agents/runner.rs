//! Stage Runner
//!
//! Walks the agents strictly in order, and each agent's tasks strictly in
//! order. Every task is preceded by a pause of `agent_duration / task_count`,
//! recomputed per agent since task counts differ. A failed task never stops
//! the run; only an error from the pacer does.

use super::{
    Agent, AgentStatus, AlwaysSucceed, OutcomePolicy, Pacer, ScriptedFailure, TaskStatus,
    TokioPacer,
};
use crate::config::RunnerConfig;
use crate::types::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

pub const PROGRESS_INITIALIZING: &str = "Initializing agents...";
pub const PROGRESS_COMPLETE: &str = "✅ All agents completed successfully! Analysis ready.";
pub const PROGRESS_ERROR: &str = "❌ An error occurred during processing.";

/// Progress notifications emitted by a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    Progress {
        text: String,
    },
    AgentStatus {
        agent_id: String,
        status: AgentStatus,
    },
    TaskDone {
        agent_id: String,
        task_index: usize,
        status: TaskStatus,
    },
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every agent reached Completed. Scripted task failures are counted, not fatal.
    Completed { failed_tasks: usize },
    /// The run was cut short by an unexpected error
    Aborted { reason: String },
}

/// Receives progress while a run is in flight
#[async_trait]
pub trait RunObserver: Send {
    async fn on_progress(&mut self, text: &str);

    async fn on_agent_status(&mut self, _agent_id: &str, _status: AgentStatus) {}

    async fn on_task_done(&mut self, agent_id: &str, task_index: usize, status: TaskStatus);
}

/// Collects every notification in order
#[async_trait]
impl RunObserver for Vec<RunEvent> {
    async fn on_progress(&mut self, text: &str) {
        self.push(RunEvent::Progress {
            text: text.to_string(),
        });
    }

    async fn on_agent_status(&mut self, agent_id: &str, status: AgentStatus) {
        self.push(RunEvent::AgentStatus {
            agent_id: agent_id.to_string(),
            status,
        });
    }

    async fn on_task_done(&mut self, agent_id: &str, task_index: usize, status: TaskStatus) {
        self.push(RunEvent::TaskDone {
            agent_id: agent_id.to_string(),
            task_index,
            status,
        });
    }
}

#[derive(Clone)]
pub struct StageRunner {
    agent_duration: Duration,
    policy: Arc<dyn OutcomePolicy>,
    pacer: Arc<dyn Pacer>,
}

impl StageRunner {
    /// Runner with the tokio timer and a policy where every task succeeds
    pub fn new(agent_duration: Duration) -> Self {
        Self {
            agent_duration,
            policy: Arc::new(AlwaysSucceed),
            pacer: Arc::new(TokioPacer),
        }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        let runner = Self::new(Duration::from_millis(config.agent_duration_ms));
        if config.demo_failure {
            runner.with_policy(ScriptedFailure::demo())
        } else {
            runner
        }
    }

    pub fn with_policy(mut self, policy: impl OutcomePolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Arc::new(pacer);
        self
    }

    pub fn agent_duration(&self) -> Duration {
        self.agent_duration
    }

    /// Pause before each task of an agent with `task_count` tasks
    pub fn task_pause(&self, task_count: usize) -> Duration {
        match u32::try_from(task_count) {
            Ok(0) => Duration::ZERO,
            Ok(count) => self.agent_duration / count,
            Err(_) => Duration::ZERO,
        }
    }

    /// Every agent and every task back to Pending. Call before each run.
    pub fn reset(agents: &mut [Agent]) {
        for agent in agents.iter_mut() {
            agent.reset();
        }
    }

    /// Drive `agents` to completion, reporting to `observer` along the way
    pub async fn run<O>(&self, agents: &mut [Agent], observer: &mut O) -> RunOutcome
    where
        O: RunObserver + ?Sized,
    {
        info!(agents = agents.len(), "Starting agent run");
        observer.on_progress(PROGRESS_INITIALIZING).await;

        match self.drive(agents, observer).await {
            Ok(()) => {
                let failed_tasks = agents.iter().map(Agent::failed_tasks).sum();
                info!(failed_tasks, "Agent run complete");
                observer.on_progress(PROGRESS_COMPLETE).await;
                RunOutcome::Completed { failed_tasks }
            }
            Err(e) => {
                error!("Agent run aborted: {}", e);
                observer.on_progress(PROGRESS_ERROR).await;
                RunOutcome::Aborted {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn drive<O>(&self, agents: &mut [Agent], observer: &mut O) -> AppResult<()>
    where
        O: RunObserver + ?Sized,
    {
        for agent in agents.iter_mut() {
            agent.start()?;
            info!(agent = %agent.id, tasks = agent.tasks.len(), "Agent processing");
            observer
                .on_agent_status(&agent.id, AgentStatus::Processing)
                .await;
            observer.on_progress(&agent.message).await;

            let pause = self.task_pause(agent.tasks.len());
            let total = agent.tasks.len();

            for index in 0..total {
                self.pacer.pause(pause).await?;

                let status = self.policy.decide(&agent.id, index);
                agent.resolve_task(index, status)?;
                debug!(
                    agent = %agent.id,
                    task = index + 1,
                    total,
                    ?status,
                    "Task resolved"
                );
                observer.on_task_done(&agent.id, index, status).await;
            }

            agent.complete()?;
            info!(agent = %agent.id, "Agent completed");
            observer
                .on_agent_status(&agent.id, AgentStatus::Completed)
                .await;
        }

        Ok(())
    }
}

impl std::fmt::Debug for StageRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageRunner")
            .field("agent_duration", &self.agent_duration)
            .finish_non_exhaustive()
    }
}
