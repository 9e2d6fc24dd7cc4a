//! Headless front-end
//!
//! Line-oriented alternative to the TUI. It drives the same
//! [`ViewController`] and [`StageRunner`] in-process and prints what the
//! [`Screen`] projection shows instead of drawing it.

use crate::agents::{
    default_pipeline, AgentStatus, RunEvent, RunObserver, RunOutcome, StageRunner, TaskStatus,
};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::controller::{RunTicket, ViewController};
use crate::models::{ThemeMode, View};
use crate::screen::Screen;
use crate::types::AppError;
use async_trait::async_trait;
use std::fmt::Write as _;
use std::io::Write;
use std::time::Duration;
use tracing::info;

/// Mirrors runner events onto the controller and echoes them as text
struct PrintingObserver<'a, W: Write + Send> {
    controller: &'a mut ViewController,
    run_id: u64,
    out: W,
}

impl<W: Write + Send> PrintingObserver<'_, W> {
    fn apply(&mut self, event: RunEvent) {
        if !self.controller.apply_run_event(self.run_id, &event) {
            return;
        }

        let line = match &event {
            RunEvent::Progress { text } => Some(text.clone()),
            RunEvent::TaskDone {
                agent_id,
                task_index,
                status,
            } => self
                .controller
                .agents()
                .iter()
                .find(|a| &a.id == agent_id)
                .and_then(|a| a.tasks.get(*task_index))
                .map(|task| format!("  {} {}", task_mark(*status), task.name)),
            RunEvent::AgentStatus { .. } => None,
        };

        if let Some(line) = line {
            writeln!(self.out, "{}", line).ok();
        }
    }
}

#[async_trait]
impl<W: Write + Send> RunObserver for PrintingObserver<'_, W> {
    async fn on_progress(&mut self, text: &str) {
        self.apply(RunEvent::Progress {
            text: text.to_string(),
        });
    }

    async fn on_agent_status(&mut self, agent_id: &str, status: AgentStatus) {
        self.apply(RunEvent::AgentStatus {
            agent_id: agent_id.to_string(),
            status,
        });
    }

    async fn on_task_done(&mut self, agent_id: &str, task_index: usize, status: TaskStatus) {
        self.apply(RunEvent::TaskDone {
            agent_id: agent_id.to_string(),
            task_index,
            status,
        });
    }
}

fn task_mark(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "·",
        TaskStatus::Completed => "✓",
        TaskStatus::Failed => "✗",
    }
}

/// Select `drug_name`, confirm `modification` and run the pipeline to the end
pub async fn run_headless<W: Write + Send>(
    config: &Config,
    drug_name: &str,
    modification: &str,
    mut out: W,
) -> anyhow::Result<RunOutcome> {
    let mut controller =
        ViewController::new(Catalog::demo(), default_pipeline(), ThemeMode::default());

    let drug_id = controller
        .catalog()
        .find_by_name(drug_name)
        .map(|d| d.id)
        .ok_or_else(|| AppError::NotFound(format!("drug '{}'", drug_name)))?;

    let session_id = controller.select_drug(drug_id)?;
    writeln!(out, "Analyzing {}...", drug_name.trim())?;
    tokio::time::sleep(Duration::from_millis(config.runner.research_load_ms)).await;
    controller.mark_loaded(session_id);
    write!(out, "{}", render(&Screen::project(&controller)))?;

    let RunTicket {
        run_id, mut agents, ..
    } = controller.confirm(modification)?;

    let runner = StageRunner::from_config(&config.runner);
    info!(run_id, "Starting headless run");

    let outcome = {
        let mut observer = PrintingObserver {
            controller: &mut controller,
            run_id,
            out: &mut out,
        };
        runner.run(&mut agents, &mut observer).await
    };
    controller.finish_run(run_id, outcome.clone());

    writeln!(out)?;
    write!(out, "{}", render(&Screen::project(&controller)))?;
    Ok(outcome)
}

/// Print the catalog, optionally filtered by a search term
pub fn list_catalog<W: Write>(search: Option<&str>, mut out: W) -> anyhow::Result<()> {
    let mut controller =
        ViewController::new(Catalog::demo(), default_pipeline(), ThemeMode::default());
    if let Some(term) = search {
        controller.set_search(term);
    }
    write!(out, "{}", render(&Screen::project(&controller)))?;
    Ok(())
}

/// Plain-text rendering of a screen snapshot
pub fn render(screen: &Screen) -> String {
    let mut text = String::new();

    match screen.view {
        View::Dashboard => {
            if !screen.search.is_empty() {
                writeln!(text, "Search: {}", screen.search).ok();
            }
            if screen.cards.is_empty() {
                writeln!(text, "No drugs found").ok();
            }
            for card in &screen.cards {
                writeln!(text, "[{}] {}: {}", card.id, card.name, card.description).ok();
            }
            if !screen.history.is_empty() {
                writeln!(text, "History: {}", screen.history.join(", ")).ok();
            }
        }
        View::Research => {
            if let Some(panel) = &screen.research {
                let drug = &panel.drug;
                if panel.loading {
                    writeln!(text, "Analyzing {}...", drug.name).ok();
                } else {
                    writeln!(text, "{} ({})", drug.name, drug.manufacturer).ok();
                    writeln!(text, "  Effects:      {}", drug.effects).ok();
                    writeln!(text, "  Side effects: {}", drug.side_effects).ok();
                    writeln!(text, "  Safety:       {}", drug.safety).ok();
                }
            }
            if let Some(notice) = &screen.notice {
                writeln!(text, "! {}", notice).ok();
            }
        }
        View::AgentProcessing => {
            for agent in &screen.agents {
                let done = agent.tasks.iter().filter(|t| t.status.is_terminal()).count();
                writeln!(
                    text,
                    "{:<18} {:<10} {}/{}",
                    agent.name,
                    format!("{:?}", agent.status),
                    done,
                    agent.tasks.len()
                )
                .ok();
                for (i, task) in agent.tasks.iter().enumerate() {
                    if task.status == TaskStatus::Failed {
                        writeln!(text, "  ✗ task {}: {}", i + 1, task.name).ok();
                    }
                }
            }
            writeln!(text, "{}", screen.progress).ok();
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> Config {
        let mut config = Config::default();
        config.runner.agent_duration_ms = 400;
        config.runner.research_load_ms = 100;
        config
    }

    #[tokio::test(start_paused = true)]
    async fn test_headless_run_prints_progress() {
        let mut out = Vec::new();
        let outcome = run_headless(&fast_config(), "metformin", "extended release", &mut out)
            .await
            .unwrap();
        assert_eq!(outcome, RunOutcome::Completed { failed_tasks: 1 });

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Metformin (Bristol-Myers Squibb)"));
        assert!(text.contains("Initializing agents..."));
        assert!(text.contains("📋 Patent Agent analyzing intellectual property..."));
        assert!(text.contains("✗"));
        assert!(text.trim_end().ends_with("✅ All agents completed successfully! Analysis ready."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_headless_rejects_blank_modification() {
        let err = run_headless(&fast_config(), "Aspirin", "   ", Vec::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("describe the modifications"));
    }

    #[tokio::test]
    async fn test_headless_unknown_drug() {
        let err = run_headless(&fast_config(), "Ibuprofen", "anything", Vec::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Ibuprofen"));
    }

    #[test]
    fn test_list_catalog_filters() {
        let mut out = Vec::new();
        list_catalog(Some("pril"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Lisinopril"));
        assert!(!text.contains("Aspirin"));

        let mut out = Vec::new();
        list_catalog(Some("zzz"), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No drugs found"));
    }

    #[test]
    fn test_render_dashboard_lists_all() {
        let controller =
            ViewController::new(Catalog::demo(), default_pipeline(), ThemeMode::default());
        let text = render(&Screen::project(&controller));
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("[1] Aspirin"));
    }
}
