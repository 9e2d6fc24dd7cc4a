//! Agent Cards
//!
//! One bordered card per agent, side by side, with a status badge and a
//! per-task checklist.

use crate::agents::{Agent, AgentStatus, TaskStatus};
use crate::tui::theme::{Icons, Theme};
use crate::tui::widgets::progress::agent_icon;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render all agent cards across `area`
pub fn render_agents(frame: &mut Frame, area: Rect, agents: &[Agent], theme: &Theme) {
    if agents.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = agents
        .iter()
        .map(|_| Constraint::Ratio(1, agents.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (agent, column) in agents.iter().zip(columns.iter()) {
        render_agent_card(frame, *column, agent, theme);
    }
}

fn render_agent_card(frame: &mut Frame, area: Rect, agent: &Agent, theme: &Theme) {
    let border_style = if agent.status == AgentStatus::Processing {
        theme.border_focused()
    } else {
        theme.border()
    };

    let block = Block::default()
        .title(format!(" {} ", agent.name))
        .borders(Borders::ALL)
        .border_style(border_style);

    let (icon, style) = agent_icon(agent, theme);
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} {}", icon, status_label(agent.status)),
            style,
        )),
        Line::from(""),
    ];

    for task in &agent.tasks {
        let (icon, style) = task_icon(task.status, theme);
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", icon), style),
            Span::styled(task.name.clone(), theme.text()),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn status_label(status: AgentStatus) -> &'static str {
    match status {
        AgentStatus::Pending => "Pending",
        AgentStatus::Processing => "Processing",
        AgentStatus::Completed => "Completed",
    }
}

fn task_icon(status: TaskStatus, theme: &Theme) -> (&'static str, ratatui::style::Style) {
    match status {
        TaskStatus::Pending => (Icons::DOT, theme.pending()),
        TaskStatus::Completed => (Icons::COMPLETE, theme.success()),
        TaskStatus::Failed => (Icons::ERROR, theme.error()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::default_pipeline;
    use crate::models::ThemeMode;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_renders_task_outcomes() {
        let theme = Theme::new(ThemeMode::Dark);
        let mut agents = default_pipeline();
        agents[1].status = AgentStatus::Completed;
        agents[1].tasks[3].status = TaskStatus::Failed;
        agents[1].tasks[0].status = TaskStatus::Completed;

        let mut terminal = Terminal::new(TestBackend::new(120, 12)).unwrap();
        terminal
            .draw(|frame| render_agents(frame, frame.area(), &agents, &theme))
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let rendered: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(rendered.contains("Patent Agent"));
        assert!(rendered.contains("Completed"));
        assert!(rendered.contains(Icons::ERROR));
    }
}
