//! Progress Widget
//!
//! One-line pipeline overview plus the runner's latest progress text.

use crate::agents::{Agent, AgentStatus};
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the progress indicator
pub fn render_progress(
    frame: &mut Frame,
    area: Rect,
    agents: &[Agent],
    progress: &str,
    can_return: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .title(" Progress ")
        .borders(Borders::ALL)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(build_progress_line(agents, theme))];

    lines.push(Line::from(Span::styled(progress.to_string(), theme.text())));

    if can_return {
        lines.push(Line::from(vec![
            Span::styled("[Enter]", theme.shortcut_key()),
            Span::styled(" Back to dashboard", theme.shortcut_desc()),
        ]));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

/// Build the progress line with stage indicators
fn build_progress_line(agents: &[Agent], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, agent) in agents.iter().enumerate() {
        let (icon, style) = agent_icon(agent, theme);
        spans.push(Span::styled(format!("{} ", icon), style));
        spans.push(Span::styled(short_name(&agent.name), style));

        // Add arrow between stages (not after last)
        if i < agents.len() - 1 {
            spans.push(Span::styled(format!(" {} ", Icons::ARROW), theme.text_dim()));
        }
    }

    spans
}

/// Icon and style for an agent's status
pub(crate) fn agent_icon(agent: &Agent, theme: &Theme) -> (&'static str, Style) {
    match agent.status {
        AgentStatus::Pending => (Icons::PENDING, theme.pending()),
        AgentStatus::Processing => (Icons::ACTIVE, theme.active()),
        AgentStatus::Completed => (Icons::COMPLETE, theme.complete()),
    }
}

/// "Literature Agent" → "Literature"
fn short_name(name: &str) -> String {
    name.strip_suffix(" Agent").unwrap_or(name).to_string()
}
