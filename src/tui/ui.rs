//! UI Rendering
//!
//! Main layout and per-view rendering. Everything drawn comes from the
//! [`Screen`] projection plus a little local UI state (focus, cursor, tick).

use crate::models::View;
use crate::screen::{ResearchPanel, Screen};
use crate::tui::app::{App, Focus};
use crate::tui::theme::{Icons, Theme};
use crate::tui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let screen = Screen::project(&app.controller);
    let theme = Theme::new(screen.theme);

    frame.render_widget(Block::default().style(theme.base()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], &theme);
    match screen.view {
        View::Dashboard => render_dashboard(frame, chunks[1], app, &screen, &theme),
        View::Research => render_research(frame, chunks[1], app, &screen, &theme),
        View::AgentProcessing => render_processing(frame, chunks[1], &screen, &theme),
    }
    render_status_bar(frame, chunks[2], &screen, &theme);

    if app.show_help {
        render_help(frame, &theme);
    }
}

/// Render the header with the theme toggle indicator
fn render_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let title = Line::from(vec![
        Span::raw("💊 "),
        Span::styled("MED-LANE", theme.title()),
        Span::styled(" Drug Repurposing", theme.text_secondary()),
        Span::raw("   "),
        Span::styled(theme.toggle_icon(), theme.text()),
        Span::styled(" [Ctrl+T]", theme.shortcut_desc()),
    ]);

    let paragraph = Paragraph::new(title).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border()),
    );
    frame.render_widget(paragraph, area);
}

fn render_dashboard(frame: &mut Frame, area: Rect, app: &App, screen: &Screen, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(columns[0]);

    // Search box
    let search_text = if screen.search.is_empty() {
        Line::from(Span::styled("Type to search drugs...", theme.placeholder()))
    } else {
        Line::from(vec![
            Span::styled(screen.search.clone(), theme.text()),
            Span::styled("▌", theme.active()),
        ])
    };
    let search = Paragraph::new(search_text).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(theme.border_focused()),
    );
    frame.render_widget(search, left[0]);

    // Drug cards
    let cards_focused = app.focus == Focus::Cards;
    let mut lines = Vec::new();
    if screen.cards.is_empty() {
        lines.push(Line::from(Span::styled("No drugs found", theme.text_dim())));
    }
    for (i, card) in screen.cards.iter().enumerate() {
        let selected = cards_focused && i == app.card_index;
        let marker = if selected { Icons::SELECTED } else { " " };
        let name_style = if selected { theme.selected() } else { theme.heading() };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", marker), theme.selected()),
            Span::styled(card.name.clone(), name_style),
            Span::styled("   [REPURPOSE]", theme.shortcut_desc()),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(card.description.clone(), theme.text_secondary()),
        ]));
        lines.push(Line::from(""));
    }
    let cards = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Drugs ")
            .borders(Borders::ALL)
            .border_style(if cards_focused {
                theme.border_focused()
            } else {
                theme.border()
            }),
    );
    frame.render_widget(cards, left[1]);

    // Research history
    let history_focused = app.focus == Focus::History;
    let history_lines: Vec<Line> = if screen.history.is_empty() {
        vec![Line::from(Span::styled("Nothing researched yet", theme.text_dim()))]
    } else {
        screen
            .history
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let selected = history_focused && i == app.history_index;
                Line::from(vec![
                    Span::styled(
                        format!("{} ", if selected { Icons::SELECTED } else { Icons::DOT }),
                        theme.selected(),
                    ),
                    Span::styled(
                        name.clone(),
                        if selected { theme.selected() } else { theme.text() },
                    ),
                ])
            })
            .collect()
    };
    let history = Paragraph::new(history_lines).block(
        Block::default()
            .title(" Research History ")
            .borders(Borders::ALL)
            .border_style(if history_focused {
                theme.border_focused()
            } else {
                theme.border()
            }),
    );
    frame.render_widget(history, columns[1]);
}

fn render_research(frame: &mut Frame, area: Rect, app: &App, screen: &Screen, theme: &Theme) {
    let Some(panel) = &screen.research else {
        return;
    };

    if panel.loading {
        let spinner = Icons::SPINNER[app.tick % Icons::SPINNER.len()];
        let paragraph = Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", spinner), theme.active()),
            Span::styled(
                format!("Analyzing {}...", panel.drug.name),
                theme.text_secondary(),
            ),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Research ")
                .borders(Borders::ALL)
                .border_style(theme.border()),
        );
        frame.render_widget(paragraph, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Details
            Constraint::Length(5), // Modification input
            Constraint::Length(2), // Decision + notice
        ])
        .split(area);

    render_drug_details(frame, chunks[0], panel, theme);

    let block = Block::default()
        .title(" Modifications ")
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);
    frame.render_widget(&app.modification, inner);

    let mut decision = vec![Line::from(vec![
        Span::styled("Proceed with repurposing analysis?  ", theme.text()),
        Span::styled(" YES [Enter] ", theme.badge_success()),
        Span::raw("  "),
        Span::styled(" NO [Esc] ", theme.badge_error()),
    ])];
    if let Some(notice) = &screen.notice {
        decision.push(Line::from(Span::styled(notice.clone(), theme.warning())));
    }
    frame.render_widget(Paragraph::new(decision), chunks[2]);
}

fn render_drug_details(frame: &mut Frame, area: Rect, panel: &ResearchPanel, theme: &Theme) {
    let drug = &panel.drug;
    let field = |label: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{:<14}", label), theme.text_secondary()),
            Span::styled(value.to_string(), theme.text()),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(drug.name.clone(), theme.title())),
        Line::from(""),
        field("Manufacturer", &drug.manufacturer),
        field("Effects", &drug.effects),
        field("Side effects", &drug.side_effects),
        field("Safety", &drug.safety),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Research Results ")
            .borders(Borders::ALL)
            .border_style(theme.border()),
    );
    frame.render_widget(paragraph, area);
}

fn render_processing(frame: &mut Frame, area: Rect, screen: &Screen, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(5)])
        .split(area);

    widgets::render_agents(frame, chunks[0], &screen.agents, theme);
    widgets::render_progress(
        frame,
        chunks[1],
        &screen.agents,
        &screen.progress,
        screen.can_return,
        theme,
    );
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, screen: &Screen, theme: &Theme) {
    let status = match screen.view {
        View::Dashboard => Span::styled(
            format!("{} drugs", screen.cards.len()),
            theme.text_secondary(),
        ),
        View::Research => Span::styled("Review", theme.text_secondary()),
        View::AgentProcessing => {
            let (done, total) = screen.task_totals();
            let style = if screen.can_return {
                theme.complete()
            } else {
                theme.active()
            };
            Span::styled(format!("Tasks {}/{}", done, total), style)
        }
    };

    let mut shortcuts = match screen.view {
        View::Dashboard => vec![
            Span::styled(" [Enter]", theme.shortcut_key()),
            Span::styled(" Repurpose ", theme.shortcut_desc()),
            Span::styled("[Tab]", theme.shortcut_key()),
            Span::styled(" History ", theme.shortcut_desc()),
        ],
        View::Research => vec![
            Span::styled(" [Enter]", theme.shortcut_key()),
            Span::styled(" Yes ", theme.shortcut_desc()),
            Span::styled("[Esc]", theme.shortcut_key()),
            Span::styled(" No ", theme.shortcut_desc()),
        ],
        View::AgentProcessing => Vec::new(),
    };
    shortcuts.extend([
        Span::styled(" [Ctrl+Q]", theme.shortcut_key()),
        Span::styled(" Quit ", theme.shortcut_desc()),
        Span::styled("[F1]", theme.shortcut_key()),
        Span::styled(" Help", theme.shortcut_desc()),
    ]);

    let line = Line::from(
        std::iter::once(status)
            .chain(std::iter::once(Span::raw(" │")))
            .chain(shortcuts)
            .collect::<Vec<_>>(),
    );

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the help modal
fn render_help(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let row = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:<13}", key), theme.shortcut_key()),
            Span::styled(desc, theme.text()),
        ])
    };

    let help_lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", theme.heading())),
        Line::from(""),
        row("Type", "Search drugs / write modifications"),
        row("↑/↓", "Move selection"),
        row("Tab", "Switch between drugs and history"),
        row("Enter", "Repurpose / Yes / Back to dashboard"),
        row("Esc", "No, return to dashboard"),
        row("Ctrl+T", "Toggle light/dark theme"),
        row("Ctrl+Q", "Quit application"),
        row("Ctrl+C", "Force quit"),
        row("F1", "Show this help"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", theme.text_dim())),
    ];

    let paragraph = Paragraph::new(help_lines).style(theme.base()).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(theme.border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
