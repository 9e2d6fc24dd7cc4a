//! Theme and Styling
//!
//! Colors and styles for the TUI, in a dark and a light palette.

use crate::models::ThemeMode;
use ratatui::style::{Color, Modifier, Style};

/// Colors for one theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_dim: Color,
    pub bg: Color,
    pub border: Color,
    pub border_focused: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        accent: Color::Rgb(0, 212, 255),
        success: Color::Rgb(34, 197, 94),
        warning: Color::Rgb(251, 191, 36),
        error: Color::Rgb(239, 68, 68),
        text_primary: Color::Rgb(229, 229, 229),
        text_secondary: Color::Rgb(161, 161, 161),
        text_dim: Color::Rgb(82, 82, 82),
        bg: Color::Rgb(10, 10, 10),
        border: Color::Rgb(51, 51, 51),
        border_focused: Color::Rgb(59, 130, 246),
    };

    pub const LIGHT: Palette = Palette {
        accent: Color::Rgb(2, 132, 199),
        success: Color::Rgb(21, 128, 61),
        warning: Color::Rgb(180, 83, 9),
        error: Color::Rgb(185, 28, 28),
        text_primary: Color::Rgb(23, 23, 23),
        text_secondary: Color::Rgb(82, 82, 82),
        text_dim: Color::Rgb(163, 163, 163),
        bg: Color::Rgb(250, 250, 250),
        border: Color::Rgb(212, 212, 212),
        border_focused: Color::Rgb(37, 99, 235),
    };
}

/// Application theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub palette: Palette,
}

impl Theme {
    pub fn new(mode: ThemeMode) -> Self {
        let palette = match mode {
            ThemeMode::Dark => Palette::DARK,
            ThemeMode::Light => Palette::LIGHT,
        };
        Self { mode, palette }
    }

    /// Icon offered by the theme toggle: the mode you would switch to
    pub fn toggle_icon(&self) -> &'static str {
        match self.mode {
            ThemeMode::Light => "🌙",
            ThemeMode::Dark => "☀️",
        }
    }

    // === Styles ===

    /// Whole-frame background
    pub fn base(&self) -> Style {
        Style::default()
            .fg(self.palette.text_primary)
            .bg(self.palette.bg)
    }

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.palette.text_primary)
    }

    /// Secondary/muted text style
    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.palette.text_secondary)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.palette.text_dim)
    }

    /// Title style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Heading style
    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.palette.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.palette.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.palette.warning)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.palette.error)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.palette.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.palette.border_focused)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Keyboard shortcut style
    pub fn shortcut_key(&self) -> Style {
        Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Shortcut description style
    pub fn shortcut_desc(&self) -> Style {
        Style::default().fg(self.palette.text_secondary)
    }

    /// Active/in-progress indicator
    pub fn active(&self) -> Style {
        Style::default()
            .fg(self.palette.warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Complete indicator
    pub fn complete(&self) -> Style {
        Style::default().fg(self.palette.success)
    }

    /// Pending indicator
    pub fn pending(&self) -> Style {
        Style::default().fg(self.palette.text_dim)
    }

    /// Input placeholder style
    pub fn placeholder(&self) -> Style {
        Style::default().fg(self.palette.text_dim)
    }

    /// Badge style for the "Yes" decision
    pub fn badge_success(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.palette.success)
            .add_modifier(Modifier::BOLD)
    }

    /// Badge style for the "No" decision
    pub fn badge_error(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.palette.error)
            .add_modifier(Modifier::BOLD)
    }
}

/// Status icons
pub struct Icons;

impl Icons {
    pub const COMPLETE: &'static str = "✓";
    pub const ACTIVE: &'static str = "●";
    pub const PENDING: &'static str = "○";
    pub const ERROR: &'static str = "✗";
    pub const ARROW: &'static str = "→";
    pub const SELECTED: &'static str = "▶";
    pub const DOT: &'static str = "•";
    pub const SPINNER: [&'static str; 4] = ["◐", "◓", "◑", "◒"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_mode() {
        assert_eq!(Theme::new(ThemeMode::Dark).palette, Palette::DARK);
        assert_eq!(Theme::new(ThemeMode::Light).palette, Palette::LIGHT);
        assert_ne!(
            Theme::new(ThemeMode::Dark).base(),
            Theme::new(ThemeMode::Light).base()
        );
    }

    #[test]
    fn test_toggle_icon() {
        assert_eq!(Theme::new(ThemeMode::Light).toggle_icon(), "🌙");
        assert_eq!(Theme::new(ThemeMode::Dark).toggle_icon(), "☀️");
    }
}
