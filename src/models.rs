// Core models shared by the controller, the runner and the front-ends

use std::fmt;

/// A catalog entry. Read-only once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Drug {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub manufacturer: String,
    pub effects: String,
    pub side_effects: String,
    pub safety: String,
}

/// The three mutually-exclusive screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    Research,
    AgentProcessing,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Dashboard => write!(f, "dashboard"),
            View::Research => write!(f, "research"),
            View::AgentProcessing => write!(f, "agent processing"),
        }
    }
}

/// Transient record of the current drug selection and modification request
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ResearchSession {
    pub id: uuid::Uuid,
    pub drug: Drug,
    pub modification: String,
    /// False while the drug details are still "loading"
    pub loaded: bool,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl ResearchSession {
    pub fn new(drug: Drug) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            drug,
            modification: String::new(),
            loaded: false,
            started_at: chrono::Utc::now(),
        }
    }
}

/// Light/dark colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything other than the two literals is Dark.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "light" => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_stored() {
        assert_eq!(ThemeMode::from_stored("light"), ThemeMode::Light);
        assert_eq!(ThemeMode::from_stored("dark"), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_stored("Light"), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_stored("solarized"), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_stored(""), ThemeMode::Dark);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
    }

    #[test]
    fn test_new_session_starts_unloaded() {
        let drug = crate::catalog::Catalog::demo().drugs()[0].clone();
        let session = ResearchSession::new(drug);
        assert!(!session.loaded);
        assert!(session.modification.is_empty());
    }
}
