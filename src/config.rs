use crate::types::AppResult;
use serde::Deserialize;
use std::path::PathBuf;

/// Environment prefix, e.g. `MED_LANE__RUNNER__AGENT_DURATION_MS=4000`
pub const ENV_PREFIX: &str = "MED_LANE";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub runner: RunnerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub tui: TuiConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// Simulated time each agent spends, split evenly across its tasks
    pub agent_duration_ms: u64,
    /// How long the research view "loads" drug details
    pub research_load_ms: u64,
    /// Fail the patent agent's freedom-to-operate check
    pub demo_failure: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TuiConfig {
    pub tick_rate_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub filter: String,
    pub file_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runner: RunnerConfig {
                agent_duration_ms: 10_000,
                research_load_ms: 3_000,
                demo_failure: true,
            },
            storage: StorageConfig { data_dir: None },
            tui: TuiConfig { tick_rate_ms: 100 },
            log: LogConfig {
                filter: "med_lane=info".to_string(),
                file_prefix: "med-lane.log".to_string(),
            },
        }
    }
}

impl Config {
    /// Defaults, overlaid with `.env` and `MED_LANE__*` environment variables
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::build(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    fn build(env: config::Environment) -> AppResult<Self> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default(
                "runner.agent_duration_ms",
                defaults.runner.agent_duration_ms,
            )?
            .set_default(
                "runner.research_load_ms",
                defaults.runner.research_load_ms,
            )?
            .set_default("runner.demo_failure", defaults.runner.demo_failure)?
            .set_default("tui.tick_rate_ms", defaults.tui.tick_rate_ms)?
            .set_default("log.filter", defaults.log.filter)?
            .set_default("log.file_prefix", defaults.log.file_prefix)?
            .add_source(env.try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Directory holding the theme preference and TUI log files
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage.data_dir {
            return dir.clone();
        }
        std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(dirs::data_dir)
            .map(|d| d.join("med-lane"))
            .unwrap_or_else(|| PathBuf::from(".med-lane"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let config = Config::build(env(&[])).unwrap();
        assert_eq!(config.runner.agent_duration_ms, 10_000);
        assert_eq!(config.runner.research_load_ms, 3_000);
        assert!(config.runner.demo_failure);
        assert_eq!(config.tui.tick_rate_ms, 100);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::build(env(&[
            ("MED_LANE__RUNNER__AGENT_DURATION_MS", "2500"),
            ("MED_LANE__RUNNER__DEMO_FAILURE", "false"),
            ("MED_LANE__STORAGE__DATA_DIR", "/tmp/med-lane-test"),
        ]))
        .unwrap();
        assert_eq!(config.runner.agent_duration_ms, 2500);
        assert!(!config.runner.demo_failure);
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/med-lane-test"));
    }

    #[test]
    fn test_bad_value_is_config_error() {
        let err = Config::build(env(&[("MED_LANE__TUI__TICK_RATE_MS", "fast")])).unwrap_err();
        assert!(matches!(err, crate::types::AppError::Config(_)));
    }
}
