// Logger initialization
//
// The TUI owns the terminal, so in that mode logs go to a daily rolling file
// in the data directory. Headless mode writes to stderr and leaves stdout for
// progress output.

use crate::config::Config;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
}

/// `RUST_LOG` wins over the configured filter
fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log.filter.clone().into())
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered file logs are flushed.
pub fn init_logger(config: &Config, target: LogTarget) -> anyhow::Result<Option<WorkerGuard>> {
    match target {
        LogTarget::File => {
            let dir = config.data_dir();
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, &config.log.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(env_filter(config))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .try_init()?;
            Ok(Some(guard))
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(env_filter(config))
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
            Ok(None)
        }
    }
}
