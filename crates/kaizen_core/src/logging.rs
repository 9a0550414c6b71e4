use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::ExportConfig;

/// Rolling log files are named `export.YYYY-MM-DD`.
pub const LOG_FILE_PREFIX: &str = "export";

/// Directive string for the configured level. Export internals log one level
/// more verbosely than the rest of the host. An unparseable level falls back
/// to `info`.
pub fn default_filter(config: &ExportConfig) -> String {
    let level = config.log_level.trim();
    let level = if level.is_empty() || EnvFilter::try_new(level).is_err() {
        "info"
    } else {
        level
    };
    format!("{level},kaizen_docs=debug")
}

/// Install file logging under `~/.kaizen/logs`. Keep the returned guard alive
/// for as long as the host runs, or buffered lines are lost.
pub fn init_logging(config: &ExportConfig) -> Result<WorkerGuard> {
    let logs_dir = ExportConfig::logs_dir()?;
    init_logging_to_dir(&logs_dir, &default_filter(config))
}

/// Install file logging into `logs_dir`. `RUST_LOG` wins over `filter`.
pub fn init_logging_to_dir(logs_dir: &Path, filter: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create logs directory: {}", logs_dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX));
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_directory_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let logs_dir = tmp.path().join("nested").join("logs");

        // A second global subscriber in the same process is rejected, but
        // the directory exists either way.
        let result = init_logging_to_dir(&logs_dir, "warn");
        assert!(logs_dir.is_dir());
        if let Err(e) = result {
            assert!(e.to_string().contains("logging"), "unexpected error: {e}");
        }
    }

    #[test]
    fn test_default_filter_uses_configured_level() {
        let config = ExportConfig {
            log_level: "warn".into(),
            ..Default::default()
        };
        assert_eq!(default_filter(&config), "warn,kaizen_docs=debug");
    }

    #[test]
    fn test_default_filter_falls_back_to_info() {
        for level in ["", "   ", "loud=="] {
            let config = ExportConfig {
                log_level: level.into(),
                ..Default::default()
            };
            assert_eq!(default_filter(&config), "info,kaizen_docs=debug");
        }
    }
}
