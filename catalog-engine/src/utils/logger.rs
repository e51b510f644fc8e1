//! Logging Infrastructure
//!
//! Structured logging setup for hosts embedding the catalog engine.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::core::Config;

/// Initialize the logger at `info`
pub fn init_logger() -> bool {
    init_logger_with_file(None, None)
}

/// Initialize the logger from a loaded [`Config`]
pub fn init_logger_from_config(config: &Config) -> bool {
    init_logger_with_file(Some(config.log_level.as_str()), config.log_dir.as_deref())
}

/// Initialize the logger with optional file output
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) -> bool {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir exists
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "catalog-engine");
            return subscriber
                .with_writer(file_appender)
                .with_ansi(false)
                .try_init()
                .is_ok();
        }
    }

    subscriber.try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            log_level: "debug".to_string(),
            log_dir: dir.path().to_str().map(String::from),
            ..Config::default()
        };

        // Only one global subscriber per process
        let _ = init_logger_from_config(&config);
        assert!(!init_logger());
        assert!(!init_logger_with_file(Some("warn"), None));
    }
}
