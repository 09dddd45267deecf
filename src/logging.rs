//! Logger initialization.
//!
//! Everything logs through the `log` facade. The interactive editor owns
//! the terminal, so it sends log output to a file instead of stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "forge_studio::engine=debug"). When unset, `RUST_LOG` is consulted, then
/// the `info` level is used.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    /// Append to this file instead of writing to stderr.
    pub file: Option<PathBuf>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        // No logger at all when the log file is unavailable, so nothing
        // reaches stderr underneath the editor.
        if let Some(mut builder) = builder(&config) {
            builder.init();
            log::debug!("logging initialized");
        }
    });
}

fn builder(config: &LoggingConfig) -> Option<env_logger::Builder> {
    let mut builder = env_logger::Builder::new();

    if let Some(filter) = &config.env_filter {
        builder.parse_filters(filter);
    } else if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }

    if let Some(path) = &config.file {
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        let file = OpenOptions::new().create(true).append(true).open(path).ok()?;
        builder
            .target(env_logger::Target::Pipe(Box::new(file)))
            .write_style(env_logger::WriteStyle::Never);
    }

    Some(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_filter_wins() {
        let config = LoggingConfig {
            env_filter: Some("warn".into()),
            file: None,
        };
        let logger = builder(&config).unwrap().build();
        assert_eq!(logger.filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_file_target_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("forge.log");
        let config = LoggingConfig {
            env_filter: Some("forge_studio::engine=debug".into()),
            file: Some(path.clone()),
        };
        assert!(builder(&config).is_some());
        assert!(path.exists());
    }

    #[test]
    fn test_unopenable_file_disables_logging() {
        // A regular file cannot be used as a directory.
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let config = LoggingConfig {
            env_filter: Some("forge_studio=debug".into()),
            file: Some(blocker.path().join("forge.log")),
        };
        assert!(builder(&config).is_none());
    }
}
