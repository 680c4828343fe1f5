use crate::game::Rules;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Board size, round count, and difficulty curve
    #[serde(default)]
    pub(crate) game: Rules,

    /// Where and how much to log
    #[serde(default)]
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("snake-rounds").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                tracing::debug!(path = %path.display(), "No configuration file; using defaults");
                return Ok(Config::default());
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct LogConfig {
    /// File to append log messages to.  Nothing is logged if this is unset.
    pub(crate) file: Option<PathBuf>,

    /// `tracing` filter directive used when `RUST_LOG` is not set
    pub(crate) level: String,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: String::from("info"),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::time::Duration;

    #[test]
    fn missing_file_allowed() {
        let tmpdir = tempfile::tempdir().expect("should be able to create a tempdir");
        let path = tmpdir.path().join("config.toml");
        let config = Config::load(&path, true).expect("missing file should give defaults");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn missing_file_not_allowed() {
        let tmpdir = tempfile::tempdir().expect("should be able to create a tempdir");
        let path = tmpdir.path().join("config.toml");
        let r = Config::load(&path, false);
        assert!(matches!(r, Err(ConfigError::Read(_))), "got {r:?}");
    }

    #[test]
    fn empty_file() {
        let tmpdir = tempfile::tempdir().expect("should be able to create a tempdir");
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "").expect("should be able to write config");
        let config = Config::load(&path, false).expect("empty file should parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.file, None);
    }

    #[test]
    fn custom_file() {
        let tmpdir = tempfile::tempdir().expect("should be able to create a tempdir");
        let path = tmpdir.path().join("config.toml");
        fs_err::write(
            &path,
            concat!(
                "[game]\n",
                "columns = 30\n",
                "rows = 12\n",
                "rounds = 3\n",
                "base-speed = 5\n",
                "\n",
                "[log]\n",
                "file = \"/tmp/snake.log\"\n",
                "level = \"debug\"\n",
            ),
        )
        .expect("should be able to write config");
        let config = Config::load(&path, true).expect("config should parse");
        assert_eq!(config.game.grid().width(), 30);
        assert_eq!(config.game.grid().height(), 12);
        assert_eq!(config.game.rounds(), 3);
        assert_eq!(config.game.tick_interval(0), Duration::from_millis(200));
        assert_eq!(config.game.target(0), 10);
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/snake.log")));
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn invalid_rules() {
        let tmpdir = tempfile::tempdir().expect("should be able to create a tempdir");
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[game]\nrows = 3\n").expect("should be able to write config");
        let e = Config::load(&path, true).expect_err("config should be rejected");
        assert!(matches!(e, ConfigError::Parse(_)), "got {e:?}");
        let source = e.source().map(ToString::to_string).unwrap_or_default();
        assert!(
            source.contains("a 50x3 board is too small"),
            "unexpected parse error {source:?}"
        );
    }
}
