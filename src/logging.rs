use crate::config::LogConfig;
use anyhow::Context;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber writing to the file named in
/// `config`.  The terminal belongs to the game, so nothing is installed (and
/// all events are discarded) if no file is configured.
///
/// The filter is taken from `RUST_LOG` if that is set and otherwise from
/// `config.level`.
pub(crate) fn init(config: &LogConfig) -> anyhow::Result<()> {
    let Some(path) = config.file.as_deref() else {
        return Ok(());
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("invalid log level {:?}", config.level))?,
    };
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install logger")?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "{} starting",
        env!("CARGO_PKG_NAME")
    );
    Ok(())
}
