//! Logging setup. Events go to stderr as JSON lines by default.

use std::io::IsTerminal;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::common::config::LogFormat;
use crate::common::error::ConfigError;

/// Install the global subscriber.
///
/// A second call keeps the subscriber already installed; tests and embedders
/// may have set their own.
pub fn init(level: &str, format: LogFormat) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_new(level).map_err(|_| ConfigError::InvalidValue {
        key: "MEDPREDICT_LOG_LEVEL",
        value: level.to_string(),
        expected: "a tracing filter directive such as `info`",
    })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(use_ansi(format, std::io::stderr().is_terminal()))
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(err) = installed {
        debug!(error = %err, "global subscriber not replaced");
    }
    Ok(())
}

/// Colour only human-readable output going to a terminal.
fn use_ansi(format: LogFormat, terminal: bool) -> bool {
    format == LogFormat::Text && terminal
}
