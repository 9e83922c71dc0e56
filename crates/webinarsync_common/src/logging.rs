//! Logging utilities for webinarsync.
//!
//! Every binary sets up tracing through this module so that all crates share
//! one format and one filter.

use std::path::Path;
use std::str::FromStr;

use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use webinarsync_config::LoggingConfig;

/// File name prefix of the rolling log files.
pub const LOG_FILE_PREFIX: &str = "webinarsync.log";

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` is honoured as well; the level given here applies to the
/// webinarsync crates.
pub fn init_with_level(level: Level) {
    let result = tracing_subscriber::registry()
        .with(stdout_layer())
        .with(build_filter(level))
        .try_init();

    // A subscriber may already be installed (tests, embedding).
    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize logging from the `logging` config section.
///
/// With `directory` set, a second non-blocking layer writes a daily rolling
/// file. The returned guard must be held for as long as logs should be
/// flushed to that file.
pub fn init_from_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let level = parse_level(config.level.as_deref());

    let Some(directory) = config.directory.as_deref() else {
        init_with_level(level);
        return None;
    };

    let appender = tracing_appender::rolling::daily(Path::new(directory), LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let result = tracing_subscriber::registry()
        .with(stdout_layer())
        .with(fmt::layer().with_ansi(false).with_target(true).with_writer(writer))
        .with(build_filter(level))
        .try_init();

    if result.is_ok() {
        info!(directory, "Logging initialized at level: {}", level);
    }
    Some(guard)
}

/// Parses a configured level name, falling back to INFO.
pub fn parse_level(level: Option<&str>) -> Level {
    level
        .and_then(|name| Level::from_str(name.trim()).ok())
        .unwrap_or(Level::INFO)
}

fn stdout_layer<S>() -> fmt::Layer<S> {
    fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
}

fn build_filter(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("webinarsync={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the result unchanged so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(Some("debug")), Level::DEBUG);
        assert_eq!(parse_level(Some(" WARN ")), Level::WARN);
        assert_eq!(parse_level(Some("loud")), Level::INFO);
        assert_eq!(parse_level(None), Level::INFO);
    }

    #[test]
    fn test_log_result_passes_through() {
        let ok: Result<u8, String> = Ok(1);
        assert_eq!(log_result(ok, "done", "failed"), Ok(1));
        let err: Result<u8, String> = Err("bad".into());
        assert_eq!(log_result(err, "done", "failed"), Err("bad".to_string()));
    }
}
