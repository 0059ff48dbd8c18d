//! Logging bootstrap.
//!
//! stdout carries the MCP protocol, so log records go to stderr, or to
//! rotating files when a log directory is configured. Messages use an
//! `event=<name> key=value` shape.

use anyhow::{Context, Result, bail};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use std::path::Path;

const LOG_FILE_BASENAME: &str = "sheet-mcp";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

const SUPPORTED_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Normalize a plain level name; anything else is rejected
pub fn normalize_level(level: &str) -> Result<&'static str> {
    let lowered = level.trim().to_ascii_lowercase();
    match SUPPORTED_LEVELS.iter().find(|l| **l == lowered) {
        Some(level) => Ok(*level),
        None => bail!(
            "unsupported log level `{}`; expected one of: {}",
            level,
            SUPPORTED_LEVELS.join(", ")
        ),
    }
}

/// Start the logger
///
/// `RUST_LOG` takes precedence over `level`. Keep the returned handle alive
/// for the lifetime of the process.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<LoggerHandle> {
    let level = normalize_level(level)?;
    let logger = Logger::try_with_env_or_str(level)
        .with_context(|| format!("invalid log level `{level}`"))?;

    let handle = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory `{}`", dir.display()))?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()
        }
        None => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::default_format)
            .start(),
    }
    .context("failed to start logger")?;

    info!(
        "event=app_start status=ok platform={} version={} level={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        level
    );
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" debug ").unwrap(), "debug");
        assert!(normalize_level("verbose").is_err());
    }
}
