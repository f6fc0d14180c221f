//! Tracing setup for the server and the CLI.
//!
//! The server writes compact lines to stdout and mirrors them, without ANSI colors, into a log
//! file. `DOCSUM_LOG_FILE` picks the file; otherwise `logs/docsum.log` is used. The CLI only
//! writes warnings to stderr so its stdout stays clean for the summary.
use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_VAR: &str = "DOCSUM_LOG_FILE";
const DEFAULT_LOG_FILE: &str = "logs/docsum.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Configure tracing for the HTTP server.
///
/// `RUST_LOG` controls filtering and defaults to `info`. When the log file cannot be opened the
/// server keeps running with stdout logging only.
pub fn init_tracing() {
    let file_layer = file_writer().map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .compact()
    });

    let _ = tracing_subscriber::registry()
        .with(filter_or("info"))
        .with(fmt::layer().with_target(false).compact())
        .with(file_layer)
        .try_init();
}

/// Install a stderr-only subscriber for command-line use.
pub fn init_cli_tracing() {
    let _ = tracing_subscriber::registry()
        .with(filter_or("warn"))
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn log_file_path(configured: Option<String>) -> PathBuf {
    configured
        .filter(|path| !path.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn file_writer() -> Option<NonBlocking> {
    let path = log_file_path(std::env::var(LOG_FILE_VAR).ok());
    match open_log_file(&path) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let _ = LOG_GUARD.set(guard);
            Some(writer)
        }
        Err(err) => {
            eprintln!("Failed to open log file {}: {err}", path.display());
            None
        }
    }
}
