//! Per-run file logging.
//!
//! Every run writes to its own `logs/photos_<timestamp>.log` under the config
//! directory. The HTTP stack is held at `warn` so request headers (and the
//! bearer token in them) never reach the file.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use env_logger::{Builder, Logger, Target};
use log::LevelFilter;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::resolve;

/// Log targets that may carry OAuth details at verbose levels.
const QUIET_TARGETS: &[&str] = &["ureq", "rustls"];

/// The log file opened for this run.
#[derive(Debug, Clone)]
pub struct RunLog {
    pub path: PathBuf,
}

/// `photos_20240131_09h05m07s.log`
pub fn log_file_name(now: DateTime<Local>) -> String {
    format!("photos_{}.log", now.format("%Y%m%d_%Hh%Mm%Ss"))
}

/// Create `<config_dir>/logs` unless it already exists.
pub fn ensure_log_dir(config_dir: &Path) -> Result<PathBuf> {
    let dir = resolve::logs_dir(config_dir);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    Ok(dir)
}

/// Build the logger writing to `file`.
pub fn build_logger(file: File) -> Logger {
    let mut builder = Builder::new();
    builder
        .target(Target::Pipe(Box::new(file)))
        .filter_level(LevelFilter::Trace)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<12} {:<8} {} ({}:{})",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.target(),
                record.level(),
                record.args(),
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0),
            )
        });
    for target in QUIET_TARGETS {
        builder.filter_module(target, LevelFilter::Warn);
    }
    builder.build()
}

/// Open this run's log file and install it as the process logger.
pub fn init(config_dir: &Path) -> Result<RunLog> {
    let dir = ensure_log_dir(config_dir)?;
    let path = dir.join(log_file_name(Local::now()));
    let file =
        File::create(&path).with_context(|| format!("creating log file {}", path.display()))?;

    let logger = build_logger(file);
    let max_level = logger.filter();
    log::set_boxed_logger(Box::new(logger)).context("logger already installed")?;
    log::set_max_level(max_level);

    Ok(RunLog { path })
}
