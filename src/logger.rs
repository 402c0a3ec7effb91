//! Custom logging module.
//!
//! This module provides a logger implementation that formats log entries and
//! forwards them to a callback, so the front end decides where they go.

use crate::error::AppError;
use log::{LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

type LogCallback = Box<dyn Fn(String) + Send + Sync>;

/// Render a record as `timestamp LEVEL [target] message`.
///
pub fn format_log(record: &Record) -> String {
    format!(
        "{} {:<5} [{}] {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.args()
    )
}

/// Logger that forwards formatted records at or above its level to a
/// callback.
///
pub struct CustomLogger {
    level: LevelFilter,
    log_callback: Arc<Mutex<Option<LogCallback>>>,
}

impl CustomLogger {
    pub fn new(level: LevelFilter) -> Self {
        CustomLogger {
            level,
            log_callback: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_log_callback(&self, callback: LogCallback) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(callback) = self.log_callback.lock() {
                if let Some(ref cb) = *callback {
                    cb(format_log(record));
                }
            }
        }
    }

    fn flush(&self) {}
}

/// Install a [`CustomLogger`] writing to stderr as the global logger.
///
pub fn init(level: LevelFilter) -> Result<(), AppError> {
    let logger = CustomLogger::new(level);
    logger.set_log_callback(Box::new(|line| eprintln!("{}", line)));
    log::set_boxed_logger(Box::new(logger)).map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}
