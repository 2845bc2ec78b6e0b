//! Forwarding of log records to a user callback.

use crate::LogLevel;
use anyhow::{Result, anyhow};
use parking_lot::RwLock;
use std::{fmt, time::SystemTime};

/// A log record handed to the callback of a [`CallbackLogger`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: SystemTime,
    pub level: LogLevel,
    pub message: String,
    pub target: String,
    pub module_path: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

/// Receiver of the records accepted by a [`CallbackLogger`].
pub type LogCallback = Box<dyn Fn(&LogRecord) + Send + Sync>;

/// A [`log::Log`] implementation passing every enabled record on to a
/// replaceable callback. Records are dropped while no callback is set.
pub struct CallbackLogger {
    callback: RwLock<Option<LogCallback>>,
    max_level: RwLock<LogLevel>,
}

impl LogRecord {
    /// Captures the given facade record, stamped with the current time.
    pub fn from_record(record: &log::Record<'_>) -> Self {
        Self {
            timestamp: SystemTime::now(),
            level: LogLevel::of_record(record.level(), record.target()),
            message: record.args().to_string(),
            target: record.target().to_owned(),
            module_path: record.module_path().map(str::to_owned),
            file: record.file().map(str::to_owned),
            line: record.line(),
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.level)?;
        if let (Some(file), Some(line)) = (&self.file, self.line) {
            write!(f, " {file}:{line}")?;
        }
        write!(f, "] {}", self.message)
    }
}

impl CallbackLogger {
    /// Creates a logger without a callback that accepts records at `max_level`
    /// and above.
    pub fn new(max_level: LogLevel) -> Self {
        Self {
            callback: RwLock::new(None),
            max_level: RwLock::new(max_level),
        }
    }

    /// Creates a logger passing records at `max_level` and above to
    /// `callback`.
    pub fn with_callback(
        callback: impl Fn(&LogRecord) + Send + Sync + 'static,
        max_level: LogLevel,
    ) -> Self {
        let logger = Self::new(max_level);
        logger.set_callback(callback);
        logger
    }

    /// Replaces the current callback.
    pub fn set_callback(&self, callback: impl Fn(&LogRecord) + Send + Sync + 'static) {
        *self.callback.write() = Some(Box::new(callback));
    }

    /// Removes the current callback, so that records are dropped.
    pub fn clear_callback(&self) {
        *self.callback.write() = None;
    }

    pub fn has_callback(&self) -> bool {
        self.callback.read().is_some()
    }

    pub fn max_level(&self) -> LogLevel {
        *self.max_level.read()
    }

    /// Changes the least severe level that is accepted. When this is the
    /// global logger, the facade's own filter is raised to match so that
    /// newly enabled records reach it.
    pub fn set_max_level(&self, max_level: LogLevel) {
        *self.max_level.write() = max_level;
        if log::max_level() < max_level.to_level_filter() {
            log::set_max_level(max_level.to_level_filter());
        }
    }

}

impl log::Log for CallbackLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.max_level().to_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if LogLevel::of_record(record.level(), record.target()) < self.max_level() {
            return;
        }
        if let Some(callback) = self.callback.read().as_ref() {
            callback(&LogRecord::from_record(record));
        }
    }

    fn flush(&self) {}
}

impl fmt::Debug for CallbackLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackLogger")
            .field("has_callback", &self.has_callback())
            .field("max_level", &self.max_level())
            .finish()
    }
}

/// Installs a [`CallbackLogger`] forwarding records at `max_level` and above
/// to `callback` as the global logger, and returns it so that the callback
/// and level can be changed later.
///
/// # Errors
/// Returns an error if a global logger has already been installed.
pub fn init_callback_logger(
    callback: impl Fn(&LogRecord) + Send + Sync + 'static,
    max_level: LogLevel,
) -> Result<&'static CallbackLogger> {
    let logger: &'static CallbackLogger =
        Box::leak(Box::new(CallbackLogger::with_callback(callback, max_level)));
    log::set_logger(logger)
        .map_err(|error| anyhow!("Failed to install callback logger: {error}"))?;
    log::set_max_level(max_level.to_level_filter());
    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn collecting_logger(max_level: LogLevel) -> (CallbackLogger, Arc<Mutex<Vec<LogRecord>>>) {
        let records = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&records);
        let logger = CallbackLogger::with_callback(
            move |record| sink.lock().push(record.clone()),
            max_level,
        );
        (logger, records)
    }

    fn submit(logger: &CallbackLogger, level: log::Level, target: &str, message: &str) {
        logger.log(
            &log::Record::builder()
                .level(level)
                .target(target)
                .args(format_args!("{message}"))
                .file(Some("scene.rs"))
                .line(Some(42))
                .module_path(Some("pbrt_ecs::scene"))
                .build(),
        );
    }

    #[test]
    fn records_reach_callback_with_level_and_message() {
        let (logger, records) = collecting_logger(LogLevel::Trace);
        submit(&logger, log::Level::Info, "pbrt", "entity created");
        submit(&logger, log::Level::Warn, "pbrt", "something odd");

        let records = records.lock();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, LogLevel::Info);
        assert_eq!(records[0].message, "entity created");
        assert_eq!(records[0].file.as_deref(), Some("scene.rs"));
        assert_eq!(records[0].line, Some(42));
        assert_eq!(records[0].module_path.as_deref(), Some("pbrt_ecs::scene"));
        assert_eq!(records[1].level, LogLevel::Warning);
    }

    #[test]
    fn records_below_max_level_are_dropped() {
        let (logger, records) = collecting_logger(LogLevel::Warning);
        submit(&logger, log::Level::Debug, "pbrt", "hidden");
        submit(&logger, log::Level::Info, "pbrt", "hidden");
        submit(&logger, log::Level::Error, "pbrt", "shown");
        assert_eq!(records.lock().len(), 1);
        assert!(!logger.enabled(&log::Metadata::builder().level(log::Level::Info).build()));
        assert!(logger.enabled(&log::Metadata::builder().level(log::Level::Warn).build()));
    }

    #[test]
    fn only_critical_records_pass_critical_filter() {
        let (logger, records) = collecting_logger(LogLevel::Critical);
        submit(&logger, log::Level::Error, "pbrt", "plain error");
        submit(&logger, log::Level::Error, crate::CRITICAL_TARGET, "fatal");
        let records = records.lock();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Critical);
        assert_eq!(records[0].message, "fatal");
    }

    #[test]
    fn records_without_callback_are_dropped() {
        let (logger, records) = collecting_logger(LogLevel::Trace);
        logger.clear_callback();
        assert!(!logger.has_callback());
        submit(&logger, log::Level::Error, "pbrt", "lost");
        assert!(records.lock().is_empty());
    }

    #[test]
    fn replacing_callback_redirects_records() {
        let (logger, first) = collecting_logger(LogLevel::Trace);
        let second = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&second);
        logger.set_callback(move |record: &LogRecord| sink.lock().push(record.message.clone()));
        submit(&logger, log::Level::Info, "pbrt", "after");
        assert!(first.lock().is_empty());
        assert_eq!(second.lock().as_slice(), ["after".to_owned()]);
    }

    #[test]
    fn lowering_max_level_lets_more_records_through() {
        let (logger, records) = collecting_logger(LogLevel::Error);
        submit(&logger, log::Level::Debug, "pbrt", "hidden");
        logger.set_max_level(LogLevel::Debug);
        assert_eq!(logger.max_level(), LogLevel::Debug);
        submit(&logger, log::Level::Debug, "pbrt", "shown");
        assert_eq!(records.lock().len(), 1);
    }

    #[test]
    fn record_display_includes_level_and_location() {
        let (logger, records) = collecting_logger(LogLevel::Trace);
        submit(&logger, log::Level::Error, crate::CRITICAL_TARGET, "boom");
        assert_eq!(records.lock()[0].to_string(), "[CRITICAL scene.rs:42] boom");
    }
}
