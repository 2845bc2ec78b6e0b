//! Severity levels.

use std::fmt;

/// Severity of a log record, from most to least verbose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    /// An error the application is not expected to recover from. Recorded
    /// through the facade as an error with the
    /// [`CRITICAL_TARGET`](crate::CRITICAL_TARGET) target.
    Critical,
}

/// The level enabled by default for the current build: [`LogLevel::Trace`]
/// with the `verbose` feature, otherwise [`LogLevel::Debug`] in debug builds
/// and [`LogLevel::Info`] in release builds.
pub const fn default_level() -> LogLevel {
    if cfg!(feature = "verbose") {
        LogLevel::Trace
    } else if cfg!(debug_assertions) {
        LogLevel::Debug
    } else {
        LogLevel::Info
    }
}

impl LogLevel {
    /// Determines the level of a facade record, taking the critical target
    /// into account.
    pub fn of_record(level: log::Level, target: &str) -> Self {
        match level {
            log::Level::Error if target == crate::CRITICAL_TARGET => Self::Critical,
            level => level.into(),
        }
    }

    /// The facade level this level is recorded at.
    pub const fn to_level(self) -> log::Level {
        match self {
            Self::Trace => log::Level::Trace,
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warning => log::Level::Warn,
            Self::Error | Self::Critical => log::Level::Error,
        }
    }

    /// The facade filter letting through this level and everything more
    /// severe.
    pub fn to_level_filter(self) -> log::LevelFilter {
        self.to_level().to_level_filter()
    }

    pub(crate) const fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error | Self::Critical => "error",
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => Self::Trace,
            log::Level::Debug => Self::Debug,
            log::Level::Info => Self::Info,
            log::Level::Warn => Self::Warning,
            log::Level::Error => Self::Error,
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        level.to_level()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Critical);
    }

    #[test]
    fn converting_facade_levels_round_trips() {
        for level in [
            log::Level::Trace,
            log::Level::Debug,
            log::Level::Info,
            log::Level::Warn,
            log::Level::Error,
        ] {
            assert_eq!(LogLevel::from(level).to_level(), level);
        }
    }

    #[test]
    fn critical_is_recorded_as_error() {
        assert_eq!(LogLevel::Critical.to_level(), log::Level::Error);
        assert_eq!(
            LogLevel::of_record(log::Level::Error, crate::CRITICAL_TARGET),
            LogLevel::Critical
        );
        assert_eq!(
            LogLevel::of_record(log::Level::Error, "pbrt_ecs::scene"),
            LogLevel::Error
        );
        assert_eq!(
            LogLevel::of_record(log::Level::Warn, crate::CRITICAL_TARGET),
            LogLevel::Warning
        );
    }

    #[test]
    fn default_level_depends_on_build() {
        let level = default_level();
        if cfg!(feature = "verbose") {
            assert_eq!(level, LogLevel::Trace);
        } else if cfg!(debug_assertions) {
            assert_eq!(level, LogLevel::Debug);
        } else {
            assert_eq!(level, LogLevel::Info);
        }
    }
}
