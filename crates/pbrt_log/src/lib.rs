//! Logging.
//!
//! Everything logs through the [`log`] facade, whose macros are re-exported
//! here. Binaries install either [`env_logger`] through [`init_env_logger`]
//! or a [`CallbackLogger`] through [`init_callback_logger`] to receive each
//! record as a [`LogRecord`].

#[macro_use]
mod macros;
#[macro_use]
mod assert;

mod callback;
mod level;

#[doc(hidden)]
pub use assert::assertion_failed;
pub use callback::{CallbackLogger, LogCallback, LogRecord, init_callback_logger};
pub use level::{LogLevel, default_level};
pub use log::{debug, error, info, log_enabled, trace, warn};

use anyhow::{Result, anyhow};

/// Target that [`log_critical!`] attaches to error records so they are
/// reported as [`LogLevel::Critical`].
pub const CRITICAL_TARGET: &str = "critical";

/// Installs [`env_logger`] as the global logger. The `RUST_LOG` environment
/// variable overrides the [`default_level`].
///
/// # Errors
/// Returns an error if a global logger has already been installed.
pub fn init_env_logger() -> Result<()> {
    let env = env_logger::Env::default().default_filter_or(default_level().as_filter_str());
    env_logger::Builder::from_env(env)
        .try_init()
        .map_err(|error| anyhow!("Failed to install env_logger: {error}"))
}
