//! Logging verbosity switch (`-l`, §6).
//!
//! Mirrors `router_core::agent`'s use of `tracing`: this just picks a
//! filter and installs a `tracing-subscriber` `fmt` layer. `None` installs
//! nothing at all, matching the flag's intent rather than installing a
//! subscriber at an unreachable level.

use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Install a global `tracing` subscriber appropriate for `level`. Best
/// effort: if a subscriber is already installed (e.g. under a test
/// harness), the failure is swallowed.
pub fn init(level: LogLevel) {
    let filter = match level {
        LogLevel::None => return,
        LogLevel::Normal => EnvFilter::new("info"),
        LogLevel::Verbose => EnvFilter::new("debug"),
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
