//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with `info` as the default level.
///
/// `RUST_LOG` still takes precedence when it is set.
pub fn init() -> Result<(), log::SetLoggerError> {
    init_with_default("info")
}

/// Initialize the logging system with a custom default filter
pub fn init_with_default(default_filter: &str) -> Result<(), log::SetLoggerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init()
}
