//! Conditional logging macros that check a module-level `ENABLE_LOGS` flag.
//!
//! Usage:
//! ```ignore
//! // In your module, define the flag first:
//! const ENABLE_LOGS: bool = true;
//!
//! // Then use the macros (they're exported at the crate root):
//! use crate::{log_info, log_warn, log_error};
//!
//! log_info!("shirt {} created", shirt_id);
//! ```

/// Conditional info logging, gated on the caller's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Conditional warn logging, gated on the caller's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Conditional error logging, gated on the caller's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}

/// Initialize the global logger. Defaults to info; `debug` raises the crate's
/// own modules to debug. `RUST_LOG`, when set, takes precedence over both.
pub fn init(debug: bool) {
    let rust_log = std::env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    // Keeps the first logger if one is already installed.
    let _ = builder(debug, rust_log.as_deref()).try_init();
}

fn builder(debug: bool, rust_log: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    if debug {
        builder.filter_module("kitbag_lib", log::LevelFilter::Debug);
    }
    if let Some(filters) = rust_log.filter(|filters| !filters.trim().is_empty()) {
        builder.parse_filters(filters);
    }
    builder
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::*;

    #[test]
    fn defaults_to_info() {
        assert_eq!(builder(false, None).build().filter(), LevelFilter::Info);
        assert_eq!(builder(false, Some("  ")).build().filter(), LevelFilter::Info);
    }

    #[test]
    fn debug_flag_raises_crate_modules() {
        assert_eq!(builder(true, None).build().filter(), LevelFilter::Debug);
    }

    #[test]
    fn rust_log_overrides_the_default_level() {
        assert_eq!(builder(false, Some("warn")).build().filter(), LevelFilter::Warn);
        assert_eq!(builder(false, Some("trace")).build().filter(), LevelFilter::Trace);
    }
}
