use std::sync::OnceLock;

use env_logger::{Builder, Env};
use log::LevelFilter;

// Level chosen at startup, restored when logging is re-enabled.
static FILTER: OnceLock<LevelFilter> = OnceLock::new();

macro_rules! eprintln_red {
    () => {
        eprintln!();
    };
    ($($arg:tt)+) => {
        eprintln!("\x1B[31;1m{}\x1B[0m", format_args!($($arg)+));
    };
}

/// Installs `env_logger`. The default filter is `info`; `RUST_LOG`
/// overrides it.
pub fn init(quiet: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp(None).format_target(false);

    let logger = builder.build();
    let filter = logger.filter();

    let _ = FILTER.set(filter);

    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(filter);
    }

    if quiet {
        set_log_enabled(false);
    }
}

/// Silences every log macro while a terminal renderer owns the screen.
pub fn set_log_enabled(enabled: bool) {
    let level = if enabled {
        FILTER.get().copied().unwrap_or(LevelFilter::Info)
    } else {
        LevelFilter::Off
    };

    log::set_max_level(level);
}
