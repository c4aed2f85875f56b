//! Logging setup for the appbundle CLI.
//!
//! The library emits `tracing` events; this module installs the subscriber
//! that prints them.
//!
//! ```rust,no_run
//! use appbundle_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("Starting release build");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "appbundle=debug,appbundle_bundler=debug,appbundle_cli=debug";
const QUIET_FILTER: &str = "appbundle=error,appbundle_bundler=error,appbundle_cli=error";
const DEFAULT_FILTER: &str = "appbundle=info,appbundle_bundler=info,appbundle_cli=info";

/// Initialize the tracing subscriber.
///
/// The level is chosen in this order:
/// 1. `--verbose`: DEBUG for the appbundle crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`
/// 4. INFO for the appbundle crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };
    init_logger_with_filter(filter, no_color);
}

/// Initialize the subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    // A second initialization (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Whether colored output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_filters_parse() {
        for directives in [VERBOSE_FILTER, QUIET_FILTER, DEFAULT_FILTER] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{}", directives);
        }
    }

    #[test]
    fn test_repeated_initialization_is_harmless() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }

    #[test]
    #[serial]
    fn test_no_color_wins_over_force_color() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(!should_use_colors());
        unsafe {
            std::env::remove_var("NO_COLOR");
        }
        assert!(should_use_colors());
        unsafe {
            std::env::remove_var("FORCE_COLOR");
        }
    }
}
