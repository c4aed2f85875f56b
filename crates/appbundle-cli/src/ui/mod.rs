//! Terminal output: status lines and the release summary.
//!
//! ```no_run
//! use appbundle_cli::ui;
//!
//! ui::init_colors(false);
//! ui::info("Building shell");
//! ui::success("Release complete");
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

mod format;
mod messages;

pub use format::{format_duration, format_size, print_release_summary};
pub use messages::{error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Decide once whether status output is colored.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && crate::logger::should_use_colors();
    COLORS.store(enabled, Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
