//! Formatting utilities for sizes, durations and the release summary.

use std::path::Path;
use std::time::Duration;

use appbundle_bundler::DriverReport;
use console::Term;
use owo_colors::OwoColorize;

use super::colors_enabled;

/// Format a file size in human-readable form.
///
/// ```
/// use appbundle_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;
    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format a duration as `ms`, seconds or `m s`.
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

fn relative<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Print the files written by a release to stderr, grouped by application.
pub fn print_release_summary(report: &DriverReport, output_dir: &Path) {
    let width = (Term::stderr().size().1 as usize).clamp(20, 80);
    let rule = "─".repeat(width);
    let colors = colors_enabled();

    if colors {
        eprintln!("\n{}", "Release Summary".bold().underline());
    } else {
        eprintln!("\nRelease Summary");
    }
    eprintln!("{}", rule);

    let mut total = 0;
    let groups = report
        .applications
        .iter()
        .map(|app| (app.name.as_str(), app.files.as_slice()))
        .chain(std::iter::once(("support", report.support_files.as_slice())));

    for (name, files) in groups {
        if colors {
            eprintln!("  {}", name.bright_white().bold());
        } else {
            eprintln!("  {}", name);
        }
        for file in files {
            let size = file_size(file);
            total += size;
            let shown = relative(file, output_dir).display().to_string();
            if colors {
                eprintln!("    {} {} {}", "▸".blue(), shown, format_size(size).dimmed());
            } else {
                eprintln!("    ▸ {} {}", shown, format_size(size));
            }
        }
    }

    eprintln!("{}", rule);
    let footer = format!("{} files, {}", report.file_count(), format_size(total));
    if colors {
        eprintln!("  {} {}", "Total:".bold(), footer.green());
    } else {
        eprintln!("  Total: {}", footer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1_572_864), "1.50 MB");
        assert_eq!(format_size(2_147_483_648), "2.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative(Path::new("/out/panel/panel_module.js"), Path::new("/out")),
            Path::new("panel/panel_module.js")
        );
        assert_eq!(relative(Path::new("x.js"), Path::new("/out")), Path::new("x.js"));
    }
}
