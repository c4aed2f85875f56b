//! Release build command.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use appbundle_bundler::{DriverReport, JsonDescriptorLoader, NativeRuntime, ReleaseDriver};

use crate::cli::Cli;
use crate::config::ReleaseConfig;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// Execute a release build.
///
/// 1. Load configuration (CLI > Env > File > Defaults)
/// 2. Validate the input directory
/// 3. Build every application in order, then copy the support files
/// 4. Print the summary
pub fn execute(args: &Cli) -> Result<DriverReport> {
    let start_time = Instant::now();

    validate_input_dir(&args.input_path)?;
    let config = ReleaseConfig::load(args)?;
    tracing::debug!(?config, "Loaded configuration");

    if !args.quiet {
        if config.rollup {
            ui::warning("Rollup concatenation is accepted but does not change the artifacts");
        }
        ui::info(&format!(
            "Building {} from {} (minify: {})",
            args.applications.join(", "),
            args.input_path.display(),
            config.minify
        ));
    }

    let report = build(&config, &args.input_path, &args.output_path, &args.applications)?;

    if !args.quiet {
        ui::print_release_summary(&report, &args.output_path);
        ui::success(&format!(
            "Release completed in {}",
            ui::format_duration(start_time.elapsed())
        ));
    }

    Ok(report)
}

/// Run the driver on the native filesystem.
pub fn build(
    config: &ReleaseConfig,
    input_dir: &Path,
    output_dir: &Path,
    applications: &[String],
) -> Result<DriverReport> {
    let runtime = Arc::new(NativeRuntime::new());
    let resolver = Arc::new(JsonDescriptorLoader::new(input_dir, runtime.clone()));
    let driver = ReleaseDriver::new(config.to_options(input_dir, output_dir), resolver, runtime);

    Ok(driver.run(applications)?)
}

fn validate_input_dir(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).with_path(path)?;
    if !metadata.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "--input_path must be a directory: {}",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use appbundle_bundler::MinifyLevel;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_input_dir() {
        let temp = TempDir::new().unwrap();
        let err = validate_input_dir(&temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_input_path_must_be_a_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("shell.json");
        fs::write(&file, "{}").unwrap();

        let err = validate_input_dir(&file).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_build_writes_release() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let root = input.path();
        fs::write(root.join("root.js"), "export {};").unwrap();
        fs::write(root.join("RuntimeInstantiator.js"), "export {};").unwrap();
        fs::write(root.join("shell.json"), r#"{"modules": [{"name": "panel"}]}"#).unwrap();
        fs::write(root.join("shell.js"), "").unwrap();
        fs::create_dir(root.join("panel")).unwrap();
        fs::write(root.join("panel/module.json"), "{}").unwrap();

        let config = ReleaseConfig {
            minify: MinifyLevel::None,
            ..ReleaseConfig::default()
        };
        let report = build(&config, root, output.path(), &["shell".to_string()]).unwrap();

        assert_eq!(report.file_count(), 4);
        assert!(output.path().join("panel/panel_module.js").is_file());
    }

    #[test]
    fn test_bundler_errors_are_build_errors() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let err = build(&ReleaseConfig::default(), input.path(), output.path(), &["shell".to_string()])
            .unwrap_err();
        assert!(matches!(err, CliError::Build(_)));
    }
}
