use appbundle_bundler::MinifyLevel;

/// Parse a `--minify` value.
pub fn parse_minify_level(s: &str) -> Result<MinifyLevel, String> {
    MinifyLevel::parse(s).map_err(|e| e.to_string())
}

/// Validate an application name.
///
/// Names become file names in both the input and output directories, so
/// they cannot be empty or contain path separators.
pub fn parse_application_name(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("Application name cannot be empty".to_string());
    }
    if s.contains(['/', '\\']) || s == "." || s == ".." {
        return Err(format!(
            "Application name must be a plain name, not a path: '{}'",
            s
        ));
    }
    Ok(s.to_string())
}
