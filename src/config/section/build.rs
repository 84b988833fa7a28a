//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "dist"             # Output directory (relative to site root)
//! assets = ["styles", "assets"]  # Directories copied verbatim into output
//! ```
//!
//! Asset directories that do not exist are skipped with a hint instead of
//! failing the build, so a fresh project without an `assets/` folder still
//! builds.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Build output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build output directory.
    pub output: PathBuf,

    /// Static directories copied into the output as-is.
    pub assets: Vec<PathBuf>,

    /// Clean output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            assets: vec!["styles".into(), "assets".into()],
            clean: false,
        }
    }
}

impl BuildConfig {
    /// Validate build configuration.
    ///
    /// Absolute paths are rejected before normalization makes every path
    /// absolute, so this runs on the raw parsed values.
    pub fn validate_paths(&self, diag: &mut ConfigDiagnostics) {
        if self.output.as_os_str().is_empty() {
            diag.error_with_hint(
                FieldPath::new("build.output"),
                "output directory must not be empty",
                "use a relative directory like \"dist\"",
            );
        } else if self.output.is_absolute() {
            diag.error_with_hint(
                FieldPath::new("build.output"),
                format!("'{}' is absolute", self.output.display()),
                "output must be relative to the site root",
            );
        }

        for asset in &self.assets {
            if asset.is_absolute() {
                diag.error_with_hint(
                    FieldPath::new("build.assets"),
                    format!("'{}' is absolute", asset.display()),
                    "asset directories must be relative to the site root",
                );
            }
        }
    }

    /// Warn about missing asset directories after normalization.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for asset in &self.assets {
            if !asset.exists() {
                let rel_path = asset
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| asset.display().to_string());
                diag.hint(
                    FieldPath::new("build.assets"),
                    format!("directory '{}' not found, skipping", rel_path),
                );
            }
        }
    }

    /// Filter assets to only existing directories.
    ///
    /// Call after validate() to remove missing paths from copy and watch lists.
    pub fn filter_existing_assets(&mut self) {
        self.assets.retain(|p| p.exists());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(
            config.build.assets,
            vec![PathBuf::from("styles"), PathBuf::from("assets")]
        );
        assert!(!config.build.clean);
    }

    #[test]
    fn test_custom_output() {
        let config = test_parse_config("[build]\noutput = \"out\"\nassets = [\"static\"]");
        assert_eq!(config.build.output, PathBuf::from("out"));
        assert_eq!(config.build.assets, vec![PathBuf::from("static")]);
    }

    #[test]
    fn test_absolute_output_rejected() {
        let config = test_parse_config("[build]\noutput = \"/tmp/dist\"");
        let mut diag = ConfigDiagnostics::new();
        config.build.validate_paths(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_relative_paths_accepted() {
        let config = test_parse_config("[build]\noutput = \"dist\"\nassets = [\"styles\"]");
        let mut diag = ConfigDiagnostics::new();
        config.build.validate_paths(&mut diag);
        assert!(!diag.has_errors());
    }
}
