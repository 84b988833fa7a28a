//! Tool configuration management for `folio.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── render     # [render]
//! │   ├── serve      # [serve]
//! │   └── site       # [site]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Global config handle
//! └── mod.rs         # ToolConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section    | Purpose                                      |
//! |------------|----------------------------------------------|
//! | `[site]`   | Content and template file locations          |
//! | `[build]`  | Output directory, static asset copying       |
//! | `[render]` | Scroll-reveal and debounce behavior          |
//! | `[serve]`  | Development server (port, interface, watch)  |
//!
//! `folio.toml` itself is optional: a project that sticks to the default
//! layout (`config.json`, `index.html`, `dist/`) needs no config file at all.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

// Re-export from section/
pub use section::{AnimationConfig, BuildConfig, RenderConfig, ServeConfig, SiteConfig};

// Re-export from types/
pub use types::{
    ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config, reload_config,
};

use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file name looked up in the site root.
pub const CONFIG_FILE_NAME: &str = "folio.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Absolute path to the config file, `None` when running on defaults
    /// (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Site root directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Content and template locations
    #[serde(default)]
    pub site: SiteConfig,

    /// Build output settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Page script settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            root: PathBuf::new(),
            site: SiteConfig::default(),
            build: BuildConfig::default(),
            render: RenderConfig::default(),
            serve: ServeConfig::default(),
        }
    }
}

impl ToolConfig {
    /// Load configuration for a site root.
    ///
    /// With an explicit root the config is read from `<root>/folio.toml`.
    /// Without one, the file is searched upward from cwd and its parent
    /// directory becomes the root; if no config exists anywhere, cwd is the
    /// root and every section keeps its defaults.
    pub fn load(root: Option<&Path>) -> Result<Self> {
        let (root_dir, config_path) = Self::resolve_paths(root)?;

        let mut config = match &config_path {
            Some(path) => Self::from_path(path)?,
            None => {
                crate::debug!("config"; "no {CONFIG_FILE_NAME} found, using defaults");
                Self::default()
            }
        };

        // Validate raw paths before normalization makes them absolute
        config.validate_paths()?;

        config.root = root_dir;
        config.config_path = config_path;
        config.finalize();

        config.validate()?;
        // Filter out non-existent asset dirs after the validation hint
        config.build.filter_existing_assets();

        Ok(config)
    }

    /// Resolve root directory and config file path.
    fn resolve_paths(root: Option<&Path>) -> Result<(PathBuf, Option<PathBuf>)> {
        if let Some(root) = root {
            let candidate = root.join(CONFIG_FILE_NAME);
            let config_path = candidate.exists().then_some(candidate);
            return Ok((root.to_path_buf(), config_path));
        }

        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        match find_config_file(Path::new(CONFIG_FILE_NAME)) {
            Some(path) => {
                let root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                Ok((root, Some(path)))
            }
            None => Ok((cwd, None)),
        }
    }

    /// Finalize configuration after loading.
    ///
    /// Anchors every configured path at the site root as an absolute path.
    fn finalize(&mut self) {
        let root = crate::utils::fs::normalize_path(&self.root);

        if let Some(path) = self.config_path.take() {
            self.config_path = Some(crate::utils::fs::normalize_path(&path));
        }

        self.site.content = crate::utils::fs::normalize_path(&root.join(&self.site.content));
        self.site.template = crate::utils::fs::normalize_path(&root.join(&self.site.template));
        self.build.output = crate::utils::fs::normalize_path(&root.join(&self.build.output));
        self.build.assets = self
            .build
            .assets
            .iter()
            .map(|p| crate::utils::fs::normalize_path(&root.join(p)))
            .collect();

        self.root = root;
    }

    /// Load configuration from file path with unknown field detection.
    ///
    /// Unknown fields are warned about and ignored rather than prompted on,
    /// so a watch-mode reload never blocks on stdin.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        // Show only filename (folio.toml) since it's always at site root
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Pre-validate paths before normalization.
    ///
    /// This must run before `finalize()` because normalization converts
    /// relative paths to absolute paths, making it impossible to detect if
    /// the user specified an absolute path in the config.
    fn validate_paths(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.build.validate_paths(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.build.validate(&mut diag);
        self.render.validate(&mut diag);
        self.serve.validate(&mut diag);

        // Print collected warnings (grouped display)
        diag.print_warnings();

        // Return all collected errors
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ToolConfig {
    let (parsed, ignored) = ToolConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        let result: Result<ToolConfig, _> = toml::from_str("[serve\nport = 4173");
        assert!(result.is_err());
    }

    #[test]
    fn test_tool_config_default() {
        let config = ToolConfig::default();

        assert!(config.config_path.is_none());
        assert_eq!(config.root, PathBuf::new());
        assert_eq!(config.site.content, PathBuf::from("config.json"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(config.serve.port, 4173);
        assert!(config.render.animation.enable);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[serve]\nport = 8080\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = ToolConfig::parse_with_ignored(content).unwrap();

        // Config should parse successfully
        assert_eq!(config.serve.port, 8080);

        // Unknown fields should be collected
        assert!(!ignored.is_empty());
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site]\ncontent = \"config.json\"";
        let (_, ignored) = ToolConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_load_with_explicit_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[serve]\nport = 9000").unwrap();

        let config = ToolConfig::load(Some(dir.path())).unwrap();
        assert_eq!(config.serve.port, 9000);
        assert!(config.config_path.is_some());
        assert_eq!(config.root, crate::utils::fs::normalize_path(dir.path()));
    }

    #[test]
    fn test_load_without_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = ToolConfig::load(Some(dir.path())).unwrap();
        assert!(config.config_path.is_none());
        assert_eq!(config.serve.port, 4173);

        // Paths are anchored at the root
        let expected = crate::utils::fs::normalize_path(&dir.path().join("config.json"));
        assert_eq!(config.site.content, expected);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[render.animation]\nthreshold = 2.0",
        )
        .unwrap();

        let result = ToolConfig::load(Some(dir.path()));
        assert!(result.is_err());
    }

    #[test]
    fn test_root_relative() {
        let mut config = ToolConfig::default();
        config.root = PathBuf::from("/site");
        assert_eq!(
            config.root_relative("/site/dist/index.html"),
            PathBuf::from("dist/index.html")
        );
        // Paths outside the root pass through untouched
        assert_eq!(
            config.root_relative("/elsewhere/file"),
            PathBuf::from("/elsewhere/file")
        );
    }
}
