//! `[site]` section configuration.
//!
//! Points the renderer at the two source files every build starts from.
//!
//! # Example
//!
//! ```toml
//! [site]
//! content = "config.json"     # Site content (relative to site root)
//! template = "index.html"     # HTML template (relative to site root)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Content file with personal info, projects, skills and theme.
    pub content: PathBuf,

    /// HTML template the content is rendered into.
    pub template: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content: "config.json".into(),
            template: "index.html".into(),
        }
    }
}
