//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - typed text templates with variable injection
//! - `asset` - embedded assets with fingerprinted filenames
//! - `page` - the generated stylesheet and behavior script every page links
//! - `serve` - preview-only resources (reload script, loading page)
//! - `init` - starter files written by `folio init`
//!
//! # Usage
//!
//! ```ignore
//! use embed::page::{PageJsVars, SITE_JS};
//!
//! let vars = PageJsVars::from_options(&options);
//! let url = SITE_JS.url_path(&vars);      // "/.folio/site-<hash>.js"
//! SITE_JS.write(&output_dir, &vars)?;     // dist/.folio/site-<hash>.js
//! ```

use std::path::Path;

use anyhow::Result;

use crate::render::RenderOptions;

mod asset;
mod template;

pub use asset::{ASSET_DIR, AssetKind, EmbeddedAsset};
pub use template::{NoVars, Template, TemplateVars};

// =============================================================================
// Page assets
// =============================================================================

pub mod page {
    use super::{AssetKind, EmbeddedAsset, NoVars, TemplateVars};
    use crate::render::RenderOptions;

    /// Knobs baked into the behavior script.
    pub struct PageJsVars {
        pub fade_enabled: bool,
        pub fade_threshold: f64,
        pub fade_margin: String,
        pub scroll_debounce_ms: u64,
    }

    impl PageJsVars {
        pub fn from_options(options: &RenderOptions) -> Self {
            Self {
                fade_enabled: options.animation.enable,
                fade_threshold: options.animation.threshold,
                fade_margin: options.animation.margin.clone(),
                scroll_debounce_ms: options.scroll_debounce_ms,
            }
        }
    }

    impl TemplateVars for PageJsVars {
        fn apply(&self, content: &str) -> String {
            content
                .replace(
                    "__FADE_ENABLED__",
                    if self.fade_enabled { "true" } else { "false" },
                )
                .replace("__FADE_THRESHOLD__", &self.fade_threshold.to_string())
                .replace("__FADE_MARGIN__", &self.fade_margin)
                .replace("__SCROLL_DEBOUNCE_MS__", &self.scroll_debounce_ms.to_string())
        }

        fn hash_input(&self) -> String {
            format!(
                "{}|{}|{}|{}",
                self.fade_enabled, self.fade_threshold, self.fade_margin, self.scroll_debounce_ms
            )
        }
    }

    /// Stylesheet for fade transitions, nav active state, responsive nav.
    pub const SITE_CSS: EmbeddedAsset<NoVars> =
        EmbeddedAsset::new(AssetKind::Css, "site", include_str!("page/site.css"));

    /// Behavior script: fade-in observer, debounced scroll spy, smooth
    /// scroll, mobile nav toggle.
    pub const SITE_JS: EmbeddedAsset<PageJsVars> =
        EmbeddedAsset::new(AssetKind::JavaScript, "site", include_str!("page/site.js"));
}

// =============================================================================
// Preview server resources
// =============================================================================

pub mod serve {
    use super::{AssetKind, EmbeddedAsset, NoVars, Template};

    /// URL the reload script polls; answers with the generation counter.
    pub const GENERATION_ENDPOINT: &str = "/.folio/generation";

    /// Polling reload script injected while serving.
    pub const RELOAD_JS: EmbeddedAsset<NoVars> = EmbeddedAsset::new(
        AssetKind::JavaScript,
        "reload",
        include_str!("serve/reload.js"),
    );

    /// Placeholder page served until the first render completes.
    pub const LOADING_HTML: Template<NoVars> = Template::new(include_str!("serve/loading.html"));
}

// =============================================================================
// Scaffolding templates
// =============================================================================

pub mod init {
    use super::{Template, TemplateVars};

    /// Variables for the `folio init` starter files.
    pub struct StarterVars<'a> {
        pub name: &'a str,
    }

    impl TemplateVars for StarterVars<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__SITE_NAME__", self.name)
        }
    }

    pub const FOLIO_TOML: Template<StarterVars<'static>> =
        Template::new(include_str!("init/folio.toml"));
    pub const CONFIG_JSON: Template<StarterVars<'static>> =
        Template::new(include_str!("init/config.json"));
    pub const INDEX_HTML: Template<StarterVars<'static>> =
        Template::new(include_str!("init/index.html"));
}

// =============================================================================
// Build output
// =============================================================================

/// Write the generated page assets into the output directory, dropping
/// fingerprints left by earlier builds first.
pub fn write_embedded_assets(options: &RenderOptions, output_dir: &Path) -> Result<()> {
    let js_vars = page::PageJsVars::from_options(options);
    page::SITE_CSS.cleanup_old(output_dir)?;
    page::SITE_JS.cleanup_old(output_dir)?;
    page::SITE_CSS.write(output_dir, &NoVars)?;
    page::SITE_JS.write(output_dir, &js_vars)?;
    Ok(())
}

/// In-memory routes for generated assets while serving: `(url, body)`.
pub fn embedded_routes(options: &RenderOptions) -> Vec<(String, String)> {
    let js_vars = page::PageJsVars::from_options(options);
    vec![
        (
            page::SITE_CSS.url_path(&NoVars),
            page::SITE_CSS.render(&NoVars),
        ),
        (page::SITE_JS.url_path(&js_vars), page::SITE_JS.render(&js_vars)),
        (
            serve::RELOAD_JS.url_path(&NoVars),
            serve::RELOAD_JS.render(&NoVars),
        ),
    ]
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimationConfig;

    fn options() -> RenderOptions {
        RenderOptions {
            theme_candidate: None,
            animation: AnimationConfig::default(),
            scroll_debounce_ms: 10,
            live_reload: false,
        }
    }

    #[test]
    fn test_page_js_substitution() {
        let vars = page::PageJsVars::from_options(&options());
        let js = page::SITE_JS.render(&vars);

        assert!(js.contains("var FADE_ENABLED = true;"));
        assert!(js.contains("var FADE_THRESHOLD = 0.1;"));
        assert!(js.contains("var FADE_MARGIN = '0px 0px -50px 0px';"));
        assert!(js.contains("var SCROLL_DEBOUNCE_MS = 10;"));
        assert!(!js.contains("__FADE_"));
    }

    #[test]
    fn test_js_url_changes_with_knobs() {
        let a = page::SITE_JS.url_path(&page::PageJsVars::from_options(&options()));

        let mut changed = options();
        changed.scroll_debounce_ms = 50;
        let b = page::SITE_JS.url_path(&page::PageJsVars::from_options(&changed));

        assert_ne!(a, b);
    }

    #[test]
    fn test_write_embedded_assets() {
        let dir = tempfile::tempdir().unwrap();
        write_embedded_assets(&options(), dir.path()).unwrap();

        let folio = dir.path().join(ASSET_DIR);
        let names: Vec<String> = std::fs::read_dir(&folio)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.iter().any(|n| n.starts_with("site-") && n.ends_with(".css")));
        assert!(names.iter().any(|n| n.starts_with("site-") && n.ends_with(".js")));
    }

    #[test]
    fn test_embedded_routes_cover_page_and_reload() {
        let routes = embedded_routes(&options());
        assert_eq!(routes.len(), 3);
        assert!(routes.iter().all(|(url, _)| url.starts_with("/.folio/")));
        assert!(routes.iter().any(|(url, _)| url.contains("reload-")));
    }

    #[test]
    fn test_starter_files_substitute_name() {
        let vars = init::StarterVars { name: "Jo Doe" };
        let html = init::INDEX_HTML.render(&vars);
        let json = init::CONFIG_JSON.render(&vars);

        assert!(html.contains("<title>Jo Doe - Software Developer</title>"));
        assert!(!html.contains("__SITE_NAME__"));
        assert!(json.contains("\"name\": \"Jo Doe\""));

        // The starter content document parses against the content model
        let parsed: crate::content::SiteContent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.personal.unwrap().name, "Jo Doe");
    }

    #[test]
    fn test_starter_template_carries_pipeline_selectors() {
        let html = init::INDEX_HTML.render(&init::StarterVars { name: "X" });
        for needle in [
            "class=\"logo\"",
            "class=\"hero-title\"",
            "data-about=\"philosophy\"",
            "data-about=\"objectives\"",
            "class=\"skill-category\"",
            "class=\"projects-grid\"",
            "mailto:",
            "class=\"footer\"",
            "id=\"hero\"",
            "id=\"about\"",
            "id=\"projects\"",
            "id=\"contact\"",
        ] {
            assert!(html.contains(needle), "starter template missing {needle}");
        }
    }
}
