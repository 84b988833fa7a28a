//! In-memory render state shared by the request loop and the watcher.
//!
//! The preview never writes a disk build. The template and content are held
//! in memory, pages are rendered lazily per resolved theme and cached, and a
//! rebuild swaps everything and re-renders the variants that were in use.

use std::fs;

use anyhow::{Context, Result};
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::config::{ToolConfig, cfg};
use crate::content::{SiteContent, load_content};
use crate::embed;
use crate::render::{RenderOptions, render_page};
use crate::theme::{DEFAULT_THEME, resolve_theme};

pub struct SiteState {
    template: RwLock<String>,
    content: RwLock<Option<SiteContent>>,
    options: RwLock<RenderOptions>,
    /// Rendered page per resolved theme name. Keys are resolved before the
    /// lookup, so hostile `?theme=` values cannot grow the cache.
    pages: DashMap<String, String>,
    /// Generated asset bodies by URL.
    routes: RwLock<Vec<(String, String)>>,
}

impl SiteState {
    /// Read the site and render the default view.
    ///
    /// An unreadable or unparsable template fails the load; a broken content
    /// document does not (the fallback markup is served instead).
    pub fn load(config: &ToolConfig) -> Result<Self> {
        let template = fs::read_to_string(&config.site.template)
            .with_context(|| format!("reading template {}", config.site.template.display()))?;
        let content = load_content(&config.site.content);
        let options = RenderOptions::from_config(config).with_live_reload(config.serve.watch);

        let state = Self {
            template: RwLock::new(template),
            content: RwLock::new(content),
            options: RwLock::new(options.clone()),
            pages: DashMap::new(),
            routes: RwLock::new(embed::embedded_routes(&options)),
        };
        state.page(None)?;
        Ok(state)
    }

    /// Body for a generated asset URL, if any.
    pub fn embedded(&self, path: &str) -> Option<String> {
        self.routes
            .read()
            .iter()
            .find(|(url, _)| url == path)
            .map(|(_, body)| body.clone())
    }

    /// Rendered page for an optional theme candidate.
    pub fn page(&self, candidate: Option<&str>) -> Result<String> {
        let content = self.content.read();

        let key = match content.as_ref().and_then(|c| c.theme.as_ref()) {
            Some(theme) => resolve_theme(candidate, theme),
            None => DEFAULT_THEME.to_string(),
        };
        if let Some(cached) = self.pages.get(&key) {
            return Ok(cached.clone());
        }

        let options = self
            .options
            .read()
            .clone()
            .with_theme(candidate.map(str::to_string));
        let html = render_page(&self.template.read(), content.as_ref(), &options)
            .context("template no longer parses")?;
        self.pages.insert(key, html.clone());
        Ok(html)
    }

    /// Re-read content, template, and tool config knobs, then re-render
    /// every theme variant that was cached before the change.
    pub fn rebuild(&self) -> Result<()> {
        let config = cfg();
        let template = fs::read_to_string(&config.site.template)
            .with_context(|| format!("reading template {}", config.site.template.display()))?;
        let content = load_content(&config.site.content);
        let options = RenderOptions::from_config(&config).with_live_reload(config.serve.watch);

        *self.template.write() = template;
        *self.content.write() = content;
        *self.options.write() = options.clone();
        *self.routes.write() = embed::embedded_routes(&options);

        let themes: Vec<String> = self.pages.iter().map(|entry| entry.key().clone()).collect();
        self.pages.clear();
        if themes.is_empty() {
            self.page(None)?;
        }
        for theme in themes {
            let candidate = (theme != DEFAULT_THEME).then_some(theme);
            self.page(candidate.as_deref())?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
