//! Page rendering pipeline.
//!
//! Turns the host template plus an optional content document into the final
//! page. The flow per render:
//!
//! ```text
//! template ──parse──► Document
//!                        │  content loaded?
//!                        ▼
//!              Pipeline of section transforms
//!   (head → nav → hero → about → skills → projects →
//!    contact → footer → theme), each independently guarded
//!                        │
//!                        ▼
//!        fade marking of static regions + asset injection
//!                        │
//!                        ▼
//!                   serialized HTML
//! ```
//!
//! Content-load failure is not an error: the template's static fallback
//! markup is emitted untouched, with assets still injected. Only an
//! unparsable template fails the render.

pub mod fade;
pub mod transform;

mod assets;

use crate::config::{AnimationConfig, ToolConfig};
use crate::content::{GradientSet, SiteContent, decode_email};
use crate::debug;
use crate::dom::{Document, ParseError, parse_document};
use crate::theme::{effective_gradients, resolve_theme};

pub use assets::inject_assets;
pub use fade::FadeController;
pub use transform::{
    AboutTransform, ContactTransform, FooterTransform, HeadTransform, HeroTransform, NavTransform,
    ProjectsTransform, SkillsTransform, ThemeTransform,
};

// =============================================================================
// Pipeline
// =============================================================================

/// One pipeline stage mutating one page region.
pub trait Transform {
    fn apply(&self, doc: &mut Document);
}

/// Applies transforms in sequence over an owned document.
pub struct Pipeline {
    doc: Document,
}

impl Pipeline {
    pub fn new(doc: Document) -> Self {
        Self { doc }
    }

    pub fn pipe(mut self, transform: impl Transform) -> Self {
        transform.apply(&mut self.doc);
        self
    }

    pub fn into_inner(self) -> Document {
        self.doc
    }
}

// =============================================================================
// Options & context
// =============================================================================

/// Per-render options: tool config knobs plus request context.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Requested theme override (`--theme` flag or `?theme=` parameter).
    pub theme_candidate: Option<String>,
    pub animation: AnimationConfig,
    pub scroll_debounce_ms: u64,
    /// Inject the reload polling script (preview server only).
    pub live_reload: bool,
}

impl RenderOptions {
    pub fn from_config(config: &ToolConfig) -> Self {
        Self {
            theme_candidate: None,
            animation: config.render.animation.clone(),
            scroll_debounce_ms: config.render.scroll_debounce_ms,
            live_reload: false,
        }
    }

    pub fn with_theme(mut self, candidate: Option<String>) -> Self {
        self.theme_candidate = candidate;
        self
    }

    pub fn with_live_reload(mut self, live_reload: bool) -> Self {
        self.live_reload = live_reload;
        self
    }
}

/// Everything the section transforms read: the content document plus the
/// values derived from it once per render.
pub struct RenderContext<'a> {
    pub content: &'a SiteContent,
    /// Decoded contact email; absent when the document configures none or
    /// decoding yields an unusable empty string.
    pub email: Option<String>,
    /// Gradient set for the resolved theme; absent without a theme section.
    pub gradients: Option<GradientSet>,
    pub fade: &'a FadeController,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        content: &'a SiteContent,
        fade: &'a FadeController,
        theme_candidate: Option<&str>,
    ) -> Self {
        let email = content
            .personal
            .as_ref()
            .and_then(|p| p.email.as_ref())
            .map(decode_email)
            .filter(|decoded| !decoded.is_empty());

        let gradients = content.theme.as_ref().map(|theme| {
            let active = resolve_theme(theme_candidate, theme);
            effective_gradients(theme, &active)
        });

        Self {
            content,
            email,
            gradients,
            fade,
        }
    }
}

// =============================================================================
// Entry point
// =============================================================================

/// Render one page from the template and an optional content document.
pub fn render_page(
    template: &str,
    content: Option<&SiteContent>,
    options: &RenderOptions,
) -> Result<String, ParseError> {
    let mut doc = parse_document(template)?;
    let fade = FadeController::create(options.animation.enable);

    if let Some(content) = content {
        let ctx = RenderContext::new(content, &fade, options.theme_candidate.as_deref());
        doc = Pipeline::new(doc)
            .pipe(HeadTransform::new(&ctx))
            .pipe(NavTransform::new(&ctx))
            .pipe(HeroTransform::new(&ctx))
            .pipe(AboutTransform::new(&ctx))
            .pipe(SkillsTransform::new(&ctx))
            .pipe(ProjectsTransform::new(&ctx))
            .pipe(ContactTransform::new(&ctx))
            .pipe(FooterTransform::new(&ctx))
            .pipe(ThemeTransform::new(&ctx))
            .into_inner();
    }

    fade.mark_static_regions(&mut doc);
    inject_assets(&mut doc, options);

    if fade.is_enabled() {
        debug!("render"; "{} elements marked for fade-in", fade.marked());
    }

    Ok(doc.to_html())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEMPLATE: &str = concat!(
        "<!DOCTYPE html>",
        "<html><head><title>Old</title></head><body>",
        "<nav><a class=\"logo\" href=\"#hero\">Old Name</a></nav>",
        "<section id=\"hero\"><h1 class=\"hero-title\">Static hero</h1>",
        "<p class=\"hero-subtitle\">Static sub</p></section>",
        "<section id=\"about\"><p data-about=\"philosophy\">Static phil</p></section>",
        "<section id=\"skills\">",
        "<div class=\"skill-category\"><h4>Core</h4><ul><li>old</li></ul></div>",
        "<div class=\"skill-category\"><h4>Tools</h4><ul><li>old</li></ul></div>",
        "</section>",
        "<section id=\"projects\"><div class=\"projects-grid\">",
        "<div class=\"project-card\">Static card</div></div></section>",
        "<section id=\"contact\">",
        "<div class=\"contact-item\"><a href=\"mailto:old@x.y\">old@x.y</a></div>",
        "</section>",
        "<footer class=\"footer\"><p>old</p></footer>",
        "</body></html>",
    );

    fn full_content() -> SiteContent {
        serde_json::from_value(json!({
            "personal": {
                "name": "Jo Doe",
                "title": "Engineer",
                "email": { "address": "jo@site.io", "obfuscated": false },
            },
            "pages": {
                "home": { "heroTitle": "Hello\\nWorld", "heroSubtitle": "Hi" },
                "about": { "philosophy": "Think first" },
            },
            "skills": { "core": ["Rust"], "aiAugmented": ["Pairing"] },
            "projects": [{
                "title": "X",
                "featured": true,
                "technologies": ["A", "B"],
                "links": { "source": "#", "demo": "http://y" },
            }],
            "theme": {
                "activeTheme": "default",
                "gradients": {
                    "hero": { "direction": "135deg", "colors": ["#111", "#222"] },
                },
                "presets": { "ocean": { "hero": ["#001", "#002"] } },
            },
        }))
        .unwrap()
    }

    fn options() -> RenderOptions {
        RenderOptions {
            theme_candidate: None,
            animation: AnimationConfig::default(),
            scroll_debounce_ms: 10,
            live_reload: false,
        }
    }

    #[test]
    fn test_full_render() {
        let content = full_content();
        let html = render_page(TEMPLATE, Some(&content), &options()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Jo Doe - Engineer</title>"));
        assert!(html.contains(">Jo Doe</a>"));
        assert!(html.contains("Hello<br>World"));
        assert!(html.contains(">Think first</p>"));
        assert!(html.contains("<li>Rust</li>"));
        assert!(html.contains("<h4>AI-Augmented Tools</h4>"));
        assert!(html.contains("class=\"project-card featured\""));
        assert!(html.contains(">Live Demo</a>"));
        assert!(!html.contains("View Source"));
        assert!(!html.contains("Static card"));
        assert!(html.contains("mailto:jo@site.io"));
        assert!(html.contains("© 2025 Jo Doe - Engineer."));
        assert!(html.contains("linear-gradient(135deg, #111 0%, #222 100%)"));
        assert!(html.contains("/.folio/site-"));
    }

    #[test]
    fn test_no_content_only_adds_assets() {
        // With animations off, the only changes are the injected assets.
        let mut opts = options();
        opts.animation.enable = false;

        let rendered = render_page(TEMPLATE, None, &opts).unwrap();

        let mut expected = parse_document(TEMPLATE).unwrap();
        inject_assets(&mut expected, &opts);
        assert_eq!(rendered, expected.to_html());
        assert!(rendered.contains("Static hero"));
        assert!(rendered.contains("Static card"));
        assert!(!rendered.contains("data-fade"));
    }

    #[test]
    fn test_static_regions_fade_without_content() {
        let html = render_page(TEMPLATE, None, &options()).unwrap();
        assert!(html.contains("class=\"skill-category\" data-fade"));
        assert!(html.contains("class=\"contact-item\" data-fade"));
    }

    #[test]
    fn test_theme_candidate_overrides() {
        let content = full_content();
        let opts = options().with_theme(Some("ocean".into()));
        let html = render_page(TEMPLATE, Some(&content), &opts).unwrap();
        assert!(html.contains("linear-gradient(135deg, #001 0%, #002 100%)"));
    }

    #[test]
    fn test_invalid_theme_candidate_falls_back() {
        let content = full_content();
        let opts = options().with_theme(Some("no such theme!".into()));
        let html = render_page(TEMPLATE, Some(&content), &opts).unwrap();
        assert!(html.contains("linear-gradient(135deg, #111 0%, #222 100%)"));
    }

    #[test]
    fn test_disabled_animation_marks_nothing() {
        let mut opts = options();
        opts.animation.enable = false;
        let content = full_content();
        let html = render_page(TEMPLATE, Some(&content), &opts).unwrap();
        assert!(!html.contains("data-fade"));
    }

    #[test]
    fn test_project_cards_marked_for_fade() {
        let content = full_content();
        let html = render_page(TEMPLATE, Some(&content), &options()).unwrap();
        assert!(html.contains("class=\"project-card featured\" data-fade"));
    }
}
