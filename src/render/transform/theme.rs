//! Section background gradients.
//!
//! Applies the resolved gradient set as inline background styles on the
//! four themed section containers, located by id.

use crate::content::THEMED_SECTIONS;
use crate::dom::Document;
use crate::render::{RenderContext, Transform};
use crate::theme::gradient_css;

pub struct ThemeTransform<'a> {
    ctx: &'a RenderContext<'a>,
}

impl<'a> ThemeTransform<'a> {
    pub fn new(ctx: &'a RenderContext<'a>) -> Self {
        Self { ctx }
    }
}

impl Transform for ThemeTransform<'_> {
    fn apply(&self, doc: &mut Document) {
        let Some(gradients) = &self.ctx.gradients else {
            return;
        };
        for section in THEMED_SECTIONS {
            let Some(css) = gradients.get(section).and_then(gradient_css) else {
                continue;
            };
            if let Some(el) = doc.find_by_id_mut(section) {
                el.set_attr("style", &format!("background: {css}"));
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SiteContent;
    use crate::dom::parse_document;
    use crate::render::{FadeController, RenderContext};
    use serde_json::json;

    const TEMPLATE: &str = concat!(
        "<section id=\"hero\"></section>",
        "<section id=\"about\"></section>",
        "<section id=\"projects\"></section>",
        "<section id=\"contact\"></section>",
    );

    fn apply(value: serde_json::Value, candidate: Option<&str>) -> String {
        let content: SiteContent = serde_json::from_value(value).unwrap();
        let fade = FadeController::create(false);
        let ctx = RenderContext::new(&content, &fade, candidate);
        let mut doc = parse_document(TEMPLATE).unwrap();
        ThemeTransform::new(&ctx).apply(&mut doc);
        doc.to_html()
    }

    fn theme_json() -> serde_json::Value {
        json!({ "theme": {
            "activeTheme": "default",
            "gradients": {
                "hero": { "direction": "135deg", "colors": ["#111", "#222"] },
                "about": { "direction": "to right", "colors": ["#fff"] },
            },
            "presets": {
                "ocean": { "hero": ["#001", "#002"] },
            },
        }})
    }

    #[test]
    fn test_default_gradients_applied_by_id() {
        let html = apply(theme_json(), None);
        assert!(html.contains(
            "id=\"hero\" style=\"background: linear-gradient(135deg, #111 0%, #222 100%)\""
        ));
        assert!(html.contains(
            "id=\"about\" style=\"background: linear-gradient(to right, #fff 100%)\""
        ));
        // Sections without a configured gradient stay untouched
        assert!(html.contains("<section id=\"projects\"></section>"));
    }

    #[test]
    fn test_preset_candidate_overrides_colors() {
        let html = apply(theme_json(), Some("ocean"));
        assert!(html.contains("linear-gradient(135deg, #001 0%, #002 100%)"));
        // Sections the preset omits keep the default gradient
        assert!(html.contains("linear-gradient(to right, #fff 100%)"));
    }

    #[test]
    fn test_invalid_candidate_falls_back() {
        let html = apply(theme_json(), Some("../../etc"));
        assert!(html.contains("linear-gradient(135deg, #111 0%, #222 100%)"));
    }

    #[test]
    fn test_no_theme_section_is_no_op() {
        let html = apply(json!({}), Some("ocean"));
        assert!(!html.contains("style="));
    }
}
