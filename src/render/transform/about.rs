//! About section paragraphs.
//!
//! Each paragraph is located by its `data-about` key first. Templates that
//! predate the attribute fall back to the structural heuristic: a paragraph
//! immediately preceded by a heading whose trimmed text equals the known
//! label. Either way the first match wins and no match means no-op.

use crate::dom::{Document, Element};
use crate::render::{RenderContext, Transform};

/// Heading labels the structural fallback matches on.
pub const PHILOSOPHY_LABEL: &str = "AI Development Philosophy";
pub const OBJECTIVES_LABEL: &str = "Career Objectives";

/// Fills the philosophy and objectives paragraphs in the about region.
pub struct AboutTransform<'a> {
    ctx: &'a RenderContext<'a>,
}

impl<'a> AboutTransform<'a> {
    pub fn new(ctx: &'a RenderContext<'a>) -> Self {
        Self { ctx }
    }
}

impl Transform for AboutTransform<'_> {
    fn apply(&self, doc: &mut Document) {
        let Some(about) = &self.ctx.content.pages.about else {
            return;
        };
        let Some(section) = doc.find_by_id_mut("about") else {
            return;
        };

        if !about.philosophy.is_empty() {
            set_paragraph(section, "philosophy", PHILOSOPHY_LABEL, &about.philosophy);
        }
        if !about.objectives.is_empty() {
            set_paragraph(section, "objectives", OBJECTIVES_LABEL, &about.objectives);
        }
    }
}

fn set_paragraph(section: &mut Element, key: &str, label: &str, text: &str) {
    let keyed = |el: &Element| el.attr("data-about") == Some(key);
    let target = if section.find_element(&keyed).is_some() {
        section.find_element_mut(&keyed)
    } else {
        section.find_labeled_paragraph_mut("h3", label)
    };
    if let Some(paragraph) = target {
        paragraph.set_text(text);
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

    fn apply(value: serde_json::Value, template: &str) -> String {
        let content: SiteContent = serde_json::from_value(value).unwrap();
        let fade = FadeController::create(false);
        let ctx = RenderContext::new(&content, &fade, None);
        let mut doc = parse_document(template).unwrap();
        AboutTransform::new(&ctx).apply(&mut doc);
        doc.to_html()
    }

    const ABOUT_JSON: &str = r#"{
        "pages": { "about": {
            "philosophy": "New philosophy",
            "objectives": "New objectives"
        }}
    }"#;

    #[test]
    fn test_data_about_dispatch() {
        let html = apply(
            serde_json::from_str(ABOUT_JSON).unwrap(),
            concat!(
                "<section id=\"about\">",
                "<p data-about=\"philosophy\">old</p>",
                "<p data-about=\"objectives\">old</p>",
                "</section>",
            ),
        );
        assert!(html.contains(">New philosophy</p>"));
        assert!(html.contains(">New objectives</p>"));
    }

    #[test]
    fn test_heading_fallback() {
        let html = apply(
            serde_json::from_str(ABOUT_JSON).unwrap(),
            concat!(
                "<section id=\"about\">",
                "<h3>AI Development Philosophy</h3><p>old</p>",
                "<h3>Career Objectives</h3><p>old</p>",
                "</section>",
            ),
        );
        assert!(html.contains(">New philosophy</p>"));
        assert!(html.contains(">New objectives</p>"));
    }

    #[test]
    fn test_attribute_wins_over_heading() {
        let html = apply(
            serde_json::from_str(ABOUT_JSON).unwrap(),
            concat!(
                "<section id=\"about\">",
                "<h3>AI Development Philosophy</h3><p>heuristic target</p>",
                "<p data-about=\"philosophy\">keyed target</p>",
                "</section>",
            ),
        );
        assert!(html.contains(">heuristic target</p>"));
        assert!(html.contains(">New philosophy</p>"));
    }

    #[test]
    fn test_duplicate_headings_first_match_wins() {
        let html = apply(
            serde_json::from_str(ABOUT_JSON).unwrap(),
            concat!(
                "<section id=\"about\">",
                "<h3>Career Objectives</h3><p>first</p>",
                "<h3>Career Objectives</h3><p>second</p>",
                "</section>",
            ),
        );
        assert!(html.contains(">New objectives</p>"));
        assert!(html.contains(">second</p>"));
        assert!(!html.contains(">first</p>"));
    }

    #[test]
    fn test_no_label_match_is_no_op() {
        let html = apply(
            serde_json::from_str(ABOUT_JSON).unwrap(),
            "<section id=\"about\"><h3>Something Else</h3><p>untouched</p></section>",
        );
        assert!(html.contains(">untouched</p>"));
    }

    #[test]
    fn test_missing_section_is_no_op() {
        let html = apply(
            serde_json::from_str(ABOUT_JSON).unwrap(),
            "<div><p>no about region</p></div>",
        );
        assert!(html.contains(">no about region</p>"));
    }
}
