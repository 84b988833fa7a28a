//! Hero headline and subtitle.

use crate::dom::{Document, Element};
use crate::render::{RenderContext, Transform};

/// Fills the hero title and subtitle from the home page content.
///
/// The title may carry the literal two-character marker `\n`, which turns
/// into a `<br>` between text nodes. The fragments themselves stay text.
pub struct HeroTransform<'a> {
    ctx: &'a RenderContext<'a>,
}

impl<'a> HeroTransform<'a> {
    pub fn new(ctx: &'a RenderContext<'a>) -> Self {
        Self { ctx }
    }
}

impl Transform for HeroTransform<'_> {
    fn apply(&self, doc: &mut Document) {
        let Some(home) = &self.ctx.content.pages.home else {
            return;
        };

        if !home.hero_title.is_empty() {
            if let Some(title) = doc.find_by_class_mut("hero-title") {
                set_multiline(title, &home.hero_title);
            }
        }
        if !home.hero_subtitle.is_empty() {
            if let Some(subtitle) = doc.find_by_class_mut("hero-subtitle") {
                subtitle.set_text(&home.hero_subtitle);
            }
        }
    }
}

fn set_multiline(target: &mut Element, text: &str) {
    target.clear_children();
    for (index, line) in text.split("\\n").enumerate() {
        if index > 0 {
            target.push_elem(Element::new("br"));
        }
        target.push_text(line);
    }
}

// =============================================================================
// Tests
// =============================================================================
