//! Skill list population.
//!
//! Two fixed category containers: the first `.skill-category` carries the
//! core list, the last one the AI-augmented list. Each configured list
//! clears its container's `<ul>` and repopulates it in order.

use crate::dom::{Document, Element};
use crate::render::{RenderContext, Transform};

const AI_TOOLS_LABEL: &str = "AI-Augmented Tools";

/// Fills the core and AI-augmented skill categories.
pub struct SkillsTransform<'a> {
    ctx: &'a RenderContext<'a>,
}

impl<'a> SkillsTransform<'a> {
    pub fn new(ctx: &'a RenderContext<'a>) -> Self {
        Self { ctx }
    }
}

impl Transform for SkillsTransform<'_> {
    fn apply(&self, doc: &mut Document) {
        let Some(skills) = &self.ctx.content.skills else {
            return;
        };

        let category = |el: &Element| el.has_class("skill-category");
        let count = doc.count_elements(&category);
        if count == 0 {
            return;
        }

        if let Some(core) = &skills.core {
            if let Some(first) = doc.find_nth_element_mut(&category, 0) {
                fill_list(first, core);
            }
        }

        if let Some(ai) = &skills.ai_augmented {
            if let Some(last) = doc.find_nth_element_mut(&category, count - 1) {
                // Rename the heading only when the category has a list to fill
                if last.find_by_tag("ul").is_some() {
                    if let Some(heading) = last.find_by_tag_mut("h4") {
                        heading.set_text(AI_TOOLS_LABEL);
                    }
                    fill_list(last, ai);
                }
            }
        }
    }
}

/// Replace the category's `<ul>` items with one `<li>` per entry.
fn fill_list(category: &mut Element, entries: &[String]) {
    let Some(list) = category.find_by_tag_mut("ul") else {
        return;
    };
    list.clear_children();
    for entry in entries {
        let mut item = Element::new("li");
        item.push_text(entry);
        list.push_elem(item);
    }
}

// =============================================================================
// Tests
// =============================================================================
