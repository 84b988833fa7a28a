//! Fade-in animation controller.
//!
//! Elements are marked server-side with a bare `data-fade` attribute; the
//! emitted behavior script hides marked elements and reveals them once they
//! scroll into view. Content never depends on the script: without it the
//! attribute is inert and everything is simply visible.
//!
//! One controller is created per render and handed to the transforms.
//! Elements built from content (project cards) are marked as they are
//! created; the template's own animated regions are marked in a single
//! pass after the section transforms ran.

use std::cell::Cell;

use crate::dom::{Document, Element};

/// Attribute the behavior script uses to find animated elements.
pub const FADE_ATTR: &str = "data-fade";

/// Template classes that animate without being rebuilt from content.
const STATIC_REGIONS: [&str; 2] = ["skill-category", "contact-item"];

/// Marks elements for the fade-in transition.
///
/// Inert when animations are disabled in the tool config: `mark` becomes a
/// no-op and the output carries no fade attributes. The transition is
/// one-directional per element, so marking is permanent.
pub struct FadeController {
    enabled: bool,
    marked: Cell<usize>,
}

impl FadeController {
    pub fn create(enabled: bool) -> Self {
        Self {
            enabled,
            marked: Cell::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of elements marked so far.
    pub fn marked(&self) -> usize {
        self.marked.get()
    }

    /// Mark one element for fade-in.
    pub fn mark(&self, element: &mut Element) {
        if !self.enabled || element.attrs.has(FADE_ATTR) {
            return;
        }
        element.attrs.set_flag(FADE_ATTR);
        self.marked.set(self.marked.get() + 1);
    }

    /// Mark the template's animated regions (skill categories and contact
    /// items). Cards rebuilt by the projects transform are marked at build
    /// time instead, since they do not exist at this point.
    pub fn mark_static_regions(&self, doc: &mut Document) {
        if !self.enabled {
            return;
        }
        let mut count = 0;
        doc.visit_elements_mut(&mut |el| {
            if STATIC_REGIONS.iter().any(|class| el.has_class(class)) && !el.attrs.has(FADE_ATTR) {
                el.attrs.set_flag(FADE_ATTR);
                count += 1;
            }
        });
        self.marked.set(self.marked.get() + count);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;

    #[test]
    fn test_mark_sets_attribute_once() {
        let fade = FadeController::create(true);
        let mut el = Element::new("div");

        fade.mark(&mut el);
        fade.mark(&mut el);

        assert!(el.attrs.has(FADE_ATTR));
        assert_eq!(fade.marked(), 1);
    }

    #[test]
    fn test_disabled_controller_is_inert() {
        let fade = FadeController::create(false);
        let mut el = Element::new("div");

        fade.mark(&mut el);

        assert!(!el.attrs.has(FADE_ATTR));
        assert_eq!(fade.marked(), 0);
    }

    #[test]
    fn test_static_regions_marked() {
        let mut doc = parse_document(concat!(
            "<div class=\"skill-category\"></div>",
            "<div class=\"contact-item\"></div>",
            "<div class=\"plain\"></div>",
        ))
        .unwrap();
        let fade = FadeController::create(true);

        fade.mark_static_regions(&mut doc);

        assert_eq!(fade.marked(), 2);
        let html = doc.to_html();
        assert_eq!(html.matches(FADE_ATTR).count(), 2);
        assert!(!html.contains("plain\" data-fade"));
    }

    #[test]
    fn test_static_regions_skip_already_marked() {
        let mut doc = parse_document("<div class=\"contact-item\" data-fade></div>").unwrap();
        let fade = FadeController::create(true);

        fade.mark_static_regions(&mut doc);

        assert_eq!(fade.marked(), 0);
        assert_eq!(doc.to_html().matches(FADE_ATTR).count(), 1);
    }
}
