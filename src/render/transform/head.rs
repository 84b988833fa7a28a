//! Document head and navigation logo.
//!
//! Fills `<title>`, the author/description metas, and the favicon from the
//! content document, and writes the site owner's name into the nav logo.

use crate::dom::{Document, Element, Node};
use crate::render::{RenderContext, Transform};

/// Sets the document title and head metadata.
pub struct HeadTransform<'a> {
    ctx: &'a RenderContext<'a>,
}

impl<'a> HeadTransform<'a> {
    pub fn new(ctx: &'a RenderContext<'a>) -> Self {
        Self { ctx }
    }
}

impl Transform for HeadTransform<'_> {
    fn apply(&self, doc: &mut Document) {
        let content = self.ctx.content;

        if let Some(personal) = &content.personal {
            if !personal.name.is_empty() && !personal.title.is_empty() {
                if let Some(title) = doc.find_by_tag_mut("title") {
                    title.set_text(&format!("{} - {}", personal.name, personal.title));
                }
            }
        }

        if let Some(seo) = &content.seo {
            if !seo.author.is_empty() {
                set_meta_content(doc, "author", &seo.author);
            }
            if !seo.description.is_empty() {
                set_meta_content(doc, "description", &seo.description);
            }
            if !seo.favicon.is_empty() {
                set_favicon(doc, &seo.favicon);
            }
        }
    }
}

/// Writes the site owner's name into the navigation logo.
pub struct NavTransform<'a> {
    ctx: &'a RenderContext<'a>,
}

impl<'a> NavTransform<'a> {
    pub fn new(ctx: &'a RenderContext<'a>) -> Self {
        Self { ctx }
    }
}

impl Transform for NavTransform<'_> {
    fn apply(&self, doc: &mut Document) {
        let Some(personal) = &self.ctx.content.personal else {
            return;
        };
        if personal.name.is_empty() {
            return;
        }
        if let Some(logo) = doc.find_by_class_mut("logo") {
            logo.set_text(&personal.name);
        }
    }
}

fn set_meta_content(doc: &mut Document, name: &str, value: &str) {
    let found =
        doc.find_element_mut(&|el: &Element| el.tag == "meta" && el.attr("name") == Some(name));
    if let Some(meta) = found {
        meta.set_attr("content", value);
    }
}

/// Drop any icon links the template carries, then append a fresh one.
fn set_favicon(doc: &mut Document, href: &str) {
    fn is_icon_link(node: &Node) -> bool {
        matches!(node, Node::Element(el) if el.tag == "link" && el.attr_contains("rel", "icon"))
    }

    doc.roots.retain(|node| !is_icon_link(node));
    doc.visit_elements_mut(&mut |el| {
        el.children.retain(|child| !is_icon_link(child));
    });

    if let Some(head) = doc.head_mut() {
        let mut link = Element::new("link");
        link.set_attr("rel", "icon");
        link.set_attr("href", href);
        head.push_elem(link);
    }
}

// =============================================================================
// Tests
// =============================================================================
