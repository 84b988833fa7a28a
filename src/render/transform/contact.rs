//! Contact details and footer line.

use crate::dom::{Document, Element};
use crate::render::{RenderContext, Transform};

/// Fills the mailto link, intro paragraph, and contact-method links.
pub struct ContactTransform<'a> {
    ctx: &'a RenderContext<'a>,
}

impl<'a> ContactTransform<'a> {
    pub fn new(ctx: &'a RenderContext<'a>) -> Self {
        Self { ctx }
    }
}

impl Transform for ContactTransform<'_> {
    fn apply(&self, doc: &mut Document) {
        if let Some(email) = &self.ctx.email {
            let mailto = |el: &Element| el.tag == "a" && el.attr_contains("href", "mailto:");
            if let Some(link) = doc.find_element_mut(&mailto) {
                link.set_attr("href", &format!("mailto:{email}"));
                link.set_text(email);
            }
        }

        if let Some(contact) = &self.ctx.content.contact {
            if !contact.intro.is_empty() {
                if let Some(intro) = doc.find_by_class_mut("contact-intro") {
                    intro.set_text(&contact.intro);
                }
            }
        }

        if let Some(personal) = &self.ctx.content.personal {
            if let Some(location) = configured(&personal.location) {
                if let Some(el) = doc.find_by_class_mut("contact-location") {
                    el.set_text(location);
                }
            }
            set_link(doc, "resume-download", &personal.resume_file);
            set_link(doc, "linkedin-contact", &personal.linkedin);
            set_link(doc, "github-contact", &personal.github);
            set_link(doc, "blog-contact", &personal.blog);
            set_link(doc, "x-contact", &personal.x);
        }
    }
}

/// Writes the fixed copyright line into the footer paragraph.
pub struct FooterTransform<'a> {
    ctx: &'a RenderContext<'a>,
}

impl<'a> FooterTransform<'a> {
    pub fn new(ctx: &'a RenderContext<'a>) -> Self {
        Self { ctx }
    }
}

impl Transform for FooterTransform<'_> {
    fn apply(&self, doc: &mut Document) {
        let Some(personal) = &self.ctx.content.personal else {
            return;
        };
        if personal.name.is_empty() || personal.title.is_empty() {
            return;
        }
        let Some(footer) = doc.find_by_class_mut("footer") else {
            return;
        };
        if let Some(paragraph) = footer.find_by_tag_mut("p") {
            paragraph.set_text(&format!(
                "© 2025 {} - {}. Built with AI-enhanced development.",
                personal.name, personal.title
            ));
        }
    }
}

fn configured(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn set_link(doc: &mut Document, class: &str, href: &Option<String>) {
    let Some(href) = configured(href) else {
        return;
    };
    if let Some(link) = doc.find_by_class_mut(class) {
        link.set_attr("href", href);
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
        "<section id=\"contact\">",
        "<p class=\"contact-intro\">Static intro</p>",
        "<div class=\"contact-item\">",
        "<a href=\"mailto:old@site.io\">old@site.io</a>",
        "</div>",
        "<div class=\"contact-item\"><p class=\"contact-location\">Nowhere</p></div>",
        "<div class=\"contact-item\">",
        "<a class=\"resume-download\" href=\"#\">Resume</a>",
        "<a class=\"linkedin-contact\" href=\"#\">LinkedIn</a>",
        "<a class=\"x-contact\" href=\"#\">X</a>",
        "</div>",
        "</section>",
        "<footer class=\"footer\"><p>old footer</p></footer>",
    );

    fn apply(value: serde_json::Value) -> String {
        let content: SiteContent = serde_json::from_value(value).unwrap();
        let fade = FadeController::create(false);
        let ctx = RenderContext::new(&content, &fade, None);
        let mut doc = parse_document(TEMPLATE).unwrap();
        ContactTransform::new(&ctx).apply(&mut doc);
        FooterTransform::new(&ctx).apply(&mut doc);
        doc.to_html()
    }

    #[test]
    fn test_mailto_href_and_text() {
        let html = apply(json!({ "personal": {
            "name": "Jo", "title": "Dev",
            "email": { "address": "jo@site.io", "obfuscated": false },
        }}));
        assert!(html.contains("href=\"mailto:jo@site.io\""));
        assert!(html.contains(">jo@site.io</a>"));
        assert!(!html.contains("old@site.io"));
    }

    #[test]
    fn test_intro_location_and_links() {
        let html = apply(json!({
            "personal": {
                "name": "Jo", "title": "Dev",
                "location": "Lisbon",
                "resumeFile": "assets/cv.pdf",
                "linkedin": "https://linkedin.com/in/jo",
            },
            "contact": { "intro": "Say hi" },
        }));
        assert!(html.contains(">Say hi</p>"));
        assert!(html.contains(">Lisbon</p>"));
        assert!(html.contains("class=\"resume-download\" href=\"assets/cv.pdf\""));
        assert!(html.contains("class=\"linkedin-contact\" href=\"https://linkedin.com/in/jo\""));
        // Unconfigured links keep their template href
        assert!(html.contains("class=\"x-contact\" href=\"#\""));
    }

    #[test]
    fn test_footer_line() {
        let html = apply(json!({ "personal": { "name": "Jo Doe", "title": "Engineer" }}));
        assert!(html.contains(
            "© 2025 Jo Doe - Engineer. Built with AI-enhanced development."
        ));
    }

    #[test]
    fn test_footer_needs_both_fields() {
        let html = apply(json!({ "personal": { "name": "Jo Doe" }}));
        assert!(html.contains("old footer"));
    }

    #[test]
    fn test_undecodable_email_uses_placeholder() {
        // Obfuscated address that is not Base64 at all
        let html = apply(json!({ "personal": {
            "email": { "address": "!!not-base64!!", "obfuscated": true },
        }}));
        assert!(html.contains("mailto:contact@domain.com"));
    }

    #[test]
    fn test_absent_content_is_no_op() {
        let html = apply(json!({}));
        assert!(html.contains("Static intro"));
        assert!(html.contains("old@site.io"));
        assert!(html.contains("old footer"));
    }
}
