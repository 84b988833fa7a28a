//! Project card grid.
//!
//! The static grid is cleared and rebuilt from the content document, one
//! card per project in document order. Cards do not exist when the fade
//! controller marks the template's regions, so each card registers itself
//! at build time.

use crate::content::Project;
use crate::dom::{Document, Element};
use crate::render::{RenderContext, Transform};

/// Rebuilds the project grid from the content document.
pub struct ProjectsTransform<'a> {
    ctx: &'a RenderContext<'a>,
}

impl<'a> ProjectsTransform<'a> {
    pub fn new(ctx: &'a RenderContext<'a>) -> Self {
        Self { ctx }
    }
}

impl Transform for ProjectsTransform<'_> {
    fn apply(&self, doc: &mut Document) {
        let Some(projects) = &self.ctx.content.projects else {
            return;
        };
        let Some(grid) = doc.find_by_class_mut("projects-grid") else {
            return;
        };

        grid.clear_children();
        for project in projects {
            let mut card = build_card(project);
            self.ctx.fade.mark(&mut card);
            grid.push_elem(card);
        }
    }
}

fn build_card(project: &Project) -> Element {
    let mut card = Element::new("div");
    card.set_attr(
        "class",
        if project.featured {
            "project-card featured"
        } else {
            "project-card"
        },
    );

    let mut header = Element::new("div");
    header.set_attr("class", "project-header");
    let mut title = Element::new("h3");
    title.push_text(&project.title);
    header.push_elem(title);
    if project.featured {
        let mut badge = Element::new("span");
        badge.set_attr("class", "project-badge");
        badge.push_text("Featured");
        header.push_elem(badge);
    }
    card.push_elem(header);

    let mut body = Element::new("div");
    body.set_attr("class", "project-content");

    let mut description = Element::new("p");
    description.push_text(&project.description);
    body.push_elem(description);

    let mut tech = Element::new("div");
    tech.set_attr("class", "project-tech");
    for name in &project.technologies {
        let mut tag = Element::new("span");
        tag.set_attr("class", "tech-tag");
        tag.push_text(name);
        tech.push_elem(tag);
    }
    body.push_elem(tech);

    body.push_elem(build_timeline(project));
    body.push_elem(build_links(project));

    card.push_elem(body);
    card
}

fn build_timeline(project: &Project) -> Element {
    let mut block = Element::new("div");
    block.set_attr("class", "project-timeline");

    let mut timeline = Element::new("strong");
    timeline.push_text("Timeline:");
    block.push_elem(timeline);
    block.push_text(&format!(" {}", project.timeline));
    block.push_elem(Element::new("br"));

    let mut approach = Element::new("strong");
    approach.push_text("Approach:");
    block.push_elem(approach);
    block.push_text(&format!(" {}", project.approach));
    block
}

/// Links row; sentinel values are omitted, never rendered as dead links.
fn build_links(project: &Project) -> Element {
    let mut links = Element::new("div");
    links.set_attr("class", "project-links");
    if let Some(url) = project.links.source_url() {
        links.push_elem(link_anchor(url, "View Source"));
    }
    if let Some(url) = project.links.demo_url() {
        links.push_elem(link_anchor(url, "Live Demo"));
    }
    links
}

fn link_anchor(url: &str, label: &str) -> Element {
    let mut anchor = Element::new("a");
    anchor.set_attr("href", url);
    anchor.set_attr("class", "project-link");
    anchor.set_attr("target", "_blank");
    anchor.push_text(label);
    anchor
}

// =============================================================================
// Tests
// =============================================================================
