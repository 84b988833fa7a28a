//! Site validation.
//!
//! `folio check` is the strict counterpart of the tolerant renderer: every
//! degradation the pipeline would silently absorb (undecodable email,
//! unknown theme, broken link, dead selector) is surfaced as an error for
//! the author. Exits 1 when anything fails.

mod report;

pub use report::CheckReport;

use std::fs;

use anyhow::Result;
use url::Url;

use crate::config::ToolConfig;
use crate::content::{NO_LINK, PLACEHOLDER_EMAIL, SiteContent, THEMED_SECTIONS, decode_email};
use crate::dom::{Document, parse_document};
use crate::log;
use crate::render::transform::{OBJECTIVES_LABEL, PHILOSOPHY_LABEL};
use crate::theme::{DEFAULT_THEME, is_valid_name};

pub fn check_site(config: &ToolConfig) -> Result<()> {
    let mut report = CheckReport::default();

    check_content(config, &mut report);
    check_template(config, &mut report);

    report.print();
    log!("check"; "{report}");

    if report.error_count() > 0 {
        std::process::exit(1);
    }
    Ok(())
}

// =============================================================================
// Content document
// =============================================================================

fn check_content(config: &ToolConfig, report: &mut CheckReport) {
    let source = config
        .root_relative(&config.site.content)
        .display()
        .to_string();

    let raw = match fs::read_to_string(&config.site.content) {
        Ok(raw) => raw,
        Err(err) => {
            report.add_content(source, "document", format!("not readable: {err}"));
            return;
        }
    };
    let content: SiteContent = match serde_json::from_str(&raw) {
        Ok(content) => content,
        Err(err) => {
            report.add_content(source, "document", format!("parse failed: {err}"));
            return;
        }
    };

    check_email(&content, &source, report);
    check_links(&content, &source, report);
    check_theme(&content, &source, report);
}

fn check_email(content: &SiteContent, source: &str, report: &mut CheckReport) {
    let Some(email) = content.personal.as_ref().and_then(|p| p.email.as_ref()) else {
        return;
    };
    if email.obfuscated && decode_email(email) == PLACEHOLDER_EMAIL {
        report.add_content(
            source,
            "personal.email.address",
            "obfuscated payload does not decode to an address",
        );
    }
}

fn check_links(content: &SiteContent, source: &str, report: &mut CheckReport) {
    for (index, project) in content.projects.iter().flatten().enumerate() {
        let links = [
            ("source", &project.links.source),
            ("demo", &project.links.demo),
        ];
        for (field, value) in links {
            if value.is_empty() || value == NO_LINK {
                continue;
            }
            if Url::parse(value).is_err() {
                report.add_content(
                    source,
                    format!("projects[{index}].links.{field}"),
                    format!("'{value}' is neither \"#\" nor an absolute URL"),
                );
            }
        }
    }
}

fn check_theme(content: &SiteContent, source: &str, report: &mut CheckReport) {
    let Some(theme) = &content.theme else { return };

    let declared = theme.active_theme.as_str();
    if !declared.is_empty() && declared != DEFAULT_THEME && !theme.presets.contains_key(declared) {
        report.add_content(
            source,
            "theme.activeTheme",
            format!("'{declared}' names no declared preset"),
        );
    }

    for section in THEMED_SECTIONS {
        if let Some(gradient) = theme.gradients.get(section)
            && gradient.colors.is_empty()
        {
            report.add_content(
                source,
                format!("theme.gradients.{section}.colors"),
                "empty color list",
            );
        }
    }

    for (name, sections) in &theme.presets {
        if !is_valid_name(name) {
            report.add_content(
                source,
                format!("theme.presets.{name}"),
                "never selectable: names are 1-20 chars of [A-Za-z0-9-]",
            );
        }
        for section in THEMED_SECTIONS {
            if let Some(colors) = sections.get(section)
                && colors.is_empty()
            {
                report.add_content(
                    source,
                    format!("theme.presets.{name}.{section}"),
                    "empty color list",
                );
            }
        }
    }
}

// =============================================================================
// Template selectors
// =============================================================================

fn check_template(config: &ToolConfig, report: &mut CheckReport) {
    let source = config
        .root_relative(&config.site.template)
        .display()
        .to_string();

    let raw = match fs::read_to_string(&config.site.template) {
        Ok(raw) => raw,
        Err(err) => {
            report.add_template(source, "template", format!("not readable: {err}"));
            return;
        }
    };
    let doc = match parse_document(&raw) {
        Ok(doc) => doc,
        Err(err) => {
            report.add_template(source, "template", format!("parse failed: {err}"));
            return;
        }
    };

    require(report, &source, doc.find_by_tag("title").is_some(), "<title>", "head");
    require(report, &source, doc.find_by_class("logo").is_some(), ".logo", "nav");
    require(report, &source, doc.find_by_class("hero-title").is_some(), ".hero-title", "hero");
    require(
        report,
        &source,
        doc.find_by_class("hero-subtitle").is_some(),
        ".hero-subtitle",
        "hero",
    );
    require(
        report,
        &source,
        about_target(&doc, "philosophy", PHILOSOPHY_LABEL),
        "p[data-about=philosophy]",
        "about",
    );
    require(
        report,
        &source,
        about_target(&doc, "objectives", OBJECTIVES_LABEL),
        "p[data-about=objectives]",
        "about",
    );
    require(
        report,
        &source,
        doc.count_elements(&|el| el.has_class("skill-category")) >= 2,
        ".skill-category (two)",
        "skills",
    );
    require(
        report,
        &source,
        doc.find_by_class("projects-grid").is_some(),
        ".projects-grid",
        "projects",
    );
    require(
        report,
        &source,
        doc.find_element(&|el| {
            el.tag == "a" && el.attr("href").is_some_and(|href| href.starts_with("mailto:"))
        })
        .is_some(),
        "a[href^=mailto:]",
        "contact",
    );
    require(
        report,
        &source,
        doc.find_by_class("footer")
            .and_then(|footer| footer.find_by_tag("p"))
            .is_some(),
        ".footer p",
        "footer",
    );
    for section in THEMED_SECTIONS {
        require(
            report,
            &source,
            doc.find_element(&|el| el.id() == Some(section)).is_some(),
            &format!("#{section}"),
            "theme",
        );
    }
}

/// A paragraph reachable either by its `data-about` key or by the heading
/// fallback the about transform uses.
fn about_target(doc: &Document, key: &str, label: &str) -> bool {
    doc.find_element(&|el| el.attr("data-about") == Some(key))
        .is_some()
        || doc
            .find_element(&|el| el.tag == "h3" && el.text().trim() == label)
            .is_some()
}

fn require(report: &mut CheckReport, source: &str, found: bool, selector: &str, transform: &str) {
    if !found {
        report.add_template(
            source,
            selector,
            format!("missing; the {transform} transform will no-op"),
        );
    }
}

// =============================================================================
// Tests
// =============================================================================
