//! Typed content document.
//!
//! Every field is optional in the JSON: missing sections make the matching
//! page transform a no-op so the template's static markup stands. Unknown
//! fields are tolerated silently for forward compatibility. Keys are
//! camelCase in the JSON (`heroTitle`, `aiAugmented`, `activeTheme`).
//!
//! Leaf strings default to `""`; transforms treat empty the same as absent,
//! so an empty string never blanks out fallback markup. List-valued sections
//! distinguish absent (`None`, skip) from present-but-empty (clear the
//! region and render nothing).

use serde::Deserialize;
use std::collections::BTreeMap;

/// Link value meaning "no link": omitted from output, never rendered dead.
pub const NO_LINK: &str = "#";

/// The four themed page sections, in page order.
pub const THEMED_SECTIONS: [&str; 4] = ["hero", "about", "projects", "contact"];

/// Root content document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    pub personal: Option<Personal>,
    pub pages: Pages,
    pub skills: Option<Skills>,
    pub projects: Option<Vec<Project>>,
    pub contact: Option<Contact>,
    pub theme: Option<ThemeConfig>,
    pub seo: Option<Seo>,
}

/// Identity and contact handles.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Personal {
    pub name: String,
    pub title: String,
    pub email: Option<EmailConfig>,
    pub location: Option<String>,
    pub resume_file: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub blog: Option<String>,
    pub x: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Pages {
    pub home: Option<HomePage>,
    pub about: Option<AboutPage>,
}

/// Hero copy. The title may contain the literal two-character sequence
/// `\n`, rendered as a line break.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomePage {
    pub hero_title: String,
    pub hero_subtitle: String,
}

/// The two labelled about blocks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AboutPage {
    pub philosophy: String,
    pub objectives: String,
}

/// Skill lists for the two fixed category containers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Skills {
    pub core: Option<Vec<String>>,
    pub ai_augmented: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub timeline: String,
    pub approach: String,
    pub featured: bool,
    pub links: ProjectLinks,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectLinks {
    pub source: String,
    pub demo: String,
}

impl Default for ProjectLinks {
    fn default() -> Self {
        Self {
            source: NO_LINK.into(),
            demo: NO_LINK.into(),
        }
    }
}

impl ProjectLinks {
    /// Source URL, `None` for the sentinel.
    pub fn source_url(&self) -> Option<&str> {
        real_link(&self.source)
    }

    /// Demo URL, `None` for the sentinel.
    pub fn demo_url(&self) -> Option<&str> {
        real_link(&self.demo)
    }
}

fn real_link(value: &str) -> Option<&str> {
    (!value.is_empty() && value != NO_LINK).then_some(value)
}

/// Lede paragraph above the contact methods.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub intro: String,
}

/// An email address, possibly Base64-obfuscated against crawlers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub address: String,
    pub obfuscated: bool,
}

/// Theme declaration: default gradients plus named preset overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Name of the theme active without a URL override. Must be `"default"`
    /// or a key of `presets`, anything else falls back to `"default"`.
    pub active_theme: String,
    pub gradients: GradientSet,
    pub presets: BTreeMap<String, PresetSections>,
}

/// Per-section gradients for the four themed sections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GradientSet {
    pub hero: Option<Gradient>,
    pub about: Option<Gradient>,
    pub projects: Option<Gradient>,
    pub contact: Option<Gradient>,
}

impl GradientSet {
    pub fn get(&self, section: &str) -> Option<&Gradient> {
        match section {
            "hero" => self.hero.as_ref(),
            "about" => self.about.as_ref(),
            "projects" => self.projects.as_ref(),
            "contact" => self.contact.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Gradient {
    pub direction: String,
    pub colors: Vec<String>,
}

/// A preset's color-list overrides. A section the preset omits keeps the
/// default gradient entirely; an overridden section keeps its configured
/// direction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PresetSections {
    pub hero: Option<Vec<String>>,
    pub about: Option<Vec<String>>,
    pub projects: Option<Vec<String>>,
    pub contact: Option<Vec<String>>,
}

impl PresetSections {
    pub fn get(&self, section: &str) -> Option<&[String]> {
        let colors = match section {
            "hero" => &self.hero,
            "about" => &self.about,
            "projects" => &self.projects,
            "contact" => &self.contact,
            _ => &None,
        };
        colors.as_deref()
    }
}

/// Head metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Seo {
    pub author: String,
    pub description: String,
    pub favicon: String,
}
