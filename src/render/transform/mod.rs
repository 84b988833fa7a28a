//! Per-region content transforms.
//!
//! Each transform fills one region of the host template from the content
//! document. Every lookup is guarded twice: a missing content field and a
//! missing template target are both silent no-ops, so a partial document or
//! a reworked template degrades to the static fallback markup. No transform
//! can block another.
//!
//! Text lands in the tree as text nodes only; content strings are never
//! parsed as markup. The one structural exception is the hero title, where
//! a literal `\n` marker becomes a real `<br>` between text nodes.
//!
//! # Modules
//!
//! - `head`: document title, author/description metas, favicon, nav logo
//! - `hero`: headline (with line-break markers) and subtitle
//! - `about`: philosophy and objectives paragraphs
//! - `skills`: core and AI-augmented tool lists
//! - `projects`: rebuilt project card grid
//! - `contact`: mailto link, intro, contact methods, footer line
//! - `theme`: section background gradients

mod about;
mod contact;
mod head;
mod hero;
mod projects;
mod skills;
mod theme;

pub use about::{AboutTransform, OBJECTIVES_LABEL, PHILOSOPHY_LABEL};
pub use contact::{ContactTransform, FooterTransform};
pub use head::{HeadTransform, NavTransform};
pub use hero::HeroTransform;
pub use projects::ProjectsTransform;
pub use skills::SkillsTransform;
pub use theme::ThemeTransform;
