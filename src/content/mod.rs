//! Site content: the `config.json` document.
//!
//! | Module   | Purpose                                        |
//! |----------|------------------------------------------------|
//! | `model`  | Typed content document (serde, camelCase keys) |
//! | `loader` | Read/parse with graceful degradation           |
//! | `email`  | Base64 de-obfuscation with safe fallback       |
//!
//! The content document drives what the rendered page says; the tool config
//! (`folio.toml`) drives how the tool behaves. The two never mix.

mod email;
mod loader;
mod model;

pub use email::{PLACEHOLDER_EMAIL, decode_email};
pub use loader::load_content;
pub use model::{
    EmailConfig, Gradient, GradientSet, NO_LINK, PresetSections, Project, SiteContent,
    THEMED_SECTIONS, ThemeConfig,
};
