//! Configuration section definitions.
//!
//! Each module corresponds to a section in `folio.toml`:
//!
//! | Module   | TOML Section | Purpose                            |
//! |----------|--------------|------------------------------------|
//! | `build`  | `[build]`    | Output directory, asset copying    |
//! | `render` | `[render]`   | Page script behavior               |
//! | `serve`  | `[serve]`    | Development server                 |
//! | `site`   | `[site]`     | Content and template locations     |

mod build;
mod render;
mod serve;
mod site;

// Re-export section configs
pub use build::BuildConfig;
pub use render::{AnimationConfig, RenderConfig};
pub use serve::ServeConfig;
pub use site::SiteConfig;
