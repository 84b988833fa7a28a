//! `[render]` section configuration.
//!
//! Controls the behavior baked into the generated page script: the
//! scroll-reveal observer and the scroll handler debounce.
//!
//! # Example
//!
//! ```toml
//! [render]
//! scroll_debounce_ms = 10     # Trailing-edge debounce for scroll handlers
//!
//! [render.animation]
//! enable = true               # Fade sections in as they scroll into view
//! threshold = 0.1             # Fraction of the element that must be visible
//! margin = "0px 0px -50px 0px"  # Observer root margin
//! ```
//!
//! With `enable = false` the reveal styles and observer script are left out
//! entirely and sections render fully visible.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Page script settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Scroll-reveal animation settings.
    pub animation: AnimationConfig,

    /// Trailing-edge debounce window for scroll handlers, in milliseconds.
    pub scroll_debounce_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            animation: AnimationConfig::default(),
            scroll_debounce_ms: 10,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        self.animation.validate(diag);

        if self.scroll_debounce_ms == 0 {
            diag.warn(
                FieldPath::new("render.scroll_debounce_ms"),
                "0 disables debouncing, scroll handlers run on every event",
            );
        } else if self.scroll_debounce_ms > 1000 {
            diag.error_with_hint(
                FieldPath::new("render.scroll_debounce_ms"),
                format!("{} ms makes scroll handlers feel frozen", self.scroll_debounce_ms),
                "use a value below 1000, typically 10",
            );
        }
    }
}

/// Scroll-reveal observer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Enable the fade-in reveal for sections and project cards.
    pub enable: bool,

    /// Intersection threshold, a fraction in `0.0..=1.0`.
    pub threshold: f64,

    /// Observer root margin, in CSS margin syntax.
    pub margin: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enable: true,
            threshold: 0.1,
            margin: "0px 0px -50px 0px".into(),
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !(0.0..=1.0).contains(&self.threshold) {
            diag.error_with_hint(
                FieldPath::new("render.animation.threshold"),
                format!("{} is outside 0.0..=1.0", self.threshold),
                "the threshold is the fraction of the element that must be visible",
            );
        }

        if self.margin.trim().is_empty() {
            diag.error_with_hint(
                FieldPath::new("render.animation.margin"),
                "margin must not be empty",
                "use CSS margin syntax, e.g. \"0px 0px -50px 0px\"",
            );
        }
    }
}
