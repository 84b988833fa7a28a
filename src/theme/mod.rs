//! Theme resolution.
//!
//! A theme candidate arrives from the `theme` URL query parameter (preview
//! server, per request) or the `--theme` build flag. Candidates are
//! whitelist-validated before they are allowed to pick a preset; anything
//! suspect falls back to the content's declared theme, then to `"default"`.

mod gradient;

pub use gradient::gradient_css;

use crate::content::{Gradient, GradientSet, ThemeConfig};
use crate::debug;
use regex::Regex;
use std::sync::LazyLock;

/// The built-in theme: the content's own gradients, no preset applied.
pub const DEFAULT_THEME: &str = "default";

/// Pick the active theme name.
///
/// Precedence: validated candidate > content's `activeTheme` > `"default"`.
/// A candidate is rejected when it is not 1-20 chars of `[A-Za-z0-9-]`, or
/// names neither `"default"` nor a declared preset. The declared
/// `activeTheme` gets the same membership check, so an undeclared name in
/// the content degrades to `"default"` instead of leaking through.
pub fn resolve_theme(candidate: Option<&str>, theme: &ThemeConfig) -> String {
    if let Some(raw) = candidate {
        if let Some(valid) = validate_candidate(raw, theme) {
            debug!("theme"; "using theme override: {valid}");
            return valid.to_string();
        }
        debug!("theme"; "invalid theme {raw:?}, using config theme");
    }

    let declared = theme.active_theme.as_str();
    if is_known_theme(declared, theme) {
        declared.to_string()
    } else {
        DEFAULT_THEME.to_string()
    }
}

/// Syntactic whitelist: 1-20 chars of `[A-Za-z0-9-]`. Names outside it are
/// never selectable, whatever the presets declare.
pub fn is_valid_name(raw: &str) -> bool {
    static RE_THEME: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]{1,20}$").unwrap());
    RE_THEME.is_match(raw)
}

/// Syntactic whitelist plus membership check.
fn validate_candidate<'a>(raw: &'a str, theme: &ThemeConfig) -> Option<&'a str> {
    if !is_valid_name(raw) {
        return None;
    }
    is_known_theme(raw, theme).then_some(raw)
}

fn is_known_theme(name: &str, theme: &ThemeConfig) -> bool {
    name == DEFAULT_THEME || theme.presets.contains_key(name)
}

/// Gradients for the active theme.
///
/// Preset application is per-section partial: a section the preset covers
/// gets the preset's colors but keeps its configured direction; a section
/// the preset omits keeps the default gradient entirely. Preset colors for
/// a section without a default gradient stay unused (no direction to render
/// with).
pub fn effective_gradients(theme: &ThemeConfig, active: &str) -> GradientSet {
    let mut gradients = theme.gradients.clone();
    if active == DEFAULT_THEME {
        return gradients;
    }

    let Some(preset) = theme.presets.get(active) else {
        debug!("theme"; "preset '{active}' not found, using default gradients");
        return gradients;
    };

    override_colors(&mut gradients.hero, preset.hero.as_ref());
    override_colors(&mut gradients.about, preset.about.as_ref());
    override_colors(&mut gradients.projects, preset.projects.as_ref());
    override_colors(&mut gradients.contact, preset.contact.as_ref());
    gradients
}

fn override_colors(slot: &mut Option<Gradient>, colors: Option<&Vec<String>>) {
    if let (Some(gradient), Some(colors)) = (slot.as_mut(), colors) {
        gradient.colors = colors.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PresetSections;
    use std::collections::BTreeMap;

    fn theme_with_presets(names: &[&str]) -> ThemeConfig {
        let mut presets = BTreeMap::new();
        for name in names {
            presets.insert(name.to_string(), PresetSections::default());
        }
        ThemeConfig {
            active_theme: String::new(),
            gradients: GradientSet::default(),
            presets,
        }
    }

    #[test]
    fn test_valid_candidate_wins() {
        let theme = theme_with_presets(&["ocean"]);
        assert_eq!(resolve_theme(Some("ocean"), &theme), "ocean");
        assert_eq!(resolve_theme(Some("default"), &theme), "default");
    }

    #[test]
    fn test_candidate_beats_declared_theme() {
        let mut theme = theme_with_presets(&["ocean", "sunset"]);
        theme.active_theme = "sunset".into();
        assert_eq!(resolve_theme(Some("ocean"), &theme), "ocean");
    }

    #[test]
    fn test_invalid_candidates_fall_back() {
        let mut theme = theme_with_presets(&["ocean"]);
        theme.active_theme = "ocean".into();

        for bad in [
            "",
            "not a theme",
            "ocean!",
            "../../etc",
            "<script>",
            "this-name-is-way-too-long",
            "unknown-preset",
        ] {
            assert_eq!(resolve_theme(Some(bad), &theme), "ocean", "candidate {bad:?}");
        }
    }

    #[test]
    fn test_exactly_twenty_chars_is_still_valid() {
        let name = "a".repeat(20);
        let theme = theme_with_presets(&[name.as_str()]);
        assert_eq!(resolve_theme(Some(&name), &theme), name);

        let too_long = "a".repeat(21);
        let theme = theme_with_presets(&[too_long.as_str()]);
        assert_eq!(resolve_theme(Some(&too_long), &theme), "default");
    }

    #[test]
    fn test_undeclared_active_theme_degrades_to_default() {
        let mut theme = theme_with_presets(&["ocean"]);
        theme.active_theme = "missing".into();
        assert_eq!(resolve_theme(None, &theme), "default");
    }

    #[test]
    fn test_no_candidate_uses_declared_theme() {
        let mut theme = theme_with_presets(&["ocean"]);
        theme.active_theme = "ocean".into();
        assert_eq!(resolve_theme(None, &theme), "ocean");

        theme.active_theme = String::new();
        assert_eq!(resolve_theme(None, &theme), "default");
    }

    #[test]
    fn test_preset_overrides_colors_keeps_direction() {
        let mut theme = theme_with_presets(&[]);
        theme.gradients.hero = Some(Gradient {
            direction: "135deg".into(),
            colors: vec!["#111".into(), "#222".into()],
        });
        theme.gradients.about = Some(Gradient {
            direction: "to right".into(),
            colors: vec!["#333".into()],
        });
        theme.presets.insert(
            "ocean".into(),
            PresetSections {
                hero: Some(vec!["#00a".into(), "#00b".into(), "#00c".into()]),
                // `contact` has no default gradient, the override has no effect
                contact: Some(vec!["#00d".into()]),
                ..Default::default()
            },
        );

        let effective = effective_gradients(&theme, "ocean");

        let hero = effective.hero.unwrap();
        assert_eq!(hero.direction, "135deg");
        assert_eq!(hero.colors, vec!["#00a", "#00b", "#00c"]);

        // Omitted section keeps the default gradient entirely
        let about = effective.about.unwrap();
        assert_eq!(about.colors, vec!["#333"]);

        assert!(effective.contact.is_none());
    }

    #[test]
    fn test_default_theme_leaves_gradients_untouched() {
        let mut theme = theme_with_presets(&["ocean"]);
        theme.gradients.hero = Some(Gradient {
            direction: "135deg".into(),
            colors: vec!["#111".into()],
        });
        theme.presets.insert(
            "ocean".into(),
            PresetSections {
                hero: Some(vec!["#00a".into()]),
                ..Default::default()
            },
        );

        let effective = effective_gradients(&theme, "default");
        assert_eq!(effective.hero.unwrap().colors, vec!["#111"]);
    }
}
