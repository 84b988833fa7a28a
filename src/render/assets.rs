//! Generated asset injection.
//!
//! The emitted page references one generated stylesheet and one behavior
//! script by fingerprinted URL. Injection is part of page assembly and runs
//! even when the content document failed to load; the static fallback page
//! still animates and navigates.

use crate::dom::{Document, Element};
use crate::embed::page::{PageJsVars, SITE_CSS, SITE_JS};
use crate::embed::serve::RELOAD_JS;
use crate::embed::NoVars;
use crate::render::RenderOptions;

/// Append the stylesheet link to `<head>` and the behavior script (plus the
/// reload script while serving) to `<body>`. A template missing either
/// region skips that half.
pub fn inject_assets(doc: &mut Document, options: &RenderOptions) {
    if let Some(head) = doc.head_mut() {
        let mut link = Element::new("link");
        link.set_attr("rel", "stylesheet");
        link.set_attr("href", &SITE_CSS.url_path(&NoVars));
        head.push_elem(link);
    }

    if let Some(body) = doc.body_mut() {
        let mut script = Element::new("script");
        script.set_attr("src", &SITE_JS.url_path(&PageJsVars::from_options(options)));
        body.push_elem(script);

        if options.live_reload {
            let mut reload = Element::new("script");
            reload.set_attr("src", &RELOAD_JS.url_path(&NoVars));
            body.push_elem(reload);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
