//! One-shot production build.
//!
//! Renders the template with the current content document and writes the
//! populated page, the generated assets, and copies of the static asset
//! directories into the output directory. A missing or broken content
//! document is not fatal: the template is emitted with its fallback markup
//! intact, matching the renderer contract.

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::config::ToolConfig;
use crate::content::load_content;
use crate::embed::write_embedded_assets;
use crate::log;
use crate::logger::ProgressLine;
use crate::render::{RenderOptions, render_page};
use crate::utils::plural::plural_count;

pub fn build_site(config: &ToolConfig, theme: Option<String>) -> Result<()> {
    let start = Instant::now();

    if config.build.clean && config.build.output.exists() {
        fs::remove_dir_all(&config.build.output)
            .with_context(|| format!("cleaning {}", config.build.output.display()))?;
    }

    let template = fs::read_to_string(&config.site.template)
        .with_context(|| format!("reading template {}", config.site.template.display()))?;
    let content = load_content(&config.site.content);

    let options = RenderOptions::from_config(config).with_theme(theme);
    let html = render_page(&template, content.as_ref(), &options)
        .with_context(|| format!("parsing template {}", config.site.template.display()))?;

    fs::create_dir_all(&config.build.output)
        .with_context(|| format!("creating {}", config.build.output.display()))?;
    let index = config.build.output.join("index.html");
    fs::write(&index, html).with_context(|| format!("writing {}", index.display()))?;
    write_embedded_assets(&options, &config.build.output)?;

    let copied = copy_assets(config)?;

    log!(
        "build";
        "wrote {} in {}ms",
        config.root_relative(&index).display(),
        start.elapsed().as_millis()
    );
    if copied > 0 {
        log!("build"; "copied {}", plural_count(copied, "asset file"));
    }
    Ok(())
}

/// Copy the configured asset directories into the output verbatim,
/// keeping their path relative to the site root.
fn copy_assets(config: &ToolConfig) -> Result<usize> {
    let mut files = Vec::new();
    for dir in &config.build.assets {
        for entry in jwalk::WalkDir::new(dir).skip_hidden(true) {
            let entry = entry.with_context(|| format!("walking {}", dir.display()))?;
            if entry.file_type().is_file() {
                files.push(entry.path());
            }
        }
    }
    if files.is_empty() {
        return Ok(0);
    }

    let progress = ProgressLine::new(&[("assets", files.len())]);
    files.par_iter().try_for_each(|path| -> Result<()> {
        let rel = path
            .strip_prefix(&config.root)
            .with_context(|| format!("asset {} outside site root", path.display()))?;
        let dest = config.build.output.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest).with_context(|| format!("copying {}", rel.display()))?;
        progress.inc("assets");
        Ok(())
    })?;
    progress.finish();

    Ok(files.len())
}

// =============================================================================
// Tests
// =============================================================================
