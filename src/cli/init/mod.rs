//! Site scaffolding.
//!
//! Writes a starter `folio.toml`, content document, and template into the
//! target directory. Existing files are never overwritten; rerunning init
//! in a scaffolded site only reports what it skipped.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::embed::init::{CONFIG_JSON, FOLIO_TOML, INDEX_HTML, StarterVars};
use crate::log;

/// Create a new site in `name` (or the current directory when omitted).
pub fn new_site(name: Option<&Path>, author: &str) -> Result<()> {
    let target: PathBuf = match name {
        Some(dir) => {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            dir.to_path_buf()
        }
        None => std::env::current_dir().context("resolving current directory")?,
    };

    let vars = StarterVars { name: author };
    let files: [(&str, String); 3] = [
        ("folio.toml", FOLIO_TOML.render(&vars)),
        ("config.json", CONFIG_JSON.render(&vars)),
        ("index.html", INDEX_HTML.render(&vars)),
    ];

    let mut created = 0;
    for (file, body) in files {
        let path = target.join(file);
        if path.exists() {
            log!("init"; "{file} exists, skipping");
            continue;
        }
        fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        log!("init"; "created {file}");
        created += 1;
    }

    if created == 0 {
        log!("init"; "nothing to do");
    } else {
        log!("init"; "site ready, run `folio serve` to preview");
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
