//! Embedded assets with fingerprinted filenames.
//!
//! Generated assets land under `/.folio/` in the output with a content
//! fingerprint in the filename, so emitted pages reference an exact
//! version and a changed asset gets a fresh URL. `cleanup_old` drops
//! fingerprints left behind by earlier builds.

use std::marker::PhantomData;
use std::path::Path;

use anyhow::{Context, Result};

use super::TemplateVars;
use crate::utils::hash;

/// Directory under the output root for generated assets.
pub const ASSET_DIR: &str = ".folio";

#[derive(Debug, Clone, Copy)]
pub enum AssetKind {
    Css,
    JavaScript,
}

impl AssetKind {
    const fn extension(self) -> &'static str {
        match self {
            AssetKind::Css => "css",
            AssetKind::JavaScript => "js",
        }
    }
}

/// A compile-time embedded asset typed by its variable set.
pub struct EmbeddedAsset<V> {
    kind: AssetKind,
    name: &'static str,
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> EmbeddedAsset<V> {
    pub const fn new(kind: AssetKind, name: &'static str, content: &'static str) -> Self {
        Self {
            kind,
            name,
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> EmbeddedAsset<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }

    /// Filename carrying the content fingerprint, e.g. `site-a1b2c3d4.css`.
    pub fn filename(&self, vars: &V) -> String {
        let digest = hash::fingerprint(&format!("{}{}", self.content, vars.hash_input()));
        format!("{}-{}.{}", self.name, digest, self.kind.extension())
    }

    /// Absolute URL path the emitted page references.
    pub fn url_path(&self, vars: &V) -> String {
        format!("/{ASSET_DIR}/{}", self.filename(vars))
    }

    /// Write the rendered asset under the output directory.
    pub fn write(&self, output_dir: &Path, vars: &V) -> Result<()> {
        let dir = output_dir.join(ASSET_DIR);
        std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        let path = dir.join(self.filename(vars));
        std::fs::write(&path, self.render(vars))
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Remove every on-disk fingerprint of this asset.
    pub fn cleanup_old(&self, output_dir: &Path) -> Result<()> {
        let dir = output_dir.join(ASSET_DIR);
        if !dir.is_dir() {
            return Ok(());
        }
        let prefix = format!("{}-", self.name);
        let suffix = format!(".{}", self.kind.extension());
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with(&prefix) && name.ends_with(&suffix) {
                std::fs::remove_file(entry.path())
                    .with_context(|| format!("removing stale asset {name}"))?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::NoVars;

    const ASSET: EmbeddedAsset<NoVars> = EmbeddedAsset::new(AssetKind::Css, "probe", "a { b: c }");

    #[test]
    fn test_url_path_shape() {
        let url = ASSET.url_path(&NoVars);
        assert!(url.starts_with("/.folio/probe-"));
        assert!(url.ends_with(".css"));
    }

    #[test]
    fn test_write_then_cleanup() {
        let dir = tempfile::tempdir().unwrap();

        ASSET.write(dir.path(), &NoVars).unwrap();
        let path = dir.path().join(ASSET_DIR).join(ASSET.filename(&NoVars));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a { b: c }");

        ASSET.cleanup_old(dir.path()).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_cleanup_ignores_other_assets() {
        let dir = tempfile::tempdir().unwrap();
        let folio = dir.path().join(ASSET_DIR);
        std::fs::create_dir_all(&folio).unwrap();
        std::fs::write(folio.join("probe-deadbeef.css"), "stale").unwrap();
        std::fs::write(folio.join("other-deadbeef.css"), "keep").unwrap();
        std::fs::write(folio.join("probe-deadbeef.js"), "keep").unwrap();

        ASSET.cleanup_old(dir.path()).unwrap();

        assert!(!folio.join("probe-deadbeef.css").exists());
        assert!(folio.join("other-deadbeef.css").exists());
        assert!(folio.join("probe-deadbeef.js").exists());
    }

    #[test]
    fn test_cleanup_without_output_dir_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        ASSET.cleanup_old(&dir.path().join("missing")).unwrap();
    }
}
