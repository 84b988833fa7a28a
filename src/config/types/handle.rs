//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! This enables hot-reloading of `folio.toml` during watch mode.

use crate::config::ToolConfig;
use anyhow::Result;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<ToolConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(ToolConfig::default()));

/// Global hash of the current config file content.
static CONFIG_HASH: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

#[inline]
pub fn cfg() -> Arc<ToolConfig> {
    CONFIG.load_full()
}

/// Reload config from disk if content changed.
///
/// Returns `Ok(true)` if config was updated, `Ok(false)` if unchanged.
/// A deleted config file counts as unchanged: the last good config stays
/// active until a readable replacement appears.
pub fn reload_config() -> Result<bool> {
    use std::fs;

    let c = cfg();
    let Some(path) = c.config_path.as_ref() else {
        return Ok(false);
    };
    let Ok(content) = fs::read_to_string(path) else {
        return Ok(false);
    };

    let new_hash = crate::utils::hash::compute(content.as_bytes());
    let old_hash = CONFIG_HASH.load(std::sync::atomic::Ordering::Relaxed);
    if new_hash == old_hash {
        return Ok(false);
    }

    let new_config = ToolConfig::load(Some(&c.root))?;
    CONFIG.store(Arc::new(new_config));
    CONFIG_HASH.store(new_hash, std::sync::atomic::Ordering::Relaxed);

    Ok(true)
}

#[inline]
pub fn init_config(config: ToolConfig) -> Arc<ToolConfig> {
    use std::fs;

    if let Some(path) = config.config_path.as_ref()
        && let Ok(content) = fs::read_to_string(path)
    {
        let hash = crate::utils::hash::compute(content.as_bytes());
        CONFIG_HASH.store(hash, std::sync::atomic::Ordering::Relaxed);
    }

    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
