//! File watching and the rebuild loop.
//!
//! notify events funnel into a trailing-edge debouncer: a quiet period
//! after the last event triggers one rebuild, and a cooldown after each
//! rebuild soaks up editor save bursts. Content hashing drops no-op writes,
//! so `touch` or an unchanged save never refreshes anyone's browser.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver};
use notify::{RecursiveMode, Watcher};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::{ToolConfig, cfg, reload_config};
use crate::core;
use crate::debug;
use crate::log;
use crate::logger::{status_error, status_success, status_unchanged};
use crate::utils::fs::normalize_path;

use super::state::SiteState;

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;
const TICK_MS: u64 = 100;

/// Watch the site root and rebuild on change. Blocks until shutdown.
pub fn watch_loop(state: &SiteState, shutdown_rx: &Receiver<()>) {
    let config = cfg();

    let (tx, rx) = channel::unbounded();
    let mut watcher = match notify::recommended_watcher(move |event| {
        let _ = tx.send(event);
    }) {
        Ok(watcher) => watcher,
        Err(err) => {
            log!("watch"; "watcher unavailable, live reload disabled: {err}");
            return;
        }
    };

    if let Err(err) = watcher.watch(&config.root, RecursiveMode::Recursive) {
        log!("watch"; "cannot watch {}: {err}", config.root.display());
        return;
    }
    log!("watch"; "watching {} for changes", config.root.display());

    let mut debouncer = Debouncer::new();
    let mut hashes = ContentHashes::default();

    loop {
        match rx.recv_timeout(Duration::from_millis(TICK_MS)) {
            Ok(Ok(event)) => debouncer.add_event(&event, &config),
            Ok(Err(err)) => debug!("watch"; "notify error: {err}"),
            Err(channel::RecvTimeoutError::Timeout) => {}
            Err(channel::RecvTimeoutError::Disconnected) => return,
        }
        if core::is_shutdown() || shutdown_rx.try_recv().is_ok() {
            return;
        }

        let Some(changed) = debouncer.take_if_ready() else {
            continue;
        };
        let changed: Vec<PathBuf> = changed
            .into_iter()
            .filter(|path| hashes.content_changed(path))
            .collect();
        if changed.is_empty() {
            status_unchanged("no content changes");
            continue;
        }
        rebuild(state, &changed);
    }
}

fn rebuild(state: &SiteState, changed: &[PathBuf]) {
    let summary = summarize(changed);
    let result = reload_config().and_then(|_| state.rebuild());
    match result {
        Ok(()) => {
            let generation = core::bump_generation();
            status_success(&format!("rebuilt after {summary} (generation {generation})"));
        }
        Err(err) => status_error(&format!("rebuild failed after {summary}"), &format!("{err:#}")),
    }
}

fn summarize(changed: &[PathBuf]) -> String {
    const SHOWN: usize = 3;
    let names: Vec<String> = changed
        .iter()
        .take(SHOWN)
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    if changed.len() > SHOWN {
        format!("{} (+{} more)", names.join(", "), changed.len() - SHOWN)
    } else {
        names.join(", ")
    }
}

// =============================================================================
// Debouncer
// =============================================================================

/// Trailing-edge debouncer over raw notify events.
struct Debouncer {
    changes: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            changes: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn add_event(&mut self, event: &notify::Event, config: &ToolConfig) {
        use notify::EventKind;

        match event.kind {
            EventKind::Create(_) | EventKind::Remove(_) => {}
            EventKind::Modify(modify) => {
                // mtime/chmod noise would loop the rebuild forever
                if matches!(modify, notify::event::ModifyKind::Metadata(_)) {
                    return;
                }
            }
            _ => return,
        }

        for path in &event.paths {
            if is_ignored(path) || path.starts_with(&config.build.output) {
                continue;
            }
            let path = normalize_path(path);
            if self.changes.insert(path.clone()) {
                debug!("watch"; "changed: {}", path.display());
            }
            self.last_event = Some(Instant::now());
        }
    }

    /// Take the coalesced change set once the debounce window closed and the
    /// post-rebuild cooldown elapsed.
    fn take_if_ready(&mut self) -> Option<FxHashSet<PathBuf>> {
        if !self.is_ready() {
            return None;
        }
        self.last_event = None;
        let changes = std::mem::take(&mut self.changes);
        if changes.is_empty() {
            return None;
        }
        self.last_rebuild = Some(Instant::now());
        Some(changes)
    }

    fn is_ready(&self) -> bool {
        let Some(last_event) = self.last_event else {
            return false;
        };
        if last_event.elapsed() < Duration::from_millis(DEBOUNCE_MS) {
            return false;
        }
        match self.last_rebuild {
            Some(last) => last.elapsed() >= Duration::from_millis(REBUILD_COOLDOWN_MS),
            None => true,
        }
    }
}

/// Editor temp files and hidden files never trigger a rebuild.
fn is_ignored(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return true;
    };
    name.starts_with('.')
        || name.ends_with('~')
        || name.ends_with(".swp")
        || name.ends_with(".swx")
        || name.ends_with(".tmp")
        || (name.starts_with('#') && name.ends_with('#'))
}

// =============================================================================
// No-op write detection
// =============================================================================

/// blake3 hash per watched file, detecting writes that changed nothing.
#[derive(Default)]
struct ContentHashes {
    seen: FxHashMap<PathBuf, String>,
}

impl ContentHashes {
    /// True when the file's bytes differ from the last time it was seen.
    /// Unreadable files (deleted, mid-save) count as changed.
    fn content_changed(&mut self, path: &Path) -> bool {
        let Ok(bytes) = std::fs::read(path) else {
            self.seen.remove(path);
            return true;
        };
        let digest = hex::encode(blake3::hash(&bytes).as_bytes());
        match self.seen.insert(path.to_path_buf(), digest.clone()) {
            Some(previous) => previous != digest,
            None => true,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
