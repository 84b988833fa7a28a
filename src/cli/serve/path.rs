//! Request URL handling.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Split a request URL into its decoded path and the raw query string.
pub fn split_url(url: &str) -> (String, Option<&str>) {
    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    };
    let path = percent_decode_str(path)
        .decode_utf8()
        .map(Cow::into_owned)
        .unwrap_or_default();
    (path, query)
}

/// First value of a query parameter, percent-decoded.
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    for pair in query?.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == name {
            return percent_decode_str(value)
                .decode_utf8()
                .ok()
                .map(Cow::into_owned);
        }
    }
    None
}

/// Resolve a decoded URL path to a file under the serve root.
///
/// Canonicalization resolves symlinks and dot segments, so a path that
/// escapes the root in any encoded or linked form is rejected rather than
/// served.
pub fn resolve_path(path: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = path.trim_matches('/');
    if clean.contains("..") {
        return None;
    }

    let local = serve_root.join(clean);
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }
    canonical.is_file().then_some(canonical)
}

// =============================================================================
// Tests
// =============================================================================
