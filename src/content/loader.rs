//! Content loading with graceful degradation.

use crate::content::SiteContent;
use crate::log;
use std::path::Path;

/// Read and parse the content document.
///
/// Any failure (missing file, io error, malformed JSON) returns `None` with
/// a warning instead of an error: the caller emits the template with its
/// static fallback markup intact. A render never aborts over content.
pub fn load_content(path: &Path) -> Option<SiteContent> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            log!(
                "warning";
                "could not read {}, using static content: {err}",
                path.display()
            );
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(content) => Some(content),
        Err(err) => {
            log!(
                "warning";
                "could not parse {}, using static content: {err}",
                path.display()
            );
            None
        }
    }
}
