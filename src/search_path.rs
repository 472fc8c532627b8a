//! Dependency search-path sanitization.
//!
//! The numeric kernel library's headers are located along a colon-separated
//! search path. Before that path is consulted, entries pointing at stale or
//! system-wide installs are filtered out so they cannot shadow the copy
//! intended for the build environment.

use camino::Utf8PathBuf;

/// Substrings that disqualify a search-path entry.
pub const SEARCH_PATH_BLOCKLIST: &[&str] = &["dist-packages", "local"];

/// Environment variable holding the colon-separated dependency search path.
pub const SEARCH_PATH_ENV: &str = "TRIPHONON_SEARCH_PATH";

/// Remove every entry whose string form contains any blocklisted substring.
///
/// The relative order of retained entries is preserved. Removing nothing is
/// not an error; an empty input yields an empty output.
#[must_use]
pub fn sanitize(mut entries: Vec<Utf8PathBuf>, blocklist: &[&str]) -> Vec<Utf8PathBuf> {
    entries.retain(|entry| !blocklist.iter().any(|term| entry.as_str().contains(term)));
    entries
}

/// Read the search path from the environment and sanitize it with the
/// default blocklist.
///
/// An absent variable yields an empty list; empty path segments are dropped.
#[must_use]
pub fn search_path_from_env() -> Vec<Utf8PathBuf> {
    let Ok(raw) = std::env::var(SEARCH_PATH_ENV) else {
        return Vec::new();
    };
    let entries = raw
        .split(':')
        .filter(|segment| !segment.is_empty())
        .map(Utf8PathBuf::from)
        .collect();
    sanitize(entries, SEARCH_PATH_BLOCKLIST)
}
