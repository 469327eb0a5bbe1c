//! Query and site filtering of index entries.

use std::collections::HashSet;

use super::IndexEntry;

/// Keep entries whose path contains `query`, case-insensitively.
///
/// When `use_site_filter` is set and `site` is non-empty, the path must also
/// start with `site/`. A blank query matches nothing.
#[must_use]
pub fn filter_entries(
    entries: &[IndexEntry],
    query: &str,
    site: &str,
    use_site_filter: bool,
) -> Vec<IndexEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let site_prefix = (use_site_filter && !site.is_empty()).then(|| format!("{}/", site.to_lowercase()));

    entries
        .iter()
        .filter(|entry| {
            let path = entry.path.to_lowercase();
            site_prefix.as_ref().is_none_or(|prefix| path.starts_with(prefix.as_str()))
                && path.contains(&query)
        })
        .cloned()
        .collect()
}

/// Whether a search query should be restricted to the selected site.
///
/// A query containing a dot already names a host, so it is matched as-is.
#[must_use]
pub fn should_filter_by_site(query: &str) -> bool {
    !query.trim().contains('.')
}

/// First entry per module path, in original order.
#[must_use]
pub fn unique_by_path(entries: Vec<IndexEntry>) -> Vec<IndexEntry> {
    let mut seen = HashSet::new();
    entries.into_iter().filter(|entry| seen.insert(entry.path.clone())).collect()
}
