//! Cursor-driven pagination over the module index.
//!
//! The index's `since` parameter is inclusive, so the last record of one page
//! comes back as the first record of the next. [`fetch_all`] walks the pages
//! in order, moving the cursor to the timestamp of each page's last raw entry
//! and dropping that single boundary duplicate. Duplicates that are not at a
//! page boundary are left alone.
//!
//! Pages are fetched strictly one after another: each request depends on the
//! previous page's last entry. All run state lives in a [`PageCursor`] owned
//! by the call, so independent runs may proceed concurrently.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{FetchError, FetchRequest, IndexEntry, IndexFetcher};

/// State carried from one page to the next.
#[derive(Debug, Clone, Default)]
struct PageCursor {
    /// `since` for the next request
    since: String,
    /// Last raw entry of the previous page
    previous: Option<IndexEntry>,
    /// Pages requested so far
    pages_fetched: usize,
}

impl PageCursor {
    fn starting_at(since: &str) -> Self {
        Self {
            since: since.to_string(),
            ..Self::default()
        }
    }

    /// `page` without its leading boundary duplicate.
    fn fresh<'a>(&self, page: &'a [IndexEntry]) -> &'a [IndexEntry] {
        match &self.previous {
            Some(previous) => drop_leading_duplicate(page, previous),
            None => page,
        }
    }

    /// True when `page` is nothing but the previous boundary entry.
    fn is_boundary_only(&self, page: &[IndexEntry]) -> bool {
        matches!((page, &self.previous), ([only], Some(previous)) if only == previous)
    }

    /// Move past `page`, keyed on its last raw entry.
    fn advance(&mut self, page: &[IndexEntry]) {
        if let Some(last) = page.last() {
            self.since.clone_from(&last.timestamp);
            self.previous = Some(last.clone());
        }
    }
}

/// Remove `entries[0]` when it equals `previous`.
#[must_use]
pub fn drop_leading_duplicate<'a>(
    entries: &'a [IndexEntry],
    previous: &IndexEntry,
) -> &'a [IndexEntry] {
    match entries.split_first() {
        Some((first, rest)) if first == previous => rest,
        _ => entries,
    }
}

/// Fetch every page described by `request` and return the entries in order.
///
/// - A non-positive `limit` performs exactly one fetch, truncated to
///   `max_results` when that is set.
/// - Otherwise pages are requested until one comes back empty, shorter than
///   `limit`, or consisting only of the previous boundary entry, or until
///   `max_pages` or `max_results` is reached.
///
/// # Errors
///
/// [`FetchError::InvalidRequest`] for negative caps; otherwise the first
/// fetch error, unchanged. Entries from earlier pages are discarded.
pub async fn fetch_all<F: IndexFetcher>(
    fetcher: &F,
    request: &FetchRequest,
    cancel: &CancellationToken,
) -> Result<Vec<IndexEntry>, FetchError> {
    request.validate()?;

    if request.limit <= 0 {
        let mut entries = fetcher.fetch(request, cancel).await?;
        if let Some(cap) = request.result_cap() {
            entries.truncate(cap);
        }
        return Ok(entries);
    }

    let page_size = usize::try_from(request.limit).unwrap_or(usize::MAX);
    let mut cursor = PageCursor::starting_at(&request.since);
    let mut page_request = request.clone();
    let mut entries = Vec::new();

    loop {
        if request.page_cap().is_some_and(|cap| cursor.pages_fetched >= cap) {
            debug!(target: "index", "Stopping after {} pages", cursor.pages_fetched);
            break;
        }

        page_request.since.clone_from(&cursor.since);
        let page = fetcher.fetch(&page_request, cancel).await?;
        cursor.pages_fetched += 1;

        if page.is_empty() {
            break;
        }

        let fresh = cursor.fresh(&page);
        debug!(
            target: "index",
            "Page {} since '{}': {} entries, {} new",
            cursor.pages_fetched,
            page_request.since,
            page.len(),
            fresh.len()
        );

        if fresh.is_empty() && cursor.is_boundary_only(&page) {
            break;
        }
        entries.extend_from_slice(fresh);

        if let Some(cap) = request.result_cap() {
            if entries.len() >= cap {
                entries.truncate(cap);
                return Ok(entries);
            }
        }

        cursor.advance(&page);

        if page.len() < page_size {
            break;
        }
    }

    Ok(entries)
}
