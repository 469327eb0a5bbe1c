//! Go module index client.
//!
//! The module index is a timestamp-ordered feed of `(path, version, time)`
//! records served as newline-delimited JSON. This module covers:
//!
//! - [`IndexEntry`] and [`FetchRequest`] - the record and request shapes
//! - [`IndexFetcher`] - the single-page fetch capability, with
//!   [`HttpIndexFetcher`] as the HTTP binding
//! - [`fetch_all`] - pagination with boundary de-duplication and caps
//! - [`filter_entries`] - query and site filtering of the results
//!
//! # Example
//!
//! ```rust,no_run
//! use go_toolkit::index::{FetchRequest, HttpIndexFetcher, fetch_all, filter_entries};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let fetcher = HttpIndexFetcher::public()?;
//! let request = FetchRequest {
//!     since: "2024-01-01T00:00:00Z".to_string(),
//!     limit: 200,
//!     max_pages: 5,
//!     ..Default::default()
//! };
//! let entries = fetch_all(&fetcher, &request, &CancellationToken::new()).await?;
//! for entry in filter_entries(&entries, "cobra", "github.com", true) {
//!     println!("{}", entry.path);
//! }
//! # Ok(())
//! # }
//! ```

mod entry;
mod error;
mod fetcher;
mod filter;
mod paginator;

pub use entry::{FetchRequest, IndexEntry};
pub use error::FetchError;
pub use fetcher::{HttpIndexFetcher, IndexFetcher, parse_entries};
pub use filter::{filter_entries, should_filter_by_site, unique_by_path};
pub use paginator::{drop_leading_duplicate, fetch_all};
