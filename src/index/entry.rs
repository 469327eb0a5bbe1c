//! Index record and request types.

use serde::{Deserialize, Serialize};

use super::FetchError;

/// One line of the module index feed.
///
/// Equality is structural: two entries are the same record only when path,
/// version and timestamp all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Module path
    #[serde(rename = "Path")]
    pub path: String,
    /// Module version
    #[serde(rename = "Version")]
    pub version: String,
    /// RFC3339 time the version was indexed
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

impl IndexEntry {
    /// Convenience constructor.
    pub fn new(
        path: impl Into<String>,
        version: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Parameters for a pagination run and for each page request.
///
/// Numeric fields use `0` for "not set", matching the query-string encoding:
/// a non-positive `limit` is omitted from the request, and zero caps mean
/// "no cap".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchRequest {
    /// Inclusive lower bound (RFC3339); empty for "from the beginning"
    pub since: String,
    /// Page size requested from the index
    pub limit: i64,
    /// Include versions not yet fetched by the proxy (`include=all`)
    pub include_all: bool,
    /// Maximum number of pages to fetch, `0` for unlimited
    pub max_pages: i64,
    /// Maximum number of entries to return, `0` for unlimited
    pub max_results: i64,
}

impl FetchRequest {
    /// Reject negative caps.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.max_pages < 0 || self.max_results < 0 {
            return Err(FetchError::InvalidRequest {
                message: "max pages and max results must be non-negative".to_string(),
            });
        }
        Ok(())
    }

    /// Result cap as a length, if one is set.
    #[must_use]
    pub fn result_cap(&self) -> Option<usize> {
        usize::try_from(self.max_results).ok().filter(|cap| *cap > 0)
    }

    /// Page cap, if one is set.
    #[must_use]
    pub fn page_cap(&self) -> Option<usize> {
        usize::try_from(self.max_pages).ok().filter(|cap| *cap > 0)
    }
}
