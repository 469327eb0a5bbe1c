//! Single-page fetch capability and its HTTP binding.
//!
//! The paginator only sees [`IndexFetcher`]. [`HttpIndexFetcher`] talks to a
//! real index: `GET {base}/index?since=..&limit=..&include=all`, answered with
//! newline-delimited JSON records. Transient failures (transport errors, 5xx)
//! are retried here with bounded exponential backoff so the paginator never
//! has to.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use tokio_retry::RetryIf;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{FetchError, FetchRequest, IndexEntry};
use crate::constants::{
    DEFAULT_INDEX_URL, INDEX_BACKOFF_BASE_MS, INDEX_MAX_BACKOFF, INDEX_REQUEST_TIMEOUT,
    INDEX_RETRY_COUNT,
};

/// Fetches one page of index entries.
///
/// Implementations must honor `cancel`: once it fires, an in-flight fetch
/// should resolve to [`FetchError::Cancelled`].
pub trait IndexFetcher {
    /// Fetch the page described by `request` (`since`, `limit`, `include_all`).
    fn fetch(
        &self,
        request: &FetchRequest,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Vec<IndexEntry>, FetchError>> + Send;
}

/// HTTP client for the module index.
#[derive(Debug, Clone)]
pub struct HttpIndexFetcher {
    base_url: String,
    client: reqwest::Client,
    retries: usize,
    backoff_base: Duration,
}

impl HttpIndexFetcher {
    /// Client for `base_url` (for example `https://index.golang.org`).
    ///
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(INDEX_REQUEST_TIMEOUT)
            .user_agent(concat!("go-toolkit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            retries: INDEX_RETRY_COUNT,
            backoff_base: Duration::from_millis(INDEX_BACKOFF_BASE_MS),
        })
    }

    /// Client for the public index.
    pub fn public() -> anyhow::Result<Self> {
        Self::new(DEFAULT_INDEX_URL)
    }

    /// Override the retry count and first backoff delay.
    #[must_use]
    pub const fn with_retry_policy(mut self, retries: usize, backoff_base: Duration) -> Self {
        self.retries = retries;
        self.backoff_base = backoff_base;
        self
    }

    /// Endpoint the client requests.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/index", self.base_url)
    }

    fn retry_strategy(&self) -> impl Iterator<Item = Duration> {
        // Delays are factor * 2^n: base, 2*base, 4*base, ...
        let factor = u64::try_from(self.backoff_base.as_millis() / 2).unwrap_or(u64::MAX).max(1);
        ExponentialBackoff::from_millis(2)
            .factor(factor)
            .max_delay(INDEX_MAX_BACKOFF)
            .take(self.retries)
    }

    async fn fetch_once(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<Vec<IndexEntry>, FetchError> {
        debug!(target: "index", "GET {url} {query:?}");

        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).query(query).send().await.map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        parse_entries(&body)
    }
}

impl IndexFetcher for HttpIndexFetcher {
    async fn fetch(
        &self,
        request: &FetchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<IndexEntry>, FetchError> {
        let url = self.endpoint();
        let query = query_params(request);

        let attempt = RetryIf::start(
            self.retry_strategy(),
            || self.fetch_once(&url, &query),
            |e: &FetchError| {
                let retry = e.is_transient();
                if retry {
                    warn!(target: "index", "Retrying index request: {e}");
                }
                retry
            },
        );

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(FetchError::Cancelled),
            result = attempt => result,
        }
    }
}

/// Query string for one page request.
fn query_params(request: &FetchRequest) -> Vec<(&'static str, String)> {
    let mut query = Vec::with_capacity(3);
    if !request.since.is_empty() {
        query.push(("since", request.since.clone()));
    }
    if request.limit > 0 {
        query.push(("limit", request.limit.to_string()));
    }
    if request.include_all {
        query.push(("include", "all".to_string()));
    }
    query
}

/// Decode a newline-delimited JSON body, skipping blank lines.
pub fn parse_entries(body: &str) -> Result<Vec<IndexEntry>, FetchError> {
    body.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line.trim()).map_err(|e| FetchError::Decode {
                line: index + 1,
                message: e.to_string(),
            })
        })
        .collect()
}
