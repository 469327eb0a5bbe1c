//! `go-toolkit search`: find modules in the Go module index.
//!
//! The index has no server-side search, so this pages through the feed from
//! a starting timestamp and filters locally. Narrow the window with
//! `--since`, `--since-days` or `--since-hours`, and bound the work with
//! `--max-pages` / `--max-results`.

use anyhow::{Result, anyhow};
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::common::CommandContext;
use crate::constants::{DEFAULT_INDEX_URL, DEFAULT_SEARCH_LIMIT, INDEX_URL_ENV};
use crate::index::{
    FetchRequest, IndexEntry, IndexFetcher, fetch_all, filter_entries, should_filter_by_site,
    unique_by_path,
};
use crate::site::{allow_custom_site, resolve_site, validate_site};

/// Search the module index.
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Text to look for in module paths
    query: String,

    /// Restrict results to a module site
    #[arg(long)]
    site: Option<String>,

    /// Oldest timestamp (RFC3339) to include
    #[arg(long, default_value = "")]
    since: String,

    /// Days before now to start from
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    since_days: i64,

    /// Hours before now to start from
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    since_hours: i64,

    /// Page size requested from the index
    #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT, allow_negative_numbers = true)]
    limit: i64,

    /// Stop after this many pages (0 = no limit)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    max_pages: i64,

    /// Stop after this many results (0 = no limit)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    max_results: i64,

    /// Include module versions the proxy has not cached
    #[arg(long)]
    include_all: bool,

    /// Allow a site outside the known providers
    #[arg(long)]
    full: bool,

    /// Show path, version and timestamp for every match
    #[arg(long)]
    details: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Module index base URL
    #[arg(long, env = INDEX_URL_ENV, default_value = DEFAULT_INDEX_URL)]
    index_url: String,
}

/// Matches plus the site filter that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub entries: Vec<IndexEntry>,
    /// Site the results were restricted to, when the site filter applied
    pub filtered_to: Option<String>,
}

impl SearchCommand {
    /// Index base URL selected by `--index-url` or the environment.
    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    pub async fn execute<F: IndexFetcher>(
        self,
        ctx: &CommandContext,
        fetcher: &F,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let results = self.search(ctx, fetcher, cancel, Utc::now()).await?;
        for line in self.render(&results)? {
            println!("{line}");
        }
        Ok(())
    }

    /// Validate flags, page through the index and filter the results.
    pub async fn search<F: IndexFetcher>(
        &self,
        ctx: &CommandContext,
        fetcher: &F,
        cancel: &CancellationToken,
        now: DateTime<Utc>,
    ) -> Result<SearchResults> {
        let request = self.fetch_request(now)?;

        let flag = self.site.as_deref();
        let site = resolve_site(flag, &ctx.config);
        validate_site(&site, allow_custom_site(self.full, flag, &ctx.config))?;

        info!("search: fetching index entries since '{}'", request.since);
        let entries = fetch_all(fetcher, &request, cancel).await?;

        let query = self.query.trim();
        let use_site_filter = should_filter_by_site(query);
        let matches = filter_entries(&entries, query, &site, use_site_filter);
        info!("search: {} of {} entries matched", matches.len(), entries.len());

        Ok(SearchResults {
            entries: if self.details { matches } else { unique_by_path(matches) },
            filtered_to: (use_site_filter && !site.is_empty()).then_some(site),
        })
    }

    /// Output lines for `results` in the selected format.
    pub fn render(&self, results: &SearchResults) -> Result<Vec<String>> {
        if self.json {
            return Ok(vec![serde_json::to_string(&results.entries)?]);
        }

        let mut lines = Vec::with_capacity(results.entries.len() + 1);
        if let Some(site) = &results.filtered_to {
            lines.push(format!("filtering to {site}"));
        }
        lines.extend(results.entries.iter().map(|entry| {
            if self.details {
                format!("{}\t{}\t{}", entry.path, entry.version, entry.timestamp)
            } else {
                entry.path.clone()
            }
        }));
        Ok(lines)
    }

    fn fetch_request(&self, now: DateTime<Utc>) -> Result<FetchRequest> {
        let mut since = self.since.trim().to_string();

        if !since.is_empty() && (self.since_days > 0 || self.since_hours > 0) {
            return Err(anyhow!("since cannot be combined with since-days or since-hours"));
        }
        if self.since_days < 0 || self.since_hours < 0 {
            return Err(anyhow!("since-days and since-hours must be non-negative"));
        }
        if since.is_empty() && self.since_days > 0 && self.since_hours > 0 {
            return Err(anyhow!("since-days and since-hours cannot both be set"));
        }

        if since.is_empty() && self.since_days > 0 {
            since = rfc3339_before(now, TimeDelta::try_days(self.since_days))?;
        }
        if since.is_empty() && self.since_hours > 0 {
            since = rfc3339_before(now, TimeDelta::try_hours(self.since_hours))?;
        }

        if !since.is_empty() {
            DateTime::parse_from_rfc3339(&since).map_err(|e| anyhow!("since must be RFC3339: {e}"))?;
        }

        if self.max_pages < 0 || self.max_results < 0 {
            return Err(anyhow!("max-pages and max-results must be non-negative"));
        }
        if self.max_pages > 0 && self.limit <= 0 {
            return Err(anyhow!("max-pages requires a positive limit"));
        }

        Ok(FetchRequest {
            since,
            limit: self.limit,
            include_all: self.include_all,
            max_pages: self.max_pages,
            max_results: self.max_results,
        })
    }
}

fn rfc3339_before(now: DateTime<Utc>, delta: Option<TimeDelta>) -> Result<String> {
    let start = delta
        .and_then(|delta| now.checked_sub_signed(delta))
        .ok_or_else(|| anyhow!("since window is out of range"))?;
    Ok(start.to_rfc3339_opts(SecondsFormat::Secs, true))
}
