//! Global constants used throughout the go-toolkit codebase.
//!
//! Site defaults, index endpoints, retry parameters and file names that are
//! shared by several modules live here so they can be found in one place.

use std::time::Duration;

/// Site substituted whenever neither a flag nor the config names one.
pub const DEFAULT_SITE: &str = "github.com";

/// Hosting providers accepted without `--full`.
///
/// Order matters: it is the order used when listing the known set in
/// error messages.
pub const KNOWN_SITES: [&str; 3] = ["github.com", "gitlab.com", "bitbucket.org"];

/// Base URL of the public Go module index.
pub const DEFAULT_INDEX_URL: &str = "https://index.golang.org";

/// Environment variable that overrides [`DEFAULT_INDEX_URL`].
pub const INDEX_URL_ENV: &str = "GO_TOOLKIT_INDEX_URL";

/// Page size used by `search` when `--limit` is not given.
pub const DEFAULT_SEARCH_LIMIT: i64 = 200;

/// Number of retries the index client performs after the first attempt.
pub const INDEX_RETRY_COUNT: usize = 3;

/// Starting delay for exponential backoff between index retries (200ms).
///
/// Doubles on each retry attempt.
pub const INDEX_BACKOFF_BASE_MS: u64 = 200;

/// Maximum backoff delay between index retries (2 seconds).
pub const INDEX_MAX_BACKOFF: Duration = Duration::from_secs(2);

/// Per-request timeout for the index client.
pub const INDEX_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// File name of the persisted configuration.
pub const CONFIG_FILE_NAME: &str = "gtk-config.toml";

/// Directory below the platform config dir holding [`CONFIG_FILE_NAME`].
pub const CONFIG_DIR_NAME: &str = "go-toolkit";

/// Credential file consulted for the default site when no provider mapping exists.
pub const DEFAULT_CREDENTIAL_FILE: &str = ".gitconfig";
