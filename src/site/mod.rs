//! Hosting-site validation and resolution.
//!
//! A site is the hostname prefix of a module path (`github.com` in
//! `github.com/acme/tool`). Shape validation is shared by the path resolver,
//! which only needs the shape, and by the commands, which additionally check
//! the site against [`KNOWN_SITES`] unless the user opts out with `--full`.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ToolkitConfig;
use crate::constants::{DEFAULT_SITE, KNOWN_SITES};
use crate::core::ToolkitError;

/// Hostname shape: no whitespace, an internal dot, no leading or trailing dot.
static SITE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s.][^\s]*\.[^\s]*[^\s.]$").unwrap_or_else(|e| panic!("invalid site pattern: {e}"))
});

/// Returns true when `site` (after trimming) is hostname-shaped.
///
/// An empty string is not a valid site here; callers that treat empty as
/// "use the default" must check for it first.
#[must_use]
pub fn is_valid_site(site: &str) -> bool {
    SITE_PATTERN.is_match(site.trim())
}

/// Returns true when `site` is one of the built-in hosting providers.
#[must_use]
pub fn is_known_site(site: &str) -> bool {
    let site = site.trim();
    KNOWN_SITES.iter().any(|known| *known == site)
}

/// The known sites in display order.
#[must_use]
pub fn known_sites() -> Vec<String> {
    KNOWN_SITES.iter().map(ToString::to_string).collect()
}

/// Validate a site for use by a command.
///
/// - empty (after trimming) is accepted, the caller substitutes a default
/// - a malformed site is [`ToolkitError::InvalidSiteFormat`]
/// - a well-formed site outside the known set is
///   [`ToolkitError::UnsupportedSite`] unless `allow_override` is set
pub fn validate_site(site: &str, allow_override: bool) -> Result<(), ToolkitError> {
    let trimmed = site.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    if !is_valid_site(trimmed) {
        return Err(ToolkitError::InvalidSiteFormat {
            site: trimmed.to_string(),
        });
    }

    if allow_override || is_known_site(trimmed) {
        return Ok(());
    }

    Err(ToolkitError::UnsupportedSite {
        site: trimmed.to_string(),
        known: known_sites(),
    })
}

/// Short provider name used to look up a credential mapping for `site`.
///
/// The three known hosts map to `github`, `gitlab` and `bitbucket`; any other
/// site maps to itself.
#[must_use]
pub fn provider_name_for_site(site: &str) -> String {
    match site.trim() {
        "github.com" => "github".to_string(),
        "gitlab.com" => "gitlab".to_string(),
        "bitbucket.org" => "bitbucket".to_string(),
        other => other.to_string(),
    }
}

/// Pick the effective site: flag, then configured site, then [`DEFAULT_SITE`].
#[must_use]
pub fn resolve_site(flag: Option<&str>, config: &ToolkitConfig) -> String {
    if let Some(site) = flag.map(str::trim).filter(|s| !s.is_empty()) {
        return site.to_string();
    }

    let configured = config.site.trim();
    if !configured.is_empty() {
        return configured.to_string();
    }

    DEFAULT_SITE.to_string()
}

/// Whether a site outside the known set may be used.
///
/// `--full` always allows it. A site that came from the config file (no
/// `--site` flag) was already accepted when it was stored, so it is allowed too.
#[must_use]
pub fn allow_custom_site(full: bool, flag: Option<&str>, config: &ToolkitConfig) -> bool {
    let flag_given = flag.is_some_and(|s| !s.trim().is_empty());
    full || (!flag_given && !config.site.trim().is_empty())
}
