//! Module path resolution.
//!
//! Turns the short identifiers people type (`tool`, `acme/tool`) into the
//! fully qualified module paths the Go toolchain expects
//! (`github.com/lou/tool`, `github.com/acme/tool`). Already-qualified paths
//! pass through untouched.
//!
//! # Grammar
//!
//! | Segments | Rule |
//! |---|---|
//! | 1 | `site/user/name`, needs a user and a hostname-shaped site |
//! | 2 | `site/owner/name`, needs a hostname-shaped site |
//! | 3 | returned as-is |
//! | 4+ | returned as-is when the first segment contains a dot, otherwise rejected |
//!
//! The resolver only checks the site's shape. Whether the site is one of the
//! known providers is the caller's business (see [`crate::site::validate_site`]).

use crate::constants::DEFAULT_SITE;
use crate::core::ToolkitError;
use crate::site::is_valid_site;

/// Resolve `identifier` into a full module path.
///
/// # Errors
///
/// - [`ToolkitError::InvalidInput`] for an empty identifier, an empty
///   segment, or four or more segments without a dotted first segment
/// - [`ToolkitError::MissingUser`] for a one-segment identifier when `user`
///   is empty; this is checked before the site
/// - [`ToolkitError::InvalidSiteFormat`] when a one- or two-segment
///   identifier needs `site` and it is not hostname-shaped
///
/// # Examples
///
/// ```rust
/// use go_toolkit::packagepath::resolve_module_path;
///
/// assert_eq!(resolve_module_path("tool", "github.com", "lou").unwrap(), "github.com/lou/tool");
/// assert_eq!(resolve_module_path("acme/tool", "gitlab.com", "").unwrap(), "gitlab.com/acme/tool");
/// assert_eq!(
///     resolve_module_path("github.com/onsi/ginkgo/v2", "anything", "").unwrap(),
///     "github.com/onsi/ginkgo/v2"
/// );
/// ```
pub fn resolve_module_path(identifier: &str, site: &str, user: &str) -> Result<String, ToolkitError> {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        return Err(ToolkitError::invalid_input("module path is required"));
    }

    let segments: Vec<&str> = trimmed.split('/').map(str::trim).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(ToolkitError::invalid_input("module path must not contain empty segments"));
    }

    match segments.as_slice() {
        [first, ..] if segments.len() >= 3 && first.contains('.') => Ok(segments.join("/")),
        // Three bare segments are accepted without a site check.
        [_, _, _] => Ok(segments.join("/")),
        [owner, name] => {
            ensure_site_shape(site)?;
            Ok(join_path(site, &[*owner, *name]))
        }
        [name] => {
            if user.trim().is_empty() {
                return Err(ToolkitError::MissingUser);
            }
            ensure_site_shape(site)?;
            Ok(join_path(site, &[user.trim(), *name]))
        }
        _ => Err(ToolkitError::invalid_input("module path must have 1 to 3 segments")),
    }
}

/// Replace runs of whitespace with a single underscore.
///
/// ```rust
/// use go_toolkit::packagepath::normalize_package_name;
///
/// assert_eq!(normalize_package_name("  multiple   spaces  "), "multiple_spaces");
/// ```
#[must_use]
pub fn normalize_package_name(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Drop an `@version` suffix, if any.
#[must_use]
pub fn strip_version(module_path: &str) -> &str {
    module_path.split_once('@').map_or(module_path, |(path, _)| path)
}

fn ensure_site_shape(site: &str) -> Result<(), ToolkitError> {
    if is_valid_site(site) {
        Ok(())
    } else {
        Err(ToolkitError::InvalidSiteFormat {
            site: site.trim().to_string(),
        })
    }
}

fn join_path(site: &str, parts: &[&str]) -> String {
    let site = match site.trim() {
        "" => DEFAULT_SITE,
        site => site,
    };

    std::iter::once(site).chain(parts.iter().copied()).collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_uses_user() {
        assert_eq!(resolve_module_path("tool", "github.com", "lou").unwrap(), "github.com/lou/tool");
    }

    #[test]
    fn test_owner_and_name_get_site() {
        assert_eq!(
            resolve_module_path("acme/tool", "github.com", "lou").unwrap(),
            "github.com/acme/tool"
        );
        assert_eq!(
            resolve_module_path("acme/tool", "git.corp.io", "").unwrap(),
            "git.corp.io/acme/tool"
        );
    }

    #[test]
    fn test_dotted_first_segment_passes_through() {
        assert_eq!(
            resolve_module_path("github.com/acme/tool/extra", "anything", "lou").unwrap(),
            "github.com/acme/tool/extra"
        );
        assert_eq!(
            resolve_module_path("github.com/onsi/ginkgo/v2", "github.com", "lou").unwrap(),
            "github.com/onsi/ginkgo/v2"
        );
        assert_eq!(
            resolve_module_path("go.uber.org/zap/a/b/c", "", "").unwrap(),
            "go.uber.org/zap/a/b/c"
        );
    }

    #[test]
    fn test_three_segments_accepted_without_site() {
        for (input, site) in [("4/r/7", "github.com"), ("a/b/c", "not a site"), ("x/y/z", "")] {
            assert_eq!(resolve_module_path(input, site, "").unwrap(), input);
        }
    }

    #[test]
    fn test_four_bare_segments_rejected() {
        let err = resolve_module_path("a/b/c/d", "github.com", "lou").unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), "module path must have 1 to 3 segments");
    }

    #[test]
    fn test_segments_are_trimmed() {
        assert_eq!(
            resolve_module_path("  acme / tool ", "github.com", "").unwrap(),
            "github.com/acme/tool"
        );
    }

    #[test]
    fn test_empty_input_and_segments() {
        let err = resolve_module_path("   ", "github.com", "lou").unwrap_err();
        assert_eq!(err.to_string(), "module path is required");

        for input in ["acme//tool", "/tool", "tool/", "a/ /c"] {
            let err = resolve_module_path(input, "github.com", "lou").unwrap_err();
            assert!(err.is_invalid_input(), "{input}: {err}");
        }
    }

    #[test]
    fn test_missing_user_precedes_site_check() {
        let err = resolve_module_path("tool", "githubcom", "").unwrap_err();
        assert!(err.is_missing_user());

        let err = resolve_module_path("tool", "github.com", "  ").unwrap_err();
        assert!(err.is_missing_user());
    }

    #[test]
    fn test_bad_site_shape() {
        let err = resolve_module_path("tool", "githubcom", "lou").unwrap_err();
        assert!(err.is_invalid_input());

        let err = resolve_module_path("acme/tool", ".github.com", "lou").unwrap_err();
        assert!(err.is_invalid_input());

        // Shape only: an unknown but well-formed site is fine here.
        assert!(resolve_module_path("acme/tool", "codeberg.org", "").is_ok());
    }

    #[test]
    fn test_two_segments_require_site() {
        let err = resolve_module_path("acme/tool", "", "lou").unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidSiteFormat { .. }));
    }

    #[test]
    fn test_version_suffix_kept_on_short_names() {
        assert_eq!(
            resolve_module_path("tool@v1.2.0", "github.com", "lou").unwrap(),
            "github.com/lou/tool@v1.2.0"
        );
    }

    #[test]
    fn test_normalize_package_name() {
        assert_eq!(normalize_package_name("my package"), "my_package");
        assert_eq!(normalize_package_name("  multiple   spaces  "), "multiple_spaces");
        assert_eq!(normalize_package_name("single"), "single");
        assert_eq!(normalize_package_name("   "), "");
    }

    #[test]
    fn test_strip_version() {
        assert_eq!(strip_version("github.com/acme/tool@v1.0.0"), "github.com/acme/tool");
        assert_eq!(strip_version("github.com/acme/tool"), "github.com/acme/tool");
    }
}
