//! Error formatting utilities for go-toolkit
//!
//! Converts internal errors into clear, actionable messages for the CLI.

use super::{ErrorContext, ToolkitError};
use crate::constants::KNOWN_SITES;
use crate::index::FetchError;

/// Keywords that indicate network-related errors
const NETWORK_ERROR_KEYWORDS: &[&str] = &["network", "connection", "timed out", "dns"];

/// Minimum Jaro-Winkler similarity for a "did you mean" hint.
const SITE_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Convert any error into a user-friendly format with contextual suggestions.
///
/// The whole cause chain is searched for a [`ToolkitError`] (or a bare
/// [`FetchError`]) so errors wrapped with `anyhow` context still get
/// their specific guidance.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let mut current_error: &dyn std::error::Error = error.as_ref();
    loop {
        if let Some(toolkit_error) = current_error.downcast_ref::<ToolkitError>() {
            return create_error_context(toolkit_error);
        }

        if let Some(fetch_error) = current_error.downcast_ref::<FetchError>() {
            return create_error_context(&ToolkitError::Fetch(fetch_error.clone()));
        }

        match current_error.source() {
            Some(source) => current_error = source,
            None => break,
        }
    }

    let error_msg = format!("{error:#}");

    if NETWORK_ERROR_KEYWORDS.iter().any(|&keyword| error_msg.to_lowercase().contains(keyword)) {
        return ErrorContext::new(ToolkitError::Other {
            message: error_msg,
        })
        .with_suggestion("Check your internet connection and try again");
    }

    ErrorContext::new(ToolkitError::Other {
        message: error_msg,
    })
}

/// Attach suggestions and details for a specific [`ToolkitError`].
pub(crate) fn create_error_context(error: &ToolkitError) -> ErrorContext {
    let context = ErrorContext::new(error.clone());
    match error {
        ToolkitError::MissingUser => context
            .with_suggestion("Run 'go-toolkit config set-user <user>' or pass --user")
            .with_details(
                "A single-segment package name needs a user; none was given, configured, or found in a credential file",
            ),

        ToolkitError::InvalidSiteFormat {
            ..
        } => context.with_suggestion("Use a hostname such as 'github.com' or 'gitlab.com'"),

        ToolkitError::UnsupportedSite {
            site,
            ..
        } => match closest_known_site(site) {
            Some(candidate) => context.with_suggestion(format!(
                "Did you mean '{candidate}'? Pass --full to use '{site}' anyway"
            )),
            None => context.with_suggestion(format!("Pass --full to use '{site}' anyway")),
        },

        ToolkitError::CredentialFile {
            path,
            ..
        } => context
            .with_suggestion("Fix the file, or remove the mapping with 'go-toolkit config provider remove --name <name>'")
            .with_details(format!(
                "{} is referenced by a provider mapping in your configuration",
                path.display()
            )),

        ToolkitError::ToolNotFound {
            program,
        } => context.with_suggestion(if program == "go" {
            "Install Go from https://go.dev/dl/ and make sure 'go' is on your PATH".to_string()
        } else {
            format!("Install '{program}' and make sure it is on your PATH")
        }),

        ToolkitError::ConfigError {
            ..
        }
        | ToolkitError::TomlError(_) => context
            .with_suggestion("Inspect the file with 'go-toolkit config show' or recreate it with 'go-toolkit config init'"),

        ToolkitError::Fetch(FetchError::Status {
            status,
            ..
        }) if *status >= 500 => context
            .with_suggestion("The module index is having trouble; try again later")
            .with_details("Server errors are retried automatically before giving up"),

        ToolkitError::Fetch(FetchError::Transport {
            ..
        }) => context.with_suggestion(
            "Check your internet connection, or point --index-url at a reachable index",
        ),

        _ => context,
    }
}

fn closest_known_site(site: &str) -> Option<&'static str> {
    let site = site.to_lowercase();
    KNOWN_SITES
        .iter()
        .map(|known| (*known, strsim::jaro_winkler(&site, known)))
        .filter(|(_, score)| *score >= SITE_SIMILARITY_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(known, _)| known)
}
