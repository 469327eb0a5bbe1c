//! Error handling for go-toolkit
//!
//! Two layers, same as every command in the crate uses them:
//! - [`ToolkitError`] - typed failures raised by the resolution, config and
//!   index code, so callers can branch on the kind (most importantly
//!   [`ToolkitError::MissingUser`] versus a broken credential file).
//! - [`ErrorContext`] - a wrapper adding a suggestion and details for CLI display.
//!
//! Commands return [`anyhow::Result`]; `main` hands any failure to
//! [`user_friendly_error`](crate::core::user_friendly_error) which recovers the
//! typed error from the chain and attaches guidance.
//!
//! # Examples
//!
//! ```rust,no_run
//! use go_toolkit::core::{ErrorContext, ToolkitError};
//!
//! let context = ErrorContext::new(ToolkitError::MissingUser)
//!     .with_suggestion("Run 'go-toolkit config set-user <user>'");
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::index::FetchError;

/// The main error type for go-toolkit operations.
///
/// Validation outcomes (`InvalidInput`, `InvalidSiteFormat`, `UnsupportedSite`,
/// `MissingUser`) are produced locally and never retried. `CredentialFile` is
/// kept apart from `MissingUser` so a broken provider mapping is not reported
/// as an unregistered user.
#[derive(Error, Debug)]
pub enum ToolkitError {
    /// Malformed identifier or flag value
    #[error("{message}")]
    InvalidInput {
        /// Description of what was wrong with the input
        message: String,
    },

    /// Site is not hostname-shaped
    #[error("site must be in the form sitename.domain (got '{site}')")]
    InvalidSiteFormat {
        /// The rejected site
        site: String,
    },

    /// Site is well-formed but outside the known set and no override was given
    #[error("unsupported site {site} (known: {}); use --full to allow custom sites", .known.join(", "))]
    UnsupportedSite {
        /// The rejected site
        site: String,
        /// The accepted sites, in display order
        known: Vec<String>,
    },

    /// No user could be determined for a short identifier
    #[error("missing user")]
    MissingUser,

    /// A configured credential file exists in the mapping but cannot be used
    #[error("failed to read credential file {}: {reason}", .path.display())]
    CredentialFile {
        /// Path taken from the provider mapping
        path: PathBuf,
        /// Underlying read or parse failure
        reason: String,
    },

    /// Module index request failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Configuration file content is invalid
    #[error("configuration error: {message}")]
    ConfigError {
        /// What failed validation
        message: String,
    },

    /// External program is not on PATH
    #[error("'{program}' is not installed or not found in PATH")]
    ToolNotFound {
        /// Program that was looked up
        program: String,
    },

    /// External program exited unsuccessfully
    #[error("command failed: {command} (exit code {})", .code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl ToolkitError {
    /// Build an [`ToolkitError::InvalidInput`] from any message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// True for every malformed-input outcome, including site problems.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::InvalidSiteFormat { .. } | Self::UnsupportedSite { .. }
        )
    }

    /// True when the failure means no user is registered for the site.
    #[must_use]
    pub const fn is_missing_user(&self) -> bool {
        matches!(self, Self::MissingUser)
    }
}

impl Clone for ToolkitError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidInput {
                message,
            } => Self::InvalidInput {
                message: message.clone(),
            },
            Self::InvalidSiteFormat {
                site,
            } => Self::InvalidSiteFormat {
                site: site.clone(),
            },
            Self::UnsupportedSite {
                site,
                known,
            } => Self::UnsupportedSite {
                site: site.clone(),
                known: known.clone(),
            },
            Self::MissingUser => Self::MissingUser,
            Self::CredentialFile {
                path,
                reason,
            } => Self::CredentialFile {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::Fetch(e) => Self::Fetch(e.clone()),
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::ToolNotFound {
                program,
            } => Self::ToolNotFound {
                program: program.clone(),
            },
            Self::CommandFailed {
                command,
                code,
            } => Self::CommandFailed {
                command: command.clone(),
                code: *code,
            },
            // io::Error is not Clone; keep the message
            Self::Io(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::TomlError(e.clone()),
            Self::TomlSerError(e) => Self::TomlSerError(e.clone()),
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Suggestions are printed in green and details in yellow by
/// [`display`](ErrorContext::display).
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ToolkitError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: ToolkitError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}
