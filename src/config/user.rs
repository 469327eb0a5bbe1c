//! Resolution of the user substituted into one-segment package names.
//!
//! The user comes from the first source that knows one:
//!
//! 1. the `--user` flag
//! 2. `user` in the config file
//! 3. the credential file mapped to the site's provider (`[[providers]]`)
//! 4. `~/.gitconfig`, only for the default site and only when no mapping exists
//!
//! Each source is a [`UserSource`] tried in order by [`UserResolver`]. A source
//! either finds a user, reports it does not apply, or fails. A failure stops
//! the chain: a mapped credential file that cannot be read is a
//! [`ToolkitError::CredentialFile`], never [`ToolkitError::MissingUser`].

use std::path::{Path, PathBuf};

use super::ToolkitConfig;
use super::credentials::read_user_name;
use crate::constants::{DEFAULT_CREDENTIAL_FILE, DEFAULT_SITE};
use crate::core::ToolkitError;
use crate::site::provider_name_for_site;
use crate::utils::platform::{expand_path, get_home_dir};

/// Inputs shared by every source.
#[derive(Debug, Clone, Copy)]
pub struct UserQuery<'a> {
    /// Value of the `--user` flag, if given
    pub explicit: Option<&'a str>,
    /// Loaded configuration
    pub config: &'a ToolkitConfig,
    /// Site the package will be resolved against
    pub site: &'a str,
}

/// Outcome of a single source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    /// The source determined the user
    Found(String),
    /// The source has nothing to say for this query
    NotApplicable,
}

/// One step of the resolution chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSource {
    /// The `--user` flag
    Explicit,
    /// `user` from the config file
    Configured,
    /// Credential file mapped to the site's provider
    ProviderCredentials,
    /// Fallback credential file for the default site
    DefaultCredentials {
        /// File to read; `None` when no home directory could be determined
        path: Option<PathBuf>,
    },
}

impl UserSource {
    /// Try this source.
    pub fn lookup(&self, query: &UserQuery<'_>) -> Result<UserLookup, ToolkitError> {
        match self {
            Self::Explicit => Ok(found_if_present(query.explicit.unwrap_or_default())),
            Self::Configured => Ok(found_if_present(&query.config.user)),
            Self::ProviderCredentials => {
                let provider = provider_name_for_site(query.site);
                let Some(raw_path) = query.config.provider_path(&provider) else {
                    return Ok(UserLookup::NotApplicable);
                };

                let path = expand_path(raw_path).map_err(|e| ToolkitError::CredentialFile {
                    path: PathBuf::from(raw_path),
                    reason: format!("{e:#}"),
                })?;
                tracing::debug!("Reading user for provider '{provider}' from {}", path.display());

                match read_user_name(&path)? {
                    Some(user) => Ok(UserLookup::Found(user)),
                    None => Err(ToolkitError::MissingUser),
                }
            }
            Self::DefaultCredentials {
                path,
            } => {
                if query.site.trim() != DEFAULT_SITE {
                    return Ok(UserLookup::NotApplicable);
                }
                let provider = provider_name_for_site(query.site);
                if query.config.provider_path(&provider).is_some() {
                    return Ok(UserLookup::NotApplicable);
                }
                let Some(path) = path else {
                    return Ok(UserLookup::NotApplicable);
                };

                read_default_credentials(path)
            }
        }
    }
}

/// Ordered chain of [`UserSource`]s.
#[derive(Debug, Clone)]
pub struct UserResolver {
    sources: Vec<UserSource>,
}

impl UserResolver {
    /// The standard chain, falling back to `~/.gitconfig`.
    #[must_use]
    pub fn standard() -> Self {
        let default_path = get_home_dir().ok().map(|home| home.join(DEFAULT_CREDENTIAL_FILE));
        Self::with_default_credentials(default_path)
    }

    /// The standard chain with a custom fallback credential file.
    #[must_use]
    pub fn with_default_credentials(path: Option<PathBuf>) -> Self {
        Self::from_sources(vec![
            UserSource::Explicit,
            UserSource::Configured,
            UserSource::ProviderCredentials,
            UserSource::DefaultCredentials {
                path,
            },
        ])
    }

    /// A chain with arbitrary sources, tried in the given order.
    #[must_use]
    pub const fn from_sources(sources: Vec<UserSource>) -> Self {
        Self {
            sources,
        }
    }

    /// Resolve the user for `query`.
    ///
    /// # Errors
    ///
    /// [`ToolkitError::MissingUser`] when no source applies, or any error a
    /// source raised.
    pub fn resolve(&self, query: &UserQuery<'_>) -> Result<String, ToolkitError> {
        for source in &self.sources {
            if let UserLookup::Found(user) = source.lookup(query)? {
                tracing::debug!("User '{user}' resolved from {source:?}");
                return Ok(user);
            }
        }

        Err(ToolkitError::MissingUser)
    }
}

/// Resolve with the standard chain.
pub fn resolve_user(
    explicit: Option<&str>,
    config: &ToolkitConfig,
    site: &str,
) -> Result<String, ToolkitError> {
    UserResolver::standard().resolve(&UserQuery {
        explicit,
        config,
        site,
    })
}

fn found_if_present(value: &str) -> UserLookup {
    match value.trim() {
        "" => UserLookup::NotApplicable,
        user => UserLookup::Found(user.to_string()),
    }
}

fn read_default_credentials(path: &Path) -> Result<UserLookup, ToolkitError> {
    if !path.exists() {
        tracing::debug!("No default credential file at {}", path.display());
        return Err(ToolkitError::MissingUser);
    }

    match read_user_name(path)? {
        Some(user) => Ok(UserLookup::Found(user)),
        None => Err(ToolkitError::MissingUser),
    }
}
