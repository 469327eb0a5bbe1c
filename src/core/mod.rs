//! Core types for go-toolkit
//!
//! This module holds the error vocabulary shared by every other module:
//! - [`ToolkitError`] - typed failures for validation, credentials, config,
//!   the module index and external commands
//! - [`ErrorContext`] - a user-facing wrapper with suggestion and details
//! - [`user_friendly_error`] - turns any `anyhow::Error` into an [`ErrorContext`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use go_toolkit::core::{ToolkitError, user_friendly_error};
//!
//! fn resolve() -> anyhow::Result<String> {
//!     Err(ToolkitError::MissingUser.into())
//! }
//!
//! if let Err(e) = resolve() {
//!     user_friendly_error(e).display();
//! }
//! ```

pub mod error;
mod error_formatting;

pub use error::{ErrorContext, ToolkitError};
pub use error_formatting::user_friendly_error;
