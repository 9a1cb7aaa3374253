//! Environment-derived default values.
//!
//! The composition root historically seeded a handful of parameters from
//! the process environment: the project root from the working directory and
//! a display title from the host name. These helpers keep those reads in
//! one place; the builder applies them only for keys the caller left unset.

use std::env;

use crate::error::{Error, Result};
use crate::normalize::normalize_path;

/// Fallback title used when no host name is available.
pub const DEFAULT_TITLE: &str = "Development Environment";

/// The project root derived from the current working directory, normalized.
///
/// # Errors
///
/// Returns an error if the working directory cannot be determined or is not
/// valid UTF-8.
///
/// # Examples
///
/// ```
/// use pathfinder::environment::project_root;
///
/// let root = project_root().unwrap();
/// assert!(!root.ends_with('/') || root.len() == 1);
/// ```
pub fn project_root() -> Result<String> {
    let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
        path: ".".to_string(),
        reason: format!("cannot get current directory: {e}"),
    })?;
    let cwd = cwd.to_str().ok_or_else(|| Error::InvalidPath {
        path: cwd.to_string_lossy().into_owned(),
        reason: "current directory contains invalid UTF-8".to_string(),
    })?;
    normalize_path(cwd)
}

/// A display title derived from the host name.
///
/// Reads `HOSTNAME`, then `COMPUTERNAME`, falling back to
/// [`DEFAULT_TITLE`].
#[must_use]
pub fn host_title() -> String {
    env::var("HOSTNAME")
        .or_else(|_| env::var("COMPUTERNAME"))
        .unwrap_or_else(|_| DEFAULT_TITLE.to_string())
}
