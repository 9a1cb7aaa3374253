//! Path normalization functions.
//!
//! This module canonicalizes path strings by:
//! - Expanding tilde (~) to the home directory
//! - Converting all separators to `/`
//! - Collapsing repeated separators
//! - Resolving `.` and `..` segments
//! - Stripping a trailing separator (except for a root path)
//!
//! Relative paths stay relative; the registry, not the normalizer, enforces
//! "must be absolute" where a caller requires it.

use crate::error::{Error, Result};

/// Expand a leading tilde (~) to the home directory.
///
/// Handles `~` and `~/path` but not `~user` syntax.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined, contains
/// invalid UTF-8, or the value uses `~user` syntax.
///
/// # Examples
///
/// ```
/// use pathfinder::normalize::path::expand_tilde;
///
/// let expanded = expand_tilde("~/project").unwrap();
/// assert!(expanded.ends_with("/project"));
/// assert!(!expanded.starts_with('~'));
///
/// // Values without a leading tilde pass through unchanged.
/// assert_eq!(expand_tilde("/absolute").unwrap(), "/absolute");
/// ```
pub fn expand_tilde(value: &str) -> Result<String> {
    if !value.starts_with('~') {
        return Ok(value.to_string());
    }

    // Home directory from the home crate, as an environment read only.
    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: value.to_string(),
        reason: "cannot determine home directory".to_string(),
    })?;
    let home = home.to_str().ok_or_else(|| Error::InvalidPath {
        path: value.to_string(),
        reason: "home directory contains invalid UTF-8".to_string(),
    })?;

    if value == "~" {
        Ok(home.to_string())
    } else if value.starts_with("~/") || value.starts_with("~\\") {
        Ok(format!("{home}/{}", &value[2..]))
    } else {
        Err(Error::InvalidPath {
            path: value.to_string(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Split off a Windows drive prefix such as `C:`, if present.
fn split_drive(value: &str) -> (Option<&str>, &str) {
    let bytes = value.as_bytes();
    if bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'/' || bytes[2] == b'\\')
    {
        (Some(&value[..2]), &value[2..])
    } else {
        (None, value)
    }
}

/// Normalize a path string.
///
/// Separators unify to `/`, repeated separators collapse, `.` segments
/// drop, and `..` pops the preceding segment. A trailing separator is
/// stripped except for the root itself. Leading `..` segments on a relative
/// path are preserved.
///
/// # Errors
///
/// Returns an error if tilde expansion fails or an absolute path contains
/// enough `..` segments to escape its root.
///
/// # Examples
///
/// ```
/// use pathfinder::normalize::normalize_path;
///
/// assert_eq!(normalize_path("/srv//app/./x/").unwrap(), "/srv/app/x");
/// assert_eq!(normalize_path("C:\\Users\\dev\\").unwrap(), "C:/Users/dev");
/// assert_eq!(normalize_path("/a/b/../c").unwrap(), "/a/c");
/// assert_eq!(normalize_path("var/cache").unwrap(), "var/cache");
/// assert_eq!(normalize_path("/").unwrap(), "/");
/// ```
pub fn normalize_path(value: &str) -> Result<String> {
    let expanded = expand_tilde(value)?;
    if expanded.is_empty() {
        return Ok(expanded);
    }

    let (drive, rest) = split_drive(&expanded);
    let unified = rest.replace('\\', "/");
    let absolute = drive.is_some() || unified.starts_with('/');

    let mut stack: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            // Empty segments come from repeated or trailing separators.
            "" | "." => {}
            ".." => {
                if matches!(stack.last(), Some(&s) if s != "..") {
                    stack.pop();
                } else if absolute {
                    return Err(Error::InvalidPath {
                        path: value.to_string(),
                        reason: "too many '..' segments (escapes root)".to_string(),
                    });
                } else {
                    stack.push("..");
                }
            }
            normal => stack.push(normal),
        }
    }

    let joined = stack.join("/");
    let result = match (drive, absolute) {
        (Some(d), _) => format!("{d}/{joined}"),
        (None, true) => format!("/{joined}"),
        (None, false) if joined.is_empty() => ".".to_string(),
        (None, false) => joined,
    };

    Ok(result)
}
