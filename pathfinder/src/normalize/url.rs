//! URL normalization functions.
//!
//! Canonicalizes `scheme://host...` strings: scheme and authority are
//! lower-cased, duplicate slashes in the path portion collapse, and a bare
//! origin carries exactly one trailing slash. Path, query, and fragment
//! casing is never altered.

/// Normalize a URL string.
///
/// Values without a `scheme://` marker pass through unchanged; this is a
/// pure function and performs no network access.
///
/// # Examples
///
/// ```
/// use pathfinder::normalize::normalize_url;
///
/// assert_eq!(normalize_url("HTTP://Example.COM/"), "http://example.com/");
/// assert_eq!(normalize_url("https://Example.com"), "https://example.com/");
/// assert_eq!(
///     normalize_url("https://example.com//a//b/CaSe"),
///     "https://example.com/a/b/CaSe"
/// );
/// ```
#[must_use]
pub fn normalize_url(value: &str) -> String {
    let Some((scheme, rest)) = value.split_once("://") else {
        return value.to_string();
    };

    // Authority runs to the first of '/', '?', or '#'.
    let authority_end = rest
        .find(['/', '?', '#'])
        .unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);

    let scheme = scheme.to_ascii_lowercase();
    let authority = authority.to_ascii_lowercase();

    // Split the tail into path and the query/fragment remainder, which is
    // copied through verbatim.
    let path_end = tail.find(['?', '#']).unwrap_or(tail.len());
    let (path, suffix) = tail.split_at(path_end);

    let path = collapse_slashes(path);
    if path.is_empty() && suffix.is_empty() {
        // Bare origin: exactly one trailing slash.
        return format!("{scheme}://{authority}/");
    }

    format!("{scheme}://{authority}{path}{suffix}")
}

/// Collapse runs of `/` into a single separator.
///
/// A path consisting only of slashes collapses to empty so the bare-origin
/// policy applies.
fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !prev_slash {
                out.push(c);
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    if out == "/" {
        return String::new();
    }
    out
}
