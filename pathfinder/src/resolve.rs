//! Placeholder scanning and expansion.
//!
//! A raw value may reference other keys with `%name%` tokens. This module
//! splits a value into literal and placeholder segments and substitutes each
//! token with the referenced entry's fully resolved value, supplied by a
//! lookup callback. Recursion and cycle detection live with the caller (the
//! registry), which owns the per-request visited stack.

use crate::error::{Error, Result};

/// The placeholder marker character, on both sides of a token.
pub const MARKER: char = '%';

/// A piece of a raw value: either literal text or a placeholder token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Verbatim text, copied through unchanged.
    Literal(&'a str),
    /// A `%token%` reference to another key, without the markers.
    Placeholder(&'a str),
}

/// Split a raw value into literal and placeholder segments.
///
/// An unterminated marker and the empty token `%%` carry no reference and
/// are kept as literal text.
///
/// # Examples
///
/// ```
/// use pathfinder::resolve::{segments, Segment};
///
/// let parts = segments("%dir.root%/assets");
/// assert_eq!(parts, vec![
///     Segment::Placeholder("dir.root"),
///     Segment::Literal("/assets"),
/// ]);
/// ```
#[must_use]
pub fn segments(value: &str) -> Vec<Segment<'_>> {
    let mut parts = Vec::new();
    let mut rest = value;

    while let Some(start) = rest.find(MARKER) {
        let after = &rest[start + 1..];
        match after.find(MARKER) {
            Some(len) if len > 0 => {
                if start > 0 {
                    parts.push(Segment::Literal(&rest[..start]));
                }
                parts.push(Segment::Placeholder(&after[..len]));
                rest = &after[len + 1..];
            }
            Some(_) => {
                // "%%": literal, no token between the markers.
                parts.push(Segment::Literal(&rest[..start + 2]));
                rest = &rest[start + 2..];
            }
            None => {
                // Unterminated marker; the remainder is literal.
                parts.push(Segment::Literal(rest));
                rest = "";
                break;
            }
        }
    }

    if !rest.is_empty() {
        parts.push(Segment::Literal(rest));
    }

    parts
}

/// Check whether a value contains at least one placeholder token.
///
/// # Examples
///
/// ```
/// use pathfinder::resolve::has_placeholder;
///
/// assert!(has_placeholder("%dir.root%/assets"));
/// assert!(!has_placeholder("/srv/app"));
/// assert!(!has_placeholder("100% literal"));
/// ```
#[must_use]
pub fn has_placeholder(value: &str) -> bool {
    segments(value)
        .iter()
        .any(|s| matches!(s, Segment::Placeholder(_)))
}

/// Expand every placeholder in `value` through a lookup callback.
///
/// The callback receives the token and returns the referenced entry's fully
/// resolved value, `Ok(None)` when the token names no resolvable entry, or
/// an error (for example a cycle detected further down the chain). Sibling
/// tokens are resolved independently, left to right; a value with no tokens
/// is returned unchanged.
///
/// # Errors
///
/// Returns [`Error::UnknownReference`] naming the token and `referenced_by`
/// when the callback yields `Ok(None)`, or whatever error the callback
/// itself produced.
///
/// # Examples
///
/// ```
/// use pathfinder::resolve::expand;
///
/// let expanded = expand("%dir.root%/assets", "dir.assets", &mut |token| {
///     Ok((token == "dir.root").then(|| "/srv/app".to_string()))
/// })
/// .unwrap();
/// assert_eq!(expanded, "/srv/app/assets");
/// ```
pub fn expand<F>(value: &str, referenced_by: &str, lookup: &mut F) -> Result<String>
where
    F: FnMut(&str) -> Result<Option<String>>,
{
    let mut out = String::with_capacity(value.len());

    for segment in segments(value) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(token) => match lookup(token)? {
                Some(resolved) => out.push_str(&resolved),
                None => {
                    return Err(Error::UnknownReference {
                        token: token.to_string(),
                        referenced_by: referenced_by.to_string(),
                    });
                }
            },
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn map_lookup<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl FnMut(&str) -> Result<Option<String>> + 'a {
        move |token| Ok(map.get(token).map(|s| (*s).to_string()))
    }

    #[test]
    fn test_segments_plain_value() {
        assert_eq!(segments("/srv/app"), vec![Segment::Literal("/srv/app")]);
    }

    #[test]
    fn test_segments_single_token() {
        assert_eq!(
            segments("%dir.root%"),
            vec![Segment::Placeholder("dir.root")]
        );
    }

    #[test]
    fn test_segments_token_with_suffix() {
        assert_eq!(
            segments("%dir.root%/assets"),
            vec![Segment::Placeholder("dir.root"), Segment::Literal("/assets")]
        );
    }

    #[test]
    fn test_segments_multiple_tokens() {
        assert_eq!(
            segments("%scheme%://%host%/x"),
            vec![
                Segment::Placeholder("scheme"),
                Segment::Literal("://"),
                Segment::Placeholder("host"),
                Segment::Literal("/x"),
            ]
        );
    }

    #[test]
    fn test_segments_unterminated_marker_is_literal() {
        assert_eq!(
            segments("100% literal"),
            vec![Segment::Literal("100% literal")]
        );
    }

    #[test]
    fn test_segments_empty_token_is_literal() {
        assert_eq!(
            segments("100%% done"),
            vec![Segment::Literal("100%%"), Segment::Literal(" done")]
        );
    }

    #[test]
    fn test_has_placeholder() {
        assert!(has_placeholder("%a%"));
        assert!(has_placeholder("x%a%y"));
        assert!(!has_placeholder(""));
        assert!(!has_placeholder("x"));
        assert!(!has_placeholder("50%"));
    }

    #[test]
    fn test_expand_no_tokens_unchanged() {
        let map = HashMap::new();
        let result = expand("/srv/app", "k", &mut map_lookup(&map)).unwrap();
        assert_eq!(result, "/srv/app");
    }

    #[test]
    fn test_expand_substitutes_resolved_value() {
        let mut map = HashMap::new();
        map.insert("dir.root", "/srv/app");
        let result = expand("%dir.root%/assets", "dir.assets", &mut map_lookup(&map)).unwrap();
        assert_eq!(result, "/srv/app/assets");
    }

    #[test]
    fn test_expand_sibling_tokens_independent() {
        let mut map = HashMap::new();
        map.insert("a", "left");
        map.insert("b", "right");
        let result = expand("%a%-%b%", "k", &mut map_lookup(&map)).unwrap();
        assert_eq!(result, "left-right");
    }

    #[test]
    fn test_expand_unknown_reference() {
        let map = HashMap::new();
        let err = expand("%dir.gone%/x", "dir.assets", &mut map_lookup(&map)).unwrap_err();
        match err {
            Error::UnknownReference {
                token,
                referenced_by,
            } => {
                assert_eq!(token, "dir.gone");
                assert_eq!(referenced_by, "dir.assets");
            }
            other => panic!("expected UnknownReference, got {other}"),
        }
    }

    #[test]
    fn test_expand_propagates_lookup_error() {
        let mut failing = |_: &str| -> Result<Option<String>> {
            Err(Error::Cycle {
                chain: vec!["a".to_string(), "a".to_string()],
            })
        };
        let err = expand("%a%", "a", &mut failing).unwrap_err();
        assert!(err.is_cycle());
    }
}
