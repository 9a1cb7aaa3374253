//! Value classification.
//!
//! Each entry in the parameter map is classified once, at construction, as a
//! filesystem path, a URL, or an opaque scalar. Classification drives which
//! normalizer runs after placeholder expansion.
//!
//! The classifier is an explicit, ordered list of predicate rules so the
//! precedence between "key names a path namespace", "value carries a URL
//! scheme", and "value is shaped like a path" is documented and each rule is
//! independently testable. First matching rule wins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The derived tag of a parameter entry.
///
/// # Examples
///
/// ```
/// use pathfinder::{Classifier, Kind};
///
/// let classifier = Classifier::new();
/// assert_eq!(classifier.classify("dir.root", "/srv/app"), Kind::Path);
/// assert_eq!(classifier.classify("site.url", "https://example.com"), Kind::Url);
/// assert_eq!(classifier.classify("title", "My Site"), Kind::Opaque);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// The value denotes a filesystem path.
    Path,
    /// The value denotes a URL with a recognized scheme.
    Url,
    /// The value is passed through unresolved except for placeholder
    /// expansion.
    Opaque,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Url => write!(f, "url"),
            Self::Opaque => write!(f, "opaque"),
        }
    }
}

/// A single classification rule: a named predicate mapping to a [`Kind`].
///
/// Rules are evaluated in the order the classifier holds them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierRule {
    /// The key starts with a recognized path-denoting namespace
    /// (`dir.`, `path.` by default).
    PathKeyPrefix,
    /// The value parses as `scheme://host...` with a whitelisted scheme.
    UrlScheme,
    /// The value begins with a root marker (`/`, `\`, `~`, a drive prefix)
    /// or contains a path separator.
    PathShape,
}

/// Classifies raw values by an ordered rule list.
///
/// The default order is [`ClassifierRule::PathKeyPrefix`],
/// [`ClassifierRule::UrlScheme`], [`ClassifierRule::PathShape`]. The URL
/// rule must precede the shape rule because every URL contains `/`.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<ClassifierRule>,
    path_key_prefixes: Vec<String>,
    url_schemes: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            rules: vec![
                ClassifierRule::PathKeyPrefix,
                ClassifierRule::UrlScheme,
                ClassifierRule::PathShape,
            ],
            path_key_prefixes: vec!["dir.".to_string(), "path.".to_string()],
            url_schemes: vec!["http".to_string(), "https".to_string()],
        }
    }
}

impl Classifier {
    /// Create a classifier with the default rule order, key prefixes, and
    /// scheme whitelist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path-denoting key namespace prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfinder::{Classifier, Kind};
    ///
    /// let classifier = Classifier::new().with_path_key_prefix("asset.");
    /// assert_eq!(classifier.classify("asset.logo", "logo.svg"), Kind::Path);
    /// ```
    #[must_use]
    pub fn with_path_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_key_prefixes.push(prefix.into());
        self
    }

    /// Whitelist an additional URL scheme.
    ///
    /// Schemes are matched case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfinder::{Classifier, Kind};
    ///
    /// let classifier = Classifier::new().with_url_scheme("ftp");
    /// assert_eq!(classifier.classify("mirror", "ftp://host/pub"), Kind::Url);
    /// ```
    #[must_use]
    pub fn with_url_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.url_schemes.push(scheme.into().to_ascii_lowercase());
        self
    }

    /// The rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[ClassifierRule] {
        &self.rules
    }

    /// Classify a raw string value.
    ///
    /// Evaluates rules in order; the first match decides the kind, and a
    /// value matching no rule is [`Kind::Opaque`].
    #[must_use]
    pub fn classify(&self, key: &str, value: &str) -> Kind {
        for rule in &self.rules {
            if let Some(kind) = self.apply(*rule, key, value) {
                return kind;
            }
        }
        Kind::Opaque
    }

    /// Evaluate a single rule against a key/value pair.
    ///
    /// Exposed so each rule's predicate can be tested in isolation.
    #[must_use]
    pub fn apply(&self, rule: ClassifierRule, key: &str, value: &str) -> Option<Kind> {
        match rule {
            ClassifierRule::PathKeyPrefix => self
                .path_key_prefixes
                .iter()
                .any(|prefix| key.starts_with(prefix.as_str()))
                .then_some(Kind::Path),
            ClassifierRule::UrlScheme => self.has_whitelisted_scheme(value).then_some(Kind::Url),
            ClassifierRule::PathShape => looks_like_path(value).then_some(Kind::Path),
        }
    }

    /// Check whether the value starts with a whitelisted `scheme://`.
    fn has_whitelisted_scheme(&self, value: &str) -> bool {
        match url_scheme(value) {
            Some(scheme) => self
                .url_schemes
                .iter()
                .any(|s| s.eq_ignore_ascii_case(scheme)),
            None => false,
        }
    }
}

/// Extract the scheme of a `scheme://rest` string, if it is well-formed.
///
/// A scheme is an ASCII letter followed by letters, digits, `+`, `-`, or
/// `.`, and the part after `://` must be non-empty.
pub(crate) fn url_scheme(value: &str) -> Option<&str> {
    let (scheme, rest) = value.split_once("://")?;
    if rest.is_empty() || scheme.is_empty() {
        return None;
    }
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some(scheme)
    } else {
        None
    }
}

/// Check whether a string is shaped like a filesystem path.
pub(crate) fn looks_like_path(value: &str) -> bool {
    value.starts_with('/')
        || value.starts_with('\\')
        || value.starts_with('~')
        || has_drive_prefix(value)
        || value.contains('/')
        || value.contains('\\')
}

/// Check for a Windows drive prefix such as `C:\` or `C:/`.
fn has_drive_prefix(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'/' || bytes[2] == b'\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefix_beats_value_shape() {
        let classifier = Classifier::new();
        // An opaque-shaped value under a path namespace is still a path.
        assert_eq!(classifier.classify("dir.name", "assets"), Kind::Path);
        assert_eq!(classifier.classify("path.tmp", "tmp"), Kind::Path);
    }

    #[test]
    fn test_url_beats_path_shape() {
        let classifier = Classifier::new();
        // URLs contain '/' but must not be classified as paths.
        assert_eq!(
            classifier.classify("site.url", "https://example.com/a/b"),
            Kind::Url
        );
    }

    #[test]
    fn test_path_shapes() {
        let classifier = Classifier::new();
        assert_eq!(classifier.classify("k", "/srv/app"), Kind::Path);
        assert_eq!(classifier.classify("k", "~/projects"), Kind::Path);
        assert_eq!(classifier.classify("k", "C:\\Users\\dev"), Kind::Path);
        assert_eq!(classifier.classify("k", "var/cache"), Kind::Path);
        assert_eq!(classifier.classify("k", "\\\\share\\x"), Kind::Path);
    }

    #[test]
    fn test_opaque_values() {
        let classifier = Classifier::new();
        assert_eq!(classifier.classify("title", "My Site"), Kind::Opaque);
        assert_eq!(classifier.classify("env", "dev"), Kind::Opaque);
        assert_eq!(classifier.classify("debug", "true"), Kind::Opaque);
    }

    #[test]
    fn test_unlisted_scheme_is_not_url() {
        let classifier = Classifier::new();
        // "gopher" is not whitelisted; the value still contains '/', so the
        // shape rule picks it up.
        assert_eq!(classifier.classify("k", "gopher://host/x"), Kind::Path);
    }

    #[test]
    fn test_whitelisting_extra_scheme() {
        let classifier = Classifier::new().with_url_scheme("WS");
        assert_eq!(classifier.classify("k", "ws://host/socket"), Kind::Url);
    }

    #[test]
    fn test_scheme_match_is_case_insensitive() {
        let classifier = Classifier::new();
        assert_eq!(
            classifier.classify("k", "HTTP://Example.COM/"),
            Kind::Url
        );
    }

    #[test]
    fn test_rules_apply_individually() {
        let classifier = Classifier::new();
        assert_eq!(
            classifier.apply(ClassifierRule::PathKeyPrefix, "dir.root", "x"),
            Some(Kind::Path)
        );
        assert_eq!(
            classifier.apply(ClassifierRule::PathKeyPrefix, "title", "x"),
            None
        );
        assert_eq!(
            classifier.apply(ClassifierRule::UrlScheme, "k", "http://h"),
            Some(Kind::Url)
        );
        assert_eq!(classifier.apply(ClassifierRule::UrlScheme, "k", "h"), None);
        assert_eq!(
            classifier.apply(ClassifierRule::PathShape, "k", "/x"),
            Some(Kind::Path)
        );
        assert_eq!(classifier.apply(ClassifierRule::PathShape, "k", "x"), None);
    }

    #[test]
    fn test_url_scheme_parsing() {
        assert_eq!(url_scheme("https://example.com"), Some("https"));
        assert_eq!(url_scheme("git+ssh://host"), Some("git+ssh"));
        assert_eq!(url_scheme("://host"), None);
        assert_eq!(url_scheme("https://"), None);
        assert_eq!(url_scheme("1http://host"), None);
        assert_eq!(url_scheme("no scheme here"), None);
    }

    #[test]
    fn test_drive_prefix() {
        assert!(has_drive_prefix("C:/x"));
        assert!(has_drive_prefix("z:\\x"));
        assert!(!has_drive_prefix("C:"));
        assert!(!has_drive_prefix("1:/x"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(format!("{}", Kind::Path), "path");
        assert_eq!(format!("{}", Kind::Url), "url");
        assert_eq!(format!("{}", Kind::Opaque), "opaque");
    }

    #[test]
    fn test_default_rule_order() {
        let classifier = Classifier::new();
        assert_eq!(
            classifier.rules(),
            &[
                ClassifierRule::PathKeyPrefix,
                ClassifierRule::UrlScheme,
                ClassifierRule::PathShape,
            ]
        );
    }
}
