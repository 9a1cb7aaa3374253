//! The parameter registry facade.
//!
//! [`Pathfinder`] owns the merged parameter map produced by
//! [`PathfinderBuilder`](crate::PathfinderBuilder), resolves values lazily
//! on first access, and memoizes results for the registry's lifetime. There
//! is no mutation API after construction.
//!
//! A single key moves through `Unresolved -> Resolving -> Resolved` or
//! `Unresolved -> Resolving -> Failed`; `Resolved` is terminal and cached,
//! `Failed` is never cached.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::classify::{url_scheme, Classifier, Kind};
use crate::diagnostics::{DiagnosticSink, Notice};
use crate::error::{Error, Result};
use crate::normalize::{normalize_path, normalize_url};
use crate::resolve;
use crate::value::ParamValue;

/// Behavior of [`Pathfinder::get`] when the queried key is absent.
///
/// The surrounding tool historically logged and continued rather than
/// aborting; that remains the default. Callers needing a guarantee use
/// [`Pathfinder::get_required`] instead of switching the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingKeyPolicy {
    /// Emit a [`Notice::MissingKey`] and return `Ok(None)`.
    #[default]
    LogAndIgnore,
    /// Fail with [`Error::UnknownKey`].
    Fail,
}

/// One entry of the parameter map.
pub(crate) struct Entry {
    /// The value as supplied by the caller.
    pub(crate) raw: ParamValue,
    /// The string-coerced form; `None` excludes the entry from resolution.
    pub(crate) text: Option<String>,
}

/// The symbolic parameter registry.
///
/// Construction goes through [`PathfinderBuilder`](crate::PathfinderBuilder);
/// the registry itself is immutable and safe to share between threads.
///
/// # Examples
///
/// ```
/// use pathfinder::PathfinderBuilder;
///
/// let finder = PathfinderBuilder::bare()
///     .with_parameter("dir.root", "/srv/app")
///     .with_parameter("dir.assets", "%dir.root%/assets")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     finder.get("dir.assets").unwrap(),
///     Some("/srv/app/assets".to_string())
/// );
/// ```
pub struct Pathfinder {
    entries: BTreeMap<String, Entry>,
    classifier: Classifier,
    cache: RwLock<HashMap<String, String>>,
    sink: Arc<dyn DiagnosticSink>,
    quiet: bool,
    missing_key: MissingKeyPolicy,
}

impl fmt::Debug for Pathfinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pathfinder")
            .field("entries", &self.entries.len())
            .field("quiet", &self.quiet)
            .field("missing_key", &self.missing_key)
            .finish_non_exhaustive()
    }
}

impl Pathfinder {
    pub(crate) fn from_parts(
        entries: BTreeMap<String, Entry>,
        classifier: Classifier,
        sink: Arc<dyn DiagnosticSink>,
        quiet: bool,
        missing_key: MissingKeyPolicy,
    ) -> Self {
        Self {
            entries,
            classifier,
            cache: RwLock::new(HashMap::new()),
            sink,
            quiet,
            missing_key,
        }
    }

    /// Resolve a query to its final, normalized string.
    ///
    /// The query is either a registered key, or a compound form mixing a
    /// registered key with a literal suffix after the first separator
    /// (`"dir.cache/sub/file.ext"`). `Ok(None)` means the query named no
    /// resolvable entry and the configured [`MissingKeyPolicy`] chose not
    /// to fail.
    ///
    /// # Errors
    ///
    /// Always fails on a placeholder cycle or a dangling reference; fails
    /// on an absent key only under [`MissingKeyPolicy::Fail`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfinder::PathfinderBuilder;
    ///
    /// let finder = PathfinderBuilder::bare()
    ///     .with_parameter("dir.cache", "/srv/app/var")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     finder.get("dir.cache/pool/items.db").unwrap(),
    ///     Some("/srv/app/var/pool/items.db".to_string())
    /// );
    /// assert_eq!(finder.get("dir.unknown").unwrap(), None);
    /// ```
    pub fn get(&self, query: &str) -> Result<Option<String>> {
        if self.entries.contains_key(query) {
            return self.resolve_root(query);
        }

        if let Some((key, suffix)) = split_compound(query) {
            if self.entries.contains_key(key) {
                return match self.resolve_root(key)? {
                    Some(base) => Ok(Some(join_suffix(&base, suffix)?)),
                    None => Ok(None),
                };
            }
        }

        self.emit(Notice::MissingKey {
            key: query.to_string(),
        });
        match self.missing_key {
            MissingKeyPolicy::LogAndIgnore => Ok(None),
            MissingKeyPolicy::Fail => Err(Error::UnknownKey {
                key: query.to_string(),
            }),
        }
    }

    /// Resolve a query, failing when it names no resolvable entry.
    ///
    /// This ignores the registry's [`MissingKeyPolicy`]: an absent key is
    /// [`Error::UnknownKey`] and a non-coercible entry is
    /// [`Error::UnsupportedValue`].
    ///
    /// # Errors
    ///
    /// Everything [`Pathfinder::get`] can fail with, plus the above.
    pub fn get_required(&self, query: &str) -> Result<String> {
        match self.get(query)? {
            Some(value) => Ok(value),
            None => {
                if self.entries.contains_key(query) {
                    Err(Error::UnsupportedValue {
                        key: query.to_string(),
                        reason: "value is not string-coercible".to_string(),
                    })
                } else {
                    Err(Error::UnknownKey {
                        key: query.to_string(),
                    })
                }
            }
        }
    }

    /// Resolve a query to an absolute filesystem path.
    ///
    /// The "must be absolute" requirement is enforced here, not in the
    /// normalizer, so relative values stay usable through [`Pathfinder::get`].
    ///
    /// # Errors
    ///
    /// Everything [`Pathfinder::get_required`] can fail with, plus
    /// [`Error::InvalidPath`] when the resolved value is not absolute.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfinder::PathfinderBuilder;
    /// use std::path::PathBuf;
    ///
    /// let finder = PathfinderBuilder::bare()
    ///     .with_parameter("dir.root", "/srv/app")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(finder.get_path("dir.root").unwrap(), PathBuf::from("/srv/app"));
    /// ```
    pub fn get_path(&self, query: &str) -> Result<PathBuf> {
        let resolved = self.get_required(query)?;
        if is_absolute(&resolved) {
            Ok(PathBuf::from(resolved))
        } else {
            Err(Error::InvalidPath {
                path: resolved,
                reason: format!("'{query}' did not resolve to an absolute path"),
            })
        }
    }

    /// Read-only access to a single raw parameter value.
    ///
    /// This is a diagnostic accessor; it performs no resolution.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key).map(|e| &e.raw)
    }

    /// Iterate over the full raw parameter set, in key order.
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), &e.raw))
    }

    /// Check whether a key is registered (resolvable or not).
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the registry holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a registered key with a fresh visited stack.
    fn resolve_root(&self, key: &str) -> Result<Option<String>> {
        let mut stack = Vec::new();
        self.resolve_key(key, &mut stack)
    }

    /// Resolve one key, recursively resolving the keys it references.
    ///
    /// `stack` holds the keys currently being resolved on this request;
    /// re-entering one of them is a cycle. `Ok(None)` means the key is
    /// absent or excluded from the resolvable set.
    fn resolve_key(&self, key: &str, stack: &mut Vec<String>) -> Result<Option<String>> {
        if let Some(resolved) = self.cached(key) {
            return Ok(Some(resolved));
        }

        let Some(entry) = self.entries.get(key) else {
            return Ok(None);
        };
        let Some(text) = entry.text.clone() else {
            return Ok(None);
        };

        if stack.iter().any(|visited| visited == key) {
            let mut chain = stack.clone();
            chain.push(key.to_string());
            self.emit(Notice::CycleDetected {
                chain: chain.clone(),
            });
            return Err(Error::Cycle { chain });
        }

        stack.push(key.to_string());
        let result = self.expand_and_normalize(key, &text, stack);
        stack.pop();

        let resolved = result?;
        self.cache
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), resolved.clone());
        Ok(Some(resolved))
    }

    /// Expand placeholders in an entry's text and normalize per its kind.
    fn expand_and_normalize(
        &self,
        key: &str,
        text: &str,
        stack: &mut Vec<String>,
    ) -> Result<String> {
        let expanded = resolve::expand(text, key, &mut |token| self.resolve_key(token, stack))
            .map_err(|e| {
                // The notice fires once, at the key whose value holds the
                // dangling token; outer frames just propagate the error.
                if let Error::UnknownReference {
                    token,
                    referenced_by,
                } = &e
                {
                    if referenced_by == key {
                        self.emit(Notice::UnknownReference {
                            token: token.clone(),
                            referenced_by: referenced_by.clone(),
                        });
                    }
                }
                e
            })?;

        // Classification runs on the expanded text so values assembled from
        // placeholders land on the right normalizer; the result is memoized,
        // so the decision is still made once per entry.
        match self.classifier.classify(key, &expanded) {
            Kind::Path => normalize_path(&expanded),
            Kind::Url => Ok(normalize_url(&expanded)),
            Kind::Opaque => Ok(expanded),
        }
    }

    /// Look up a previously memoized resolution.
    fn cached(&self, key: &str) -> Option<String> {
        self.cache
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn emit(&self, notice: Notice) {
        if !self.quiet {
            self.sink.notice(notice);
        }
    }
}

/// Split a compound query at the first path separator.
fn split_compound(query: &str) -> Option<(&str, &str)> {
    let at = query.find(['/', '\\'])?;
    let (key, rest) = query.split_at(at);
    let suffix = &rest[1..];
    if key.is_empty() || suffix.is_empty() {
        return None;
    }
    Some((key, suffix))
}

/// Append a literal suffix to a resolved base and re-normalize.
fn join_suffix(base: &str, suffix: &str) -> Result<String> {
    let joined = format!("{base}/{suffix}");
    if url_scheme(base).is_some() {
        Ok(normalize_url(&joined))
    } else {
        normalize_path(&joined)
    }
}

/// Check whether a normalized path string is absolute.
fn is_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    path.starts_with('/')
        || (bytes.len() >= 3
            && bytes[0].is_ascii_alphabetic()
            && bytes[1] == b':'
            && bytes[2] == b'/')
}
