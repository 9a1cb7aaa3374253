//! The parameter-map build stage.
//!
//! Building and resolving are two explicit stages: [`PathfinderBuilder`]
//! merges defaults, caller parameters, and one-shot environment seeding
//! with last-write-wins semantics, then [`build`](PathfinderBuilder::build)
//! classifies every entry once and freezes the result into an immutable
//! [`Pathfinder`].

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::classify::Classifier;
use crate::diagnostics::{DiagnosticSink, LogSink, Notice};
use crate::environment;
use crate::error::Result;
use crate::registry::{Entry, MissingKeyPolicy, Pathfinder};
use crate::value::ParamValue;

/// Builder for [`Pathfinder`].
///
/// # Examples
///
/// ```
/// use pathfinder::PathfinderBuilder;
///
/// let finder = PathfinderBuilder::new()
///     .with_parameter("dir.root", "/srv/app")
///     .with_parameter("site.url", "HTTP://Example.COM/")
///     .build()
///     .unwrap();
///
/// // Base defaults from the composition root are present...
/// assert_eq!(finder.get("env").unwrap(), Some("dev".to_string()));
/// // ...and caller parameters resolve as usual.
/// assert_eq!(
///     finder.get("site.url").unwrap(),
///     Some("http://example.com/".to_string())
/// );
/// ```
pub struct PathfinderBuilder {
    parameters: BTreeMap<String, ParamValue>,
    classifier: Classifier,
    sink: Arc<dyn DiagnosticSink>,
    quiet: bool,
    missing_key: MissingKeyPolicy,
    seed_environment: bool,
    skipped: Vec<(String, String)>,
}

impl Default for PathfinderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathfinderBuilder {
    /// Create a builder carrying the composition root's base defaults
    /// (`env = "dev"`, `debug = true`). Both are overridable.
    #[must_use]
    pub fn new() -> Self {
        let mut builder = Self::bare();
        builder
            .parameters
            .insert("env".to_string(), ParamValue::from("dev"));
        builder
            .parameters
            .insert("debug".to_string(), ParamValue::from(true));
        builder
    }

    /// Create a builder with no defaults at all.
    #[must_use]
    pub fn bare() -> Self {
        Self {
            parameters: BTreeMap::new(),
            classifier: Classifier::new(),
            sink: Arc::new(LogSink),
            quiet: false,
            missing_key: MissingKeyPolicy::default(),
            seed_environment: false,
            skipped: Vec::new(),
        }
    }

    /// Set one parameter. A later write to the same key wins.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Set many parameters, in iteration order (last write wins).
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfinder::{ParamValue, PathfinderBuilder};
    ///
    /// let finder = PathfinderBuilder::bare()
    ///     .with_parameters([
    ///         ("dir.root".to_string(), ParamValue::from("/srv/app")),
    ///         ("dir.root".to_string(), ParamValue::from("/srv/override")),
    ///     ])
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(finder.get("dir.root").unwrap(), Some("/srv/override".to_string()));
    /// ```
    #[must_use]
    pub fn with_parameters(
        mut self,
        parameters: impl IntoIterator<Item = (String, ParamValue)>,
    ) -> Self {
        for (key, value) in parameters {
            self.parameters.insert(key, value);
        }
        self
    }

    /// Set parameters from a JSON object.
    ///
    /// Scalar members become entries; arrays, objects, and non-integral
    /// numbers are excluded and reported as skipped when the registry is
    /// built.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfinder::PathfinderBuilder;
    ///
    /// let json = serde_json::json!({
    ///     "dir.root": "/srv/app",
    ///     "debug": true,
    ///     "flags": ["a", "b"],
    /// });
    /// let finder = PathfinderBuilder::bare()
    ///     .with_json_parameters(json.as_object().unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(finder.get("dir.root").unwrap(), Some("/srv/app".to_string()));
    /// assert!(!finder.contains("flags"));
    /// ```
    #[must_use]
    pub fn with_json_parameters(
        mut self,
        parameters: &serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        for (key, value) in parameters {
            match ParamValue::from_json(value) {
                Ok(scalar) => {
                    self.parameters.insert(key.clone(), scalar);
                }
                Err(reason) => self.skipped.push((key.clone(), reason)),
            }
        }
        self
    }

    /// Enable one-shot environment seeding at build time.
    ///
    /// Seeds `dir.root` from the current working directory, `dir.cache`
    /// as `%dir.root%/var`, and `title` from the host name. Seeds never
    /// overwrite a key the caller already set.
    #[must_use]
    pub fn seed_environment(mut self) -> Self {
        self.seed_environment = true;
        self
    }

    /// Inject the diagnostic sink the registry reports through.
    ///
    /// Defaults to [`LogSink`].
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Suppress all diagnostic notices.
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Choose the behavior of `get()` on an absent key.
    #[must_use]
    pub fn missing_key(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_key = policy;
        self
    }

    /// Add a path-denoting key namespace prefix to the classifier.
    #[must_use]
    pub fn with_path_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.classifier = self.classifier.with_path_key_prefix(prefix);
        self
    }

    /// Whitelist an additional URL scheme for classification.
    #[must_use]
    pub fn with_url_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.classifier = self.classifier.with_url_scheme(scheme);
        self
    }

    /// Merge, classify, and freeze the registry.
    ///
    /// Non-coercible entries are reported through the sink here, once,
    /// rather than on every later access.
    ///
    /// # Errors
    ///
    /// Returns an error only when environment seeding was requested and the
    /// working directory cannot be determined.
    pub fn build(mut self) -> Result<Pathfinder> {
        if self.seed_environment {
            if !self.parameters.contains_key("dir.root") {
                self.parameters.insert(
                    "dir.root".to_string(),
                    ParamValue::from(environment::project_root()?),
                );
            }
            self.parameters
                .entry("dir.cache".to_string())
                .or_insert_with(|| ParamValue::from("%dir.root%/var"));
            self.parameters
                .entry("title".to_string())
                .or_insert_with(|| ParamValue::from(environment::host_title()));
        }

        let mut entries = BTreeMap::new();
        for (key, raw) in self.parameters {
            let text = raw.as_text();
            if text.is_none() {
                self.skipped
                    .push((key.clone(), "value is not string-coercible".to_string()));
            }
            entries.insert(key, Entry { raw, text });
        }

        if !self.quiet {
            for (key, reason) in self.skipped {
                self.sink.notice(Notice::SkippedValue { key, reason });
            }
        }

        Ok(Pathfinder::from_parts(
            entries,
            self.classifier,
            self.sink,
            self.quiet,
            self.missing_key,
        ))
    }
}
