#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathfinder
//!
//! A symbolic parameter resolution engine.
//!
//! Given a flat map of named configuration values where some values
//! reference other named values through `%name%` placeholders, pathfinder
//! resolves every reference to a final, normalized form (a filesystem path
//! or a URL) and exposes lookup by key.
//!
//! ## Core Types
//!
//! - [`PathfinderBuilder`]: merges defaults, parameters, and environment
//!   seeds into an immutable registry
//! - [`Pathfinder`]: the registry facade answering `get(key)` queries
//! - [`ParamValue`] and [`Kind`]: raw values and their derived tags
//! - [`Error`] and [`Result`]: error handling types
//! - [`DiagnosticSink`] and [`Notice`]: injected diagnostics
//!
//! ## Examples
//!
//! ```
//! use pathfinder::PathfinderBuilder;
//!
//! let finder = PathfinderBuilder::bare()
//!     .with_parameter("dir.root", "/srv/app")
//!     .with_parameter("dir.assets", "%dir.root%/assets")
//!     .with_parameter("site.url", "HTTP://Example.COM/")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     finder.get("dir.assets").unwrap(),
//!     Some("/srv/app/assets".to_string())
//! );
//! assert_eq!(
//!     finder.get("site.url").unwrap(),
//!     Some("http://example.com/".to_string())
//! );
//!
//! // Compound lookup: registered key + literal suffix.
//! assert_eq!(
//!     finder.get("dir.root/var/cache.db").unwrap(),
//!     Some("/srv/app/var/cache.db".to_string())
//! );
//! ```

pub mod builder;
pub mod classify;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod normalize;
pub mod registry;
pub mod resolve;
pub mod value;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at crate root for convenience
pub use builder::PathfinderBuilder;
pub use classify::{Classifier, ClassifierRule, Kind};
pub use diagnostics::{DiagnosticSink, LogSink, MemorySink, Notice, NullSink};
pub use error::{Error, Result};
pub use registry::{MissingKeyPolicy, Pathfinder};
pub use value::ParamValue;
