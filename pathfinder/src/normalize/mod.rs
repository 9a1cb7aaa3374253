//! Kind-specific normalization.
//!
//! Normalizers are pure string functions: same input, same output, no I/O
//! and no filesystem existence checks. Path normalization unifies
//! separators, collapses redundant segments, and strips trailing
//! separators; URL normalization lower-cases the scheme and host and
//! applies the trailing-slash policy for bare origins.

pub mod path;
pub mod url;

pub use path::normalize_path;
pub use url::normalize_url;
