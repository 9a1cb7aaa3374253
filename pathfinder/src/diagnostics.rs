//! Diagnostic notices and sinks.
//!
//! The registry never owns a process-global logger. Instead it is handed a
//! [`DiagnosticSink`] at construction and emits structured [`Notice`] values
//! through it. The default [`LogSink`] forwards notices to the `log` crate
//! facade, so applications keep whatever logger backend they already use.

use std::fmt;
use std::sync::Mutex;

/// A structured diagnostic emitted during parameter resolution.
///
/// Notices report recoverable conditions. Structural defects (cycles,
/// dangling references) are also surfaced as hard errors to the caller; the
/// notice exists so they show up in logs even when the caller discards the
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A `get()` query named a key absent from the parameter map.
    MissingKey {
        /// The key that was requested.
        key: String,
    },
    /// An entry was excluded from the resolvable set.
    SkippedValue {
        /// The key holding the skipped value.
        key: String,
        /// Why the value cannot participate in resolution.
        reason: String,
    },
    /// A placeholder chain re-entered a key already being resolved.
    CycleDetected {
        /// The keys on the resolution path, ending with the re-entered key.
        chain: Vec<String>,
    },
    /// A placeholder referenced a key not present in the map.
    UnknownReference {
        /// The missing token.
        token: String,
        /// The key whose value contains the placeholder.
        referenced_by: String,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { key } => write!(f, "missing key '{key}'"),
            Self::SkippedValue { key, reason } => {
                write!(f, "skipped '{key}': {reason}")
            }
            Self::CycleDetected { chain } => {
                write!(f, "placeholder cycle: {}", chain.join(" -> "))
            }
            Self::UnknownReference {
                token,
                referenced_by,
            } => {
                write!(f, "unknown reference '%{token}%' in '{referenced_by}'")
            }
        }
    }
}

/// A write-only collaborator accepting diagnostic notices.
///
/// The registry depends on nothing beyond "accepts a notice"; sinks must be
/// safe to share between concurrent readers.
pub trait DiagnosticSink: Send + Sync {
    /// Accept a diagnostic notice.
    fn notice(&self, notice: Notice);
}

/// A sink forwarding notices to the `log` crate facade.
///
/// Missing keys and skipped values are ordinary operational noise and go to
/// `debug`; cycles and dangling references are configuration defects and go
/// to `warn`.
///
/// # Examples
///
/// ```
/// use pathfinder::diagnostics::{DiagnosticSink, LogSink, Notice};
///
/// let sink = LogSink;
/// sink.notice(Notice::MissingKey { key: "dir.missing".to_string() });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn notice(&self, notice: Notice) {
        match &notice {
            Notice::MissingKey { .. } | Notice::SkippedValue { .. } => {
                log::debug!("{notice}");
            }
            Notice::CycleDetected { .. } | Notice::UnknownReference { .. } => {
                log::warn!("{notice}");
            }
        }
    }
}

/// A sink that discards every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn notice(&self, _notice: Notice) {}
}

/// A sink that records notices in memory, for inspection in tests.
///
/// # Examples
///
/// ```
/// use pathfinder::diagnostics::{DiagnosticSink, MemorySink, Notice};
///
/// let sink = MemorySink::new();
/// sink.notice(Notice::MissingKey { key: "k".to_string() });
/// assert_eq!(sink.notices().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    notices: Mutex<Vec<Notice>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a snapshot of all notices received so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn notice(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_display_missing_key() {
        let notice = Notice::MissingKey {
            key: "dir.missing".to_string(),
        };
        assert_eq!(format!("{notice}"), "missing key 'dir.missing'");
    }

    #[test]
    fn test_notice_display_skipped_value() {
        let notice = Notice::SkippedValue {
            key: "flags".to_string(),
            reason: "not string-coercible".to_string(),
        };
        let display = format!("{notice}");
        assert!(display.contains("skipped 'flags'"));
        assert!(display.contains("not string-coercible"));
    }

    #[test]
    fn test_notice_display_cycle() {
        let notice = Notice::CycleDetected {
            chain: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert!(format!("{notice}").contains("a -> b -> a"));
    }

    #[test]
    fn test_notice_display_unknown_reference() {
        let notice = Notice::UnknownReference {
            token: "dir.gone".to_string(),
            referenced_by: "dir.assets".to_string(),
        };
        let display = format!("{notice}");
        assert!(display.contains("%dir.gone%"));
        assert!(display.contains("dir.assets"));
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.notice(Notice::MissingKey {
            key: "a".to_string(),
        });
        sink.notice(Notice::MissingKey {
            key: "b".to_string(),
        });

        let notices = sink.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(
            notices[0],
            Notice::MissingKey {
                key: "a".to_string()
            }
        );
    }

    #[test]
    fn test_null_sink_accepts_anything() {
        let sink = NullSink;
        sink.notice(Notice::MissingKey {
            key: "k".to_string(),
        });
    }
}
