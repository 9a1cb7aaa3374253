//! Property-based tests for whole-map resolution.
//!
//! Note: The normalize modules already have property tests for path and URL
//! normalization. This module focuses on registry-level properties over
//! generated parameter maps.

use crate::builder::PathfinderBuilder;
use crate::classify::Kind;
use crate::resolve::{segments, Segment};
use proptest::prelude::*;

// Strategy for key segments (no separators, no markers)
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}\\.[a-z][a-z0-9_]{0,8}"
}

// Strategy for absolute path values
fn abs_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9_-]{1,10}", 1..=5).prop_map(|parts| {
        format!("/{}", parts.join("/"))
    })
}

// Strategy for host names
fn host_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9-]{0,12}\\.[a-zA-Z]{2,5}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // An acyclic map of path entries resolves every key to an absolute,
    // separator-normalized string with no duplicate separators.
    #[test]
    fn path_entries_resolve_absolute_and_clean(
        root in abs_path_strategy(),
        leaf in "[a-z0-9_-]{1,10}",
    ) {
        let finder = PathfinderBuilder::bare()
            .with_parameter("dir.root", root.as_str())
            .with_parameter("dir.leaf", format!("%dir.root%//{leaf}/"))
            .build()
            .unwrap();

        for key in ["dir.root", "dir.leaf"] {
            let resolved = finder.get(key).unwrap().unwrap();
            prop_assert!(resolved.starts_with('/'));
            prop_assert!(!resolved.contains("//"));
            prop_assert!(!resolved.contains('\\'));
        }
    }

    // URL entries resolve to scheme://host... with lower-cased scheme/host.
    #[test]
    fn url_entries_lowercase_scheme_and_host(host in host_strategy()) {
        let raw = format!("HTTPS://{}/Path", host.to_ascii_uppercase());
        let finder = PathfinderBuilder::bare()
            .with_parameter("site.url", raw.as_str())
            .build()
            .unwrap();

        let resolved = finder.get("site.url").unwrap().unwrap();
        let expected_prefix = format!("https://{}", host.to_ascii_lowercase());
        prop_assert!(resolved.starts_with(&expected_prefix));
    }

    // Resolving the same map twice yields identical values for every key.
    #[test]
    fn whole_map_resolution_idempotent(
        root in abs_path_strategy(),
        title in "[a-zA-Z ]{0,20}",
    ) {
        let build = || {
            PathfinderBuilder::bare()
                .with_parameter("dir.root", root.as_str())
                .with_parameter("dir.assets", "%dir.root%/assets")
                .with_parameter("title", title.as_str())
                .build()
                .unwrap()
        };
        let first = build();
        let second = build();

        for (key, _) in first.parameters() {
            prop_assert_eq!(first.get(key).unwrap(), second.get(key).unwrap());
        }
    }

    // Scanning splits any value into segments that reassemble to the input
    // (placeholders contribute their markers back).
    #[test]
    fn segment_scan_is_lossless(value in "[a-z0-9/%.]{0,30}") {
        let mut rebuilt = String::new();
        for segment in segments(&value) {
            match segment {
                Segment::Literal(text) => rebuilt.push_str(text),
                Segment::Placeholder(token) => {
                    rebuilt.push('%');
                    rebuilt.push_str(token);
                    rebuilt.push('%');
                }
            }
        }
        prop_assert_eq!(rebuilt, value);
    }

    // Two-key reference cycles always fail with a cycle error, never hang.
    #[test]
    fn two_key_cycles_always_detected(a in key_strategy(), b in key_strategy()) {
        prop_assume!(a != b);
        let finder = PathfinderBuilder::bare()
            .with_parameter(a.as_str(), format!("%{b}%"))
            .with_parameter(b.as_str(), format!("%{a}%"))
            .build()
            .unwrap();

        let err = finder.get(&a).unwrap_err();
        prop_assert!(err.is_cycle());
    }

    // Classification is total: every key/value pair gets exactly one kind.
    #[test]
    fn classification_total(key in key_strategy(), value in "[ -~]{0,30}") {
        let classifier = crate::classify::Classifier::new();
        let kind = classifier.classify(&key, &value);
        prop_assert!(matches!(kind, Kind::Path | Kind::Url | Kind::Opaque));
    }
}
