//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - values merging (union, rightmost wins, recursive maps)
//! - multi-document normalization order
//! - discovery counting

use crate::discovery::discover_tests;
use crate::document::{ConfigDocument, merge_documents};
use crate::engine::RenderedFiles;
use crate::model::RuleHead;
use crate::normalize::normalize_manifests;
use hcunit_types::{TemplatePath, TestId};
use proptest::prelude::*;
use serde_json::{Value, json};

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9]{0,7}").unwrap()
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(arb_key(), inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_document() -> impl Strategy<Value = ConfigDocument> {
    prop::collection::btree_map(arb_key(), arb_value(), 0..6).prop_map(|m| m.into_iter().collect())
}

// ============================================================================
// Merge
// ============================================================================

proptest! {
    #[test]
    fn merge_with_empty_is_identity(doc in arb_document()) {
        prop_assert_eq!(merge_documents(doc.clone(), ConfigDocument::new()), doc.clone());
        prop_assert_eq!(merge_documents(ConfigDocument::new(), doc.clone()), doc);
    }

    #[test]
    fn merged_keys_are_the_union(a in arb_document(), b in arb_document()) {
        let merged = merge_documents(a.clone(), b.clone());
        for key in a.keys().chain(b.keys()) {
            prop_assert!(merged.contains_key(key));
        }
        prop_assert!(merged.keys().all(|k| a.contains_key(k) || b.contains_key(k)));
    }

    #[test]
    fn overlay_non_mapping_values_win(a in arb_document(), b in arb_document()) {
        let merged = merge_documents(a, b.clone());
        for (key, value) in &b {
            if !value.is_object() {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }

    #[test]
    fn overlapping_mappings_merge_recursively(
        key in arb_key(),
        left in arb_document(),
        right in arb_document(),
    ) {
        let mut a = ConfigDocument::new();
        a.insert(key.clone(), Value::Object(left.clone()));
        let mut b = ConfigDocument::new();
        b.insert(key.clone(), Value::Object(right.clone()));

        let merged = merge_documents(a, b);
        prop_assert_eq!(
            merged.get(&key),
            Some(&Value::Object(merge_documents(left, right)))
        );
    }

    #[test]
    fn merge_is_idempotent(a in arb_document()) {
        prop_assert_eq!(merge_documents(a.clone(), a.clone()), a);
    }
}

// ============================================================================
// Normalization
// ============================================================================

proptest! {
    #[test]
    fn non_empty_chunks_survive_in_order(
        values in prop::collection::vec(0u32..1000, 1..6),
        blanks in prop::collection::vec(any::<bool>(), 1..6),
    ) {
        let mut chunks = Vec::new();
        for (i, v) in values.iter().enumerate() {
            if blanks.get(i).copied().unwrap_or(false) {
                chunks.push(String::new());
            }
            chunks.push(format!("index: {v}"));
        }
        let text = chunks.join("\n---\n");

        let mut files = RenderedFiles::new();
        files.insert(TemplatePath::new("templates/multi.yaml"), text);
        let out = normalize_manifests(&files).expect("normalize");

        let expected: Vec<Value> = values.iter().map(|v| json!({"index": v})).collect();
        let stored = out.get("multi.yaml").cloned().expect("stored");
        if expected.len() == 1 {
            prop_assert_eq!(stored, expected[0].clone());
        } else {
            prop_assert_eq!(stored, Value::Array(expected));
        }
    }

    #[test]
    fn non_yaml_text_is_stored_verbatim(text in ".{0,64}") {
        let mut files = RenderedFiles::new();
        files.insert(TemplatePath::new("NOTES.txt"), text.clone());
        let out = normalize_manifests(&files).expect("normalize");
        prop_assert_eq!(out.get("NOTES.txt"), Some(&Value::String(text)));
    }
}

// ============================================================================
// Discovery
// ============================================================================

proptest! {
    #[test]
    fn discovery_counts_every_test_head(
        keys in prop::collection::vec("[a-c]", 0..12),
    ) {
        let rules: Vec<RuleHead> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| RuleHead::keyed("assert", k, i as u32 + 1))
            .collect();
        let inventory = discover_tests(&rules);

        let total: usize = inventory.iter().map(|(_, n)| n).sum();
        prop_assert_eq!(total, keys.len());
        for k in &keys {
            let expected = keys.iter().filter(|x| *x == k).count();
            prop_assert_eq!(inventory.count(&TestId::new("assert", k)), expected);
            prop_assert_eq!(
                inventory.duplicates().contains(&TestId::new("assert", k)),
                expected > 1
            );
        }
    }
}
