//! Test discovery: which rules of a policy program are tests.
//!
//! A rule is a test when its head name matches `^(expect|assert)(_[A-Za-z]+)*$`
//! and it carries a key (`expect["labels"]`, `assert_replicas[msg]`,
//! `expect contains msg`). Plain rules never qualify because a test is
//! reported by its `<name>[<key>]` identifier.

use crate::model::RuleHead;
use hcunit_types::TestId;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn test_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(expect|assert)(_[A-Za-z]+)*$").expect("test name regex"))
}

/// Whether a rule head name follows the test naming convention.
pub fn is_test_rule_name(name: &str) -> bool {
    test_name_regex().is_match(name)
}

/// Occurrence count per discovered test.
///
/// Backed by a `HashMap`: iteration order is unspecified. Callers that print
/// must go through [`TestInventory::sorted`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestInventory {
    counts: HashMap<TestId, usize>,
}

impl TestInventory {
    pub fn record(&mut self, id: TestId) {
        *self.counts.entry(id).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, id: &TestId) -> usize {
        self.counts.get(id).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TestId, usize)> {
        self.counts.iter().map(|(id, n)| (id, *n))
    }

    /// Identifiers with their counts, sorted by identifier.
    pub fn sorted(&self) -> Vec<(TestId, usize)> {
        let mut entries: Vec<(TestId, usize)> =
            self.counts.iter().map(|(id, n)| (id.clone(), *n)).collect();
        entries.sort();
        entries
    }

    /// Every identifier that occurs more than once, sorted.
    pub fn duplicates(&self) -> Vec<TestId> {
        let mut dups: Vec<TestId> = self
            .counts
            .iter()
            .filter(|(_, n)| **n > 1)
            .map(|(id, _)| id.clone())
            .collect();
        dups.sort();
        dups
    }
}

impl FromIterator<TestId> for TestInventory {
    fn from_iter<I: IntoIterator<Item = TestId>>(iter: I) -> Self {
        let mut inventory = TestInventory::default();
        for id in iter {
            inventory.record(id);
        }
        inventory
    }
}

/// Count every test rule in `rules`. Never filters duplicates and never fails;
/// an empty inventory is a valid answer here.
pub fn discover_tests(rules: &[RuleHead]) -> TestInventory {
    rules
        .iter()
        .filter(|rule| is_test_rule_name(&rule.name))
        .filter_map(|rule| rule.key.as_deref().map(|key| TestId::new(&rule.name, key)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naming_convention() {
        for name in ["expect", "assert", "expect_labels", "assert_min_Replicas"] {
            assert!(is_test_rule_name(name), "{name} should qualify");
        }
        for name in ["expected", "deny", "expect_", "expect__x", "assert_1", "my_expect", ""] {
            assert!(!is_test_rule_name(name), "{name} should not qualify");
        }
    }

    #[test]
    fn keyed_test_rules_are_counted() {
        let rules = vec![
            RuleHead::keyed("assert", "minReplicas", 3),
            RuleHead::keyed("expect", "\"labels\"", 7),
            RuleHead::keyed("deny", "msg", 11),
            RuleHead::plain("allow", 15),
        ];
        let inventory = discover_tests(&rules);
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.count(&TestId::new("assert", "minReplicas")), 1);
        assert_eq!(inventory.count(&TestId::new("expect", "\"labels\"")), 1);
        assert!(inventory.duplicates().is_empty());
    }

    #[test]
    fn plain_rules_with_test_names_do_not_qualify() {
        let inventory = discover_tests(&[RuleHead::plain("expect", 1)]);
        assert!(inventory.is_empty());
    }

    #[test]
    fn duplicates_are_kept_with_their_counts() {
        let rules = vec![
            RuleHead::keyed("assert", "x", 1),
            RuleHead::keyed("assert", "x", 5),
            RuleHead::keyed("expect", "y", 9),
        ];
        let inventory = discover_tests(&rules);
        assert_eq!(inventory.count(&TestId::new("assert", "x")), 2);
        assert_eq!(inventory.duplicates(), vec![TestId::new("assert", "x")]);
    }

    #[test]
    fn zero_matching_rules_is_an_empty_inventory() {
        let inventory = discover_tests(&[RuleHead::keyed("deny", "msg", 1)]);
        assert!(inventory.is_empty());
    }

    #[test]
    fn sorted_is_ordered_by_identifier() {
        let inventory: TestInventory = vec![
            TestId::new("expect", "b"),
            TestId::new("assert", "a"),
            TestId::new("expect", "b"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            inventory.sorted(),
            vec![(TestId::new("assert", "a"), 1), (TestId::new("expect", "b"), 2)]
        );
    }
}
