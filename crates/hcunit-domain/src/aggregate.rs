//! Result aggregation: one verdict for the whole run.

use crate::discovery::{TestInventory, discover_tests};
use crate::error::HcunitError;
use crate::evaluator::{QueryResult, engine_failure, evaluate_tests};
use crate::engine::PolicyEngine;
use hcunit_types::{Outcome, TestId, VerdictStatus, VerdictSummary};
use serde_json::Value;

/// Per-test outcomes of a run that got as far as evaluation.
///
/// `results` are sorted by test identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct SuiteReport {
    pub namespace: String,
    pub results: Vec<QueryResult>,
}

impl SuiteReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn failed(&self) -> Vec<TestId> {
        self.results
            .iter()
            .filter(|r| r.outcome == Outcome::Fail)
            .map(|r| r.id.clone())
            .collect()
    }

    pub fn is_pass(&self) -> bool {
        self.results.iter().all(|r| r.outcome == Outcome::Pass)
    }

    pub fn summary(&self) -> VerdictSummary {
        let failed = self.failed().len() as u32;
        let total = self.total() as u32;
        VerdictSummary {
            status: if failed == 0 {
                VerdictStatus::Pass
            } else {
                VerdictStatus::Fail
            },
            total,
            passed: total - failed,
            failed,
        }
    }

    /// `PolicyViolation` when at least one test failed.
    pub fn violation(&self) -> Option<HcunitError> {
        let failed = self.failed();
        if failed.is_empty() {
            return None;
        }
        Some(HcunitError::PolicyViolation {
            failed,
            total: self.total(),
        })
    }
}

/// Combine evaluation results into a report.
///
/// Rules, in order: an empty inventory is `NoMatchingTests`; any duplicate is
/// `DuplicateTests` (no per-test lines); otherwise the results form the report.
pub fn aggregate(
    inventory: &TestInventory,
    namespace: &str,
    mut results: Vec<QueryResult>,
) -> Result<SuiteReport, HcunitError> {
    if inventory.is_empty() {
        return Err(HcunitError::NoMatchingTests);
    }
    let duplicates = inventory.duplicates();
    if !duplicates.is_empty() {
        return Err(HcunitError::DuplicateTests { ids: duplicates });
    }
    results.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(SuiteReport {
        namespace: namespace.to_string(),
        results,
    })
}

/// Discover, evaluate and aggregate the tests of one policy program.
///
/// The returned report may still contain failures; see [`SuiteReport::violation`].
pub fn run_suite(
    engine: &dyn PolicyEngine,
    policy: &str,
    namespace: &str,
    input: &Value,
) -> Result<SuiteReport, HcunitError> {
    let table = engine
        .rule_table(policy)
        .map_err(|err| engine_failure(policy, err))?;

    if let Some(package) = table.package.as_deref()
        && package != namespace
    {
        tracing::warn!(
            package,
            namespace,
            "policy package differs from the queried namespace"
        );
    }

    let inventory = discover_tests(&table.rules);
    tracing::info!(tests = inventory.len(), rules = table.rules.len(), "discovered tests");
    if inventory.is_empty() {
        return Err(HcunitError::NoMatchingTests);
    }

    let results = evaluate_tests(engine, &inventory, namespace, policy, input)?;
    aggregate(&inventory, namespace, results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RuleHead;
    use crate::test_support::SpyEngine;
    use serde_json::json;

    fn replicas_input(n: u64) -> Value {
        json!({"deployment.yaml": {"replicas": n}, "values": {}})
    }

    #[test]
    fn all_passing_tests_yield_a_passing_report() {
        let engine = SpyEngine::passing().with_rules(vec![RuleHead::keyed("assert", "minReplicas", 3)]);
        let report = run_suite(&engine, "policy.rego", "main", &replicas_input(3)).expect("run");
        assert!(report.is_pass());
        assert!(report.violation().is_none());
        assert_eq!(report.summary().status, VerdictStatus::Pass);
        assert_eq!(report.results[0].query, "data.main.assert[minReplicas]");
    }

    #[test]
    fn failing_test_is_a_policy_violation_with_the_full_table() {
        let engine = SpyEngine::failing_for(&["data.main.assert[minReplicas]"]).with_rules(vec![
            RuleHead::keyed("assert", "minReplicas", 3),
            RuleHead::keyed("expect", "labels", 8),
        ]);
        let report = run_suite(&engine, "policy.rego", "main", &replicas_input(1)).expect("run");
        assert_eq!(report.total(), 2);
        assert_eq!(report.failed(), vec![TestId::new("assert", "minReplicas")]);

        let summary = report.summary();
        assert_eq!((summary.passed, summary.failed), (1, 1));
        assert!(matches!(
            report.violation(),
            Some(HcunitError::PolicyViolation { total: 2, .. })
        ));
    }

    #[test]
    fn no_test_rules_is_an_error_not_a_pass() {
        let engine = SpyEngine::passing().with_rules(vec![
            RuleHead::keyed("deny", "msg", 1),
            RuleHead::plain("allow", 4),
        ]);
        let err = run_suite(&engine, "policy.rego", "main", &json!({})).unwrap_err();
        assert!(matches!(err, HcunitError::NoMatchingTests));
        assert_eq!(engine.evaluations(), 0);
    }

    #[test]
    fn duplicate_rules_never_reach_the_engine() {
        let engine = SpyEngine::passing().with_rules(vec![
            RuleHead::keyed("assert", "minReplicas", 3),
            RuleHead::keyed("assert", "minReplicas", 9),
            RuleHead::keyed("expect", "labels", 14),
        ]);
        let err = run_suite(&engine, "policy.rego", "main", &json!({})).unwrap_err();
        assert!(matches!(err, HcunitError::DuplicateTests { ref ids } if ids == &vec![TestId::new("assert", "minReplicas")]));
        assert_eq!(engine.evaluations(), 0);
    }

    #[test]
    fn aggregate_checks_empty_before_duplicates() {
        let err = aggregate(&TestInventory::default(), "main", Vec::new()).unwrap_err();
        assert!(matches!(err, HcunitError::NoMatchingTests));
    }

    #[test]
    fn verdict_is_independent_of_result_order() {
        let engine = SpyEngine::failing_for(&["data.main.expect[b]"]).with_rules(vec![
            RuleHead::keyed("expect", "b", 1),
            RuleHead::keyed("assert", "a", 2),
            RuleHead::keyed("expect", "c", 3),
        ]);
        let report = run_suite(&engine, "policy.rego", "main", &json!({})).expect("run");

        let inventory = discover_tests(&[
            RuleHead::keyed("expect", "b", 1),
            RuleHead::keyed("assert", "a", 2),
            RuleHead::keyed("expect", "c", 3),
        ]);
        let mut reversed = report.results.clone();
        reversed.reverse();
        let again = aggregate(&inventory, "main", reversed).expect("aggregate");

        assert_eq!(again.summary(), report.summary());
        assert_eq!(again.results, report.results);
    }
}
