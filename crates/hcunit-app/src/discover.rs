//! The `discover` use case: list the tests a policy defines, without evaluating.

use camino::Utf8Path;
use hcunit_domain::{HcunitError, PolicyEngine, discover_tests, engine_failure};
use hcunit_types::TestId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoverOutput {
    /// Package the policy declares, if any.
    pub package: Option<String>,
    /// Identifiers with occurrence counts, sorted by identifier.
    pub tests: Vec<(TestId, usize)>,
    pub duplicates: Vec<TestId>,
}

impl DiscoverOutput {
    /// The error `eval` would stop with for this inventory, if any.
    pub fn problem(&self) -> Option<HcunitError> {
        if self.tests.is_empty() {
            return Some(HcunitError::NoMatchingTests);
        }
        if !self.duplicates.is_empty() {
            return Some(HcunitError::DuplicateTests {
                ids: self.duplicates.clone(),
            });
        }
        None
    }
}

pub fn run_discover(policy: &Utf8Path, engine: &dyn PolicyEngine) -> anyhow::Result<DiscoverOutput> {
    hcunit_io::validate_policy_path(policy)?;

    let table = engine
        .rule_table(policy.as_str())
        .map_err(|err| engine_failure(policy.as_str(), err))?;
    let inventory = discover_tests(&table.rules);

    Ok(DiscoverOutput {
        package: table.package,
        tests: inventory.sorted(),
        duplicates: inventory.duplicates(),
    })
}
