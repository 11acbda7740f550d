use serde::{Deserialize, Serialize};
use std::fmt;

/// A discovered test, written `<rule-name>[<key>]`.
///
/// The key is kept as policy source text, so the identifier is also a valid
/// query suffix below `data.<namespace>`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestId(String);

impl TestId {
    pub fn new(name: &str, key: &str) -> Self {
        Self(format!("{name}[{key}]"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fully-qualified query for this test: `data.<namespace>.<id>`.
    pub fn query(&self, namespace: &str) -> String {
        format!("data.{namespace}.{}", self.0)
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
