use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// Canonical template-relative path used as the key for rendered files.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplatePath(String);

impl TemplatePath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        Self(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment; rendered manifests are keyed by it.
    pub fn base_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Extension of the final segment, without the dot.
    pub fn extension(&self) -> Option<&str> {
        Utf8Path::new(self.base_name()).extension()
    }
}

impl From<&Utf8Path> for TemplatePath {
    fn from(value: &Utf8Path) -> Self {
        TemplatePath::new(value.as_str())
    }
}

impl From<&str> for TemplatePath {
    fn from(value: &str) -> Self {
        TemplatePath::new(value)
    }
}
