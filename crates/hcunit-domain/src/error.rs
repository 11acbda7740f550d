use hcunit_types::{TestId, ids};
use thiserror::Error;

/// Every terminal condition of an hcunit run.
///
/// Adapters wrap these in `anyhow::Error`; the CLI recovers them with
/// `downcast_ref` to pick an exit code.
#[derive(Debug, Error)]
pub enum HcunitError {
    #[error("{what} path is empty")]
    EmptyPath { what: &'static str },

    #[error("{path} is a directory, expected a path to a file")]
    UnexpectedDirectory { path: String },

    #[error("invalid policy path: {path:?}")]
    InvalidPolicyPath { path: String },

    #[error("standard input ({}) may be used for at most one values source", ids::STDIN_TOKEN)]
    StdinReused,

    #[error("failed to parse {source_id}: {message}")]
    Parse { source_id: String, message: String },

    #[error("unmarshal '{file}' failed: {message}")]
    Normalize { file: String, message: String },

    #[error("rendering failed: {message}")]
    Render { message: String },

    #[error("duplicate test identifiers found: {}", join_ids(.ids))]
    DuplicateTests { ids: Vec<TestId> },

    #[error("the policy did not define any test rules (expect[...] or assert[...])")]
    NoMatchingTests,

    #[error("failed preparing query {query}: {message}")]
    EvalPrepare { query: String, message: String },

    #[error("failed evaluating query {query}: {message}")]
    EvalRun { query: String, message: String },

    #[error("policy engine failed: {message}")]
    Engine { message: String },

    #[error("policy violations found: {} of {total} tests failed", .failed.len())]
    PolicyViolation { failed: Vec<TestId>, total: usize },
}

impl HcunitError {
    /// Stable snake_case kind recorded in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            HcunitError::EmptyPath { .. } => ids::ERR_EMPTY_PATH,
            HcunitError::UnexpectedDirectory { .. } => ids::ERR_UNEXPECTED_DIRECTORY,
            HcunitError::InvalidPolicyPath { .. } => ids::ERR_INVALID_POLICY_PATH,
            HcunitError::StdinReused => ids::ERR_STDIN_REUSED,
            HcunitError::Parse { .. } => ids::ERR_PARSE,
            HcunitError::Normalize { .. } => ids::ERR_NORMALIZE,
            HcunitError::Render { .. } => ids::ERR_RENDER,
            HcunitError::DuplicateTests { .. } => ids::ERR_DUPLICATE_TESTS,
            HcunitError::NoMatchingTests => ids::ERR_NO_MATCHING_TESTS,
            HcunitError::EvalPrepare { .. } => ids::ERR_EVAL_PREPARE,
            HcunitError::EvalRun { .. } => ids::ERR_EVAL_RUN,
            HcunitError::Engine { .. } => ids::ERR_ENGINE,
            HcunitError::PolicyViolation { .. } => ids::ERR_POLICY_VIOLATION,
        }
    }

    pub fn is_policy_violation(&self) -> bool {
        matches!(self, HcunitError::PolicyViolation { .. })
    }
}

fn join_ids(ids: &[TestId]) -> String {
    ids.iter().map(TestId::as_str).collect::<Vec<_>>().join(", ")
}
