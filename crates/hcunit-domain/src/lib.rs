//! Pure policy-test evaluation (no IO).
//!
//! Input: a values document, rendered template text, and a policy rule table
//! produced elsewhere. Output: a verdict with per-test outcomes and traces.
//!
//! The policy engine and the template renderer are capability traits
//! ([`PolicyEngine`], [`TemplateRenderer`]); adapters live in `hcunit-io`.

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod discovery;
pub mod document;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod normalize;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(test)]
mod proptest;

pub use aggregate::{SuiteReport, aggregate, run_suite};
pub use discovery::{TestInventory, discover_tests, is_test_rule_name};
pub use document::{ConfigDocument, assemble_input, merge_documents, merge_values};
pub use engine::{
    EngineError, EngineOutput, EvalRequest, Expression, PolicyEngine, RenderedFiles, ResultRow,
    TemplateRenderer, TraceEvent, TraceLocation,
};
pub use error::HcunitError;
pub use evaluator::{QueryResult, build_query, classify, engine_failure, evaluate_tests};
pub use model::{RuleHead, RuleTable, ValuesSource};
pub use normalize::normalize_manifests;
