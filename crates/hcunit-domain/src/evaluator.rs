//! Query evaluation: one engine query per discovered test.

use crate::discovery::TestInventory;
use crate::engine::{EngineError, EngineOutput, EvalRequest, PolicyEngine, ResultRow, TraceEvent};
use crate::error::HcunitError;
use hcunit_types::{Outcome, TestId};
use serde_json::Value;

/// Outcome of one test plus the raw engine answer.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryResult {
    pub id: TestId,
    pub query: String,
    pub outcome: Outcome,
    pub results: Vec<ResultRow>,
    pub trace: Vec<TraceEvent>,
}

/// `data.<namespace>.<id>`.
pub fn build_query(namespace: &str, id: &TestId) -> String {
    id.query(namespace)
}

/// PASS iff some result row has an expression whose text is the query itself.
///
/// Zero rows is the language's "undefined", which is a FAIL and not an error.
pub fn classify(query: &str, output: &EngineOutput) -> Outcome {
    let matched = output
        .results
        .iter()
        .flat_map(|row| row.expressions.iter())
        .any(|expr| expr.text == query);
    if matched { Outcome::Pass } else { Outcome::Fail }
}

/// Evaluate every discovered test against `input`.
///
/// Two passes: every identifier is checked for duplicates first, and only a
/// clean inventory reaches the engine. A duplicate therefore means zero
/// engine calls. Engine failures abort the remaining queries.
pub fn evaluate_tests(
    engine: &dyn PolicyEngine,
    inventory: &TestInventory,
    namespace: &str,
    policy: &str,
    input: &Value,
) -> Result<Vec<QueryResult>, HcunitError> {
    let duplicates = inventory.duplicates();
    if !duplicates.is_empty() {
        return Err(HcunitError::DuplicateTests { ids: duplicates });
    }

    let mut out = Vec::with_capacity(inventory.len());
    for (id, _) in inventory.sorted() {
        let query = build_query(namespace, &id);
        tracing::debug!(query = %query, "evaluating test");

        let request = EvalRequest {
            query: &query,
            policy,
            input,
        };
        let output = engine
            .evaluate(&request)
            .map_err(|err| engine_failure(&query, err))?;

        let outcome = classify(&query, &output);
        tracing::debug!(query = %query, outcome = outcome.label(), rows = output.results.len(), "test evaluated");

        out.push(QueryResult {
            id,
            query,
            outcome,
            results: output.results,
            trace: output.trace,
        });
    }
    Ok(out)
}

/// Map an engine failure on `query` to the run error it terminates with.
pub fn engine_failure(query: &str, err: EngineError) -> HcunitError {
    match err {
        EngineError::Prepare(message) => HcunitError::EvalPrepare {
            query: query.to_string(),
            message,
        },
        EngineError::Run(message) => HcunitError::EvalRun {
            query: query.to_string(),
            message,
        },
        EngineError::Unavailable(message) => HcunitError::Engine { message },
    }
}
