//! In-memory collaborators for tests: a spy policy engine and a fake renderer.

use crate::document::ConfigDocument;
use crate::engine::{
    EngineError, EngineOutput, EvalRequest, Expression, PolicyEngine, RenderedFiles, ResultRow,
    TemplateRenderer, TraceEvent,
};
use crate::model::{RuleHead, RuleTable};
use hcunit_types::TemplatePath;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// Policy engine double that records every call.
///
/// Queries pass unless listed in `undefined`; `error` makes every call fail.
#[derive(Debug, Default)]
pub struct SpyEngine {
    rules: RuleTable,
    undefined: BTreeSet<String>,
    error: Option<EngineError>,
    calls: RefCell<Vec<(String, String, Value)>>,
}

impl SpyEngine {
    pub fn passing() -> Self {
        Self::default()
    }

    pub fn failing_for(queries: &[&str]) -> Self {
        Self {
            undefined: queries.iter().map(|q| q.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn erroring(error: EngineError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn with_rules(mut self, rules: Vec<RuleHead>) -> Self {
        self.rules = RuleTable {
            package: Some("main".to_string()),
            rules,
        };
        self
    }

    pub fn evaluations(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(q, _, _)| q.clone()).collect()
    }

    pub fn last_policy(&self) -> Option<String> {
        self.calls.borrow().last().map(|(_, p, _)| p.clone())
    }

    pub fn last_input(&self) -> Option<Value> {
        self.calls.borrow().last().map(|(_, _, i)| i.clone())
    }
}

impl PolicyEngine for SpyEngine {
    fn rule_table(&self, _policy: &str) -> Result<RuleTable, EngineError> {
        Ok(self.rules.clone())
    }

    fn evaluate(&self, request: &EvalRequest<'_>) -> Result<EngineOutput, EngineError> {
        self.calls.borrow_mut().push((
            request.query.to_string(),
            request.policy.to_string(),
            request.input.clone(),
        ));
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let trace = vec![TraceEvent {
            op: "Enter".to_string(),
            query_id: 0,
            parent_id: 0,
            location: None,
            message: Some(request.query.to_string()),
        }];
        if self.undefined.contains(request.query) {
            return Ok(EngineOutput {
                results: Vec::new(),
                trace,
            });
        }
        Ok(EngineOutput {
            results: vec![ResultRow {
                expressions: vec![Expression {
                    text: request.query.to_string(),
                    value: Value::Bool(true),
                }],
                bindings: Value::Null,
            }],
            trace,
        })
    }
}

/// Renderer double returning fixed output (or a fixed failure).
#[derive(Debug, Default)]
pub struct FakeRenderer {
    files: RenderedFiles,
    failure: Option<String>,
    seen_values: RefCell<Option<ConfigDocument>>,
}

impl FakeRenderer {
    pub fn with_files(entries: &[(&str, &str)]) -> Self {
        Self {
            files: entries
                .iter()
                .map(|(p, t)| (TemplatePath::new(p), t.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn seen_values(&self) -> Option<ConfigDocument> {
        self.seen_values.borrow().clone()
    }
}

impl TemplateRenderer for FakeRenderer {
    fn render(
        &self,
        _templates: &BTreeMap<TemplatePath, String>,
        values: &ConfigDocument,
    ) -> anyhow::Result<RenderedFiles> {
        *self.seen_values.borrow_mut() = Some(values.clone());
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        Ok(self.files.clone())
    }
}
