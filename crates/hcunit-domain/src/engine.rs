//! Capability interfaces for the two external collaborators.
//!
//! The core depends only on these traits, so the policy engine and the
//! template renderer can be swapped or faked without touching evaluation.

use crate::document::ConfigDocument;
use crate::model::RuleTable;
use hcunit_types::TemplatePath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Rendered output: template-relative path -> fully rendered text.
pub type RenderedFiles = BTreeMap<TemplatePath, String>;

/// Expands a template tree with one merged values document.
pub trait TemplateRenderer {
    fn render(
        &self,
        templates: &BTreeMap<TemplatePath, String>,
        values: &ConfigDocument,
    ) -> anyhow::Result<RenderedFiles>;
}

/// Executes queries of the declarative policy language.
pub trait PolicyEngine {
    /// Static analysis of the program's rules; nothing is evaluated.
    fn rule_table(&self, policy: &str) -> Result<RuleTable, EngineError>;

    /// Run one query against `input`, collecting results and a trace.
    fn evaluate(&self, request: &EvalRequest<'_>) -> Result<EngineOutput, EngineError>;
}

#[derive(Clone, Copy, Debug)]
pub struct EvalRequest<'a> {
    pub query: &'a str,
    /// Location of the policy program.
    pub policy: &'a str,
    pub input: &'a Value,
}

/// One named expression of a result row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    /// Source text of the evaluated expression, as echoed by the engine.
    pub text: String,
    pub value: Value,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(default)]
    pub expressions: Vec<Expression>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub bindings: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceLocation {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub row: u32,
    #[serde(default)]
    pub col: u32,
}

/// One step of the engine's evaluation trace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Step kind (`Enter`, `Eval`, `Exit`, `Fail`, `Redo`, `Note`, ...).
    pub op: String,
    #[serde(default)]
    pub query_id: u64,
    #[serde(default)]
    pub parent_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<TraceLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Engine answer for one query. An empty `results` means "undefined".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineOutput {
    pub results: Vec<ResultRow>,
    pub trace: Vec<TraceEvent>,
}

#[derive(Clone, Debug, Error)]
pub enum EngineError {
    /// The program or query could not be parsed or compiled.
    #[error("{0}")]
    Prepare(String),
    /// Compilation succeeded but evaluation failed.
    #[error("{0}")]
    Run(String),
    /// The engine itself is unavailable or misbehaved.
    #[error("{0}")]
    Unavailable(String),
}
