use hcunit_domain::{
    EngineError, EngineOutput, EvalRequest, PolicyEngine, ResultRow, RuleTable, TraceEvent,
};
use serde::Deserialize;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// `PolicyEngine` backed by the `opa` executable.
///
/// Rule tables come from the in-process Rego scanner; only `evaluate`
/// spawns `opa eval`.
#[derive(Clone, Debug)]
pub struct OpaCli {
    bin: String,
}

impl OpaCli {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

impl Default for OpaCli {
    fn default() -> Self {
        Self::new("opa")
    }
}

#[derive(Debug, Default, Deserialize)]
struct EvalOutput {
    #[serde(default)]
    result: Vec<ResultRow>,
    #[serde(default)]
    errors: Vec<EvalError>,
    #[serde(default)]
    explanation: Vec<TraceEvent>,
}

#[derive(Debug, Deserialize)]
struct EvalError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl PolicyEngine for OpaCli {
    fn rule_table(&self, policy: &str) -> Result<RuleTable, EngineError> {
        let source = std::fs::read_to_string(policy)
            .map_err(|err| EngineError::Prepare(format!("read {policy}: {err}")))?;
        Ok(hcunit_rego_parser::parse_rule_table(&source))
    }

    fn evaluate(&self, request: &EvalRequest<'_>) -> Result<EngineOutput, EngineError> {
        let input = serde_json::to_vec(request.input)
            .map_err(|err| EngineError::Unavailable(format!("serialize input: {err}")))?;

        let mut child = Command::new(&self.bin)
            .args(["eval", "--format", "json", "--explain", "full"])
            .args(["--data", request.policy])
            .arg("--stdin-input")
            .arg(request.query)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| EngineError::Unavailable(format!("spawn {}: {err}", self.bin)))?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&input) {
                Ok(()) => {}
                // The engine may exit before reading its input (e.g. on a bad policy).
                Err(err) if err.kind() == ErrorKind::BrokenPipe => {}
                Err(err) => {
                    return Err(EngineError::Unavailable(format!("write input: {err}")));
                }
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|err| EngineError::Unavailable(format!("wait for {}: {err}", self.bin)))?;
        tracing::debug!(
            query = request.query,
            status = %output.status,
            "opa eval finished"
        );

        parse_eval_output(
            &output.stdout,
            output.status.success(),
            &String::from_utf8_lossy(&output.stderr),
        )
    }
}

/// Interpret the JSON printed by `opa eval --format json`.
///
/// Engine errors with a `rego_` code failed during parsing or compilation;
/// any other engine error happened while evaluating.
pub fn parse_eval_output(
    stdout: &[u8],
    success: bool,
    stderr: &str,
) -> Result<EngineOutput, EngineError> {
    let parsed: EvalOutput = match serde_json::from_slice(stdout) {
        Ok(parsed) => parsed,
        Err(err) if success => {
            return Err(EngineError::Unavailable(format!(
                "unreadable engine output: {err}"
            )));
        }
        Err(_) => {
            let stderr = stderr.trim();
            return Err(EngineError::Run(if stderr.is_empty() {
                "engine exited with an error".to_string()
            } else {
                stderr.to_string()
            }));
        }
    };

    if !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        if parsed.errors.iter().any(|e| e.code.starts_with("rego_")) {
            return Err(EngineError::Prepare(message));
        }
        return Err(EngineError::Run(message));
    }

    Ok(EngineOutput {
        results: parsed.result,
        trace: parsed.explanation,
    })
}
