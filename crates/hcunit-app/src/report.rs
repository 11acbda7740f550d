//! Report artifacts: the JSON envelope, file writers, and exit codes.

use anyhow::Context;
use camino::Utf8Path;
use hcunit_domain::{HcunitError, SuiteReport};
use hcunit_types::{
    ReportEnvelope, RunError, RunMeta, SCHEMA_REPORT_V1, TestRecord, ToolMeta, VerdictStatus,
    VerdictSummary, ids,
};
use time::OffsetDateTime;

/// Envelope for a run that reached the per-test table.
pub fn build_report(suite: &SuiteReport, started_at: OffsetDateTime) -> ReportEnvelope {
    let tests = suite
        .results
        .iter()
        .map(|r| TestRecord {
            id: r.id.clone(),
            query: r.query.clone(),
            outcome: r.outcome,
        })
        .collect();
    let error = suite.violation().map(|err| RunError {
        kind: err.kind().to_string(),
        message: err.to_string(),
    });

    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        run: run_meta(started_at),
        namespace: suite.namespace.clone(),
        verdict: suite.summary(),
        tests,
        error,
    }
}

/// Envelope for a run that stopped with an error before producing a verdict.
pub fn error_report(
    namespace: &str,
    err: &anyhow::Error,
    started_at: OffsetDateTime,
) -> ReportEnvelope {
    let kind = err
        .downcast_ref::<HcunitError>()
        .map_or(ids::ERR_RUNTIME, HcunitError::kind);

    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        run: run_meta(started_at),
        namespace: namespace.to_string(),
        verdict: VerdictSummary {
            status: VerdictStatus::Error,
            total: 0,
            passed: 0,
            failed: 0,
        },
        tests: Vec::new(),
        error: Some(RunError {
            kind: kind.to_string(),
            message: format!("{err:#}"),
        }),
    }
}

pub fn serialize_report(report: &ReportEnvelope) -> anyhow::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(report).context("serialize report")?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write the JSON report, creating parent directories as needed.
pub fn write_report(path: &Utf8Path, report: &ReportEnvelope) -> anyhow::Result<()> {
    write_text(path, &String::from_utf8_lossy(&serialize_report(report)?))
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write {path}"))?;
    Ok(())
}

/// 0 pass, 2 policy violation, 1 anything else.
pub fn verdict_exit_code(status: VerdictStatus) -> i32 {
    match status {
        VerdictStatus::Pass => 0,
        VerdictStatus::Fail => 2,
        VerdictStatus::Error => 1,
    }
}

pub fn error_exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<HcunitError>() {
        Some(e) if e.is_policy_violation() => 2,
        _ => 1,
    }
}

fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "hcunit".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn run_meta(started_at: OffsetDateTime) -> RunMeta {
    let finished_at = OffsetDateTime::now_utc();
    let duration_ms = (finished_at - started_at).whole_milliseconds().max(0) as u64;
    RunMeta {
        started_at,
        finished_at,
        duration_ms,
    }
}
