//! Render use cases: domain results to text, trace and Markdown.

use hcunit_domain::{QueryResult, TraceEvent};
use hcunit_render::{
    RenderableError, RenderableOutcome, RenderableReport, RenderableTest, RenderableTrace,
    RenderableTraceEvent, RenderableVerdictStatus,
};
use hcunit_types::{Outcome, ReportEnvelope, TestId, VerdictStatus};

pub fn to_renderable(report: &ReportEnvelope) -> RenderableReport {
    RenderableReport {
        namespace: report.namespace.clone(),
        verdict: match report.verdict.status {
            VerdictStatus::Pass => RenderableVerdictStatus::Pass,
            VerdictStatus::Fail => RenderableVerdictStatus::Fail,
            VerdictStatus::Error => RenderableVerdictStatus::Error,
        },
        tests: report
            .tests
            .iter()
            .map(|t| RenderableTest {
                query: t.query.clone(),
                outcome: match t.outcome {
                    Outcome::Pass => RenderableOutcome::Pass,
                    Outcome::Fail => RenderableOutcome::Fail,
                },
            })
            .collect(),
        error: report.error.as_ref().map(|e| RenderableError {
            kind: e.kind.clone(),
            message: e.message.clone(),
        }),
    }
}

pub fn render_text_report(report: &ReportEnvelope) -> String {
    hcunit_render::render_text_report(&to_renderable(report))
}

pub fn render_markdown(report: &ReportEnvelope) -> String {
    hcunit_render::render_markdown(&to_renderable(report))
}

pub fn render_trace(results: &[QueryResult]) -> String {
    let traces: Vec<RenderableTrace> = results
        .iter()
        .map(|r| RenderableTrace {
            query: r.query.clone(),
            events: r.trace.iter().map(trace_event).collect(),
        })
        .collect();
    hcunit_render::render_trace(&traces)
}

pub fn render_duplicates(ids: &[TestId]) -> String {
    let ids: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();
    hcunit_render::render_duplicates(&ids)
}

fn trace_event(event: &TraceEvent) -> RenderableTraceEvent {
    RenderableTraceEvent {
        op: event.op.clone(),
        query_id: event.query_id,
        parent_id: event.parent_id,
        location: event.location.as_ref().map(|l| {
            if l.file.is_empty() {
                format!("{}:{}", l.row, l.col)
            } else {
                format!("{}:{}:{}", l.file, l.row, l.col)
            }
        }),
        message: event.message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_report;
    use hcunit_domain::{SuiteReport, TraceLocation};
    use time::OffsetDateTime;

    fn suite(outcome: Outcome) -> SuiteReport {
        let id = TestId::new("assert", "minReplicas");
        SuiteReport {
            namespace: "main".to_string(),
            results: vec![QueryResult {
                query: id.query("main"),
                id,
                outcome,
                results: Vec::new(),
                trace: vec![TraceEvent {
                    op: "Enter".to_string(),
                    query_id: 1,
                    parent_id: 1,
                    location: Some(TraceLocation {
                        file: "policy.rego".to_string(),
                        row: 3,
                        col: 1,
                    }),
                    message: None,
                }],
            }],
        }
    }

    #[test]
    fn failing_report_line() {
        let report = build_report(&suite(Outcome::Fail), OffsetDateTime::now_utc());
        let text = render_text_report(&report);
        assert!(text.starts_with("FAIL: data.main.assert[minReplicas]\n"));
        assert!(text.contains("[FAILURE] 1 of 1 test failed in namespace main"));
    }

    #[test]
    fn trace_block_is_headed_by_the_query() {
        let out = render_trace(&suite(Outcome::Pass).results);
        assert_eq!(
            out,
            "# data.main.assert[minReplicas]\nEnter (policy.rego:3:1)\n"
        );
    }

    #[test]
    fn duplicate_lines_name_each_identifier() {
        let out = render_duplicates(&[TestId::new("assert", "x")]);
        assert!(out.ends_with("DUPLICATE KEY: assert[x]\n"));
    }

    #[test]
    fn markdown_smoke() {
        let report = build_report(&suite(Outcome::Pass), OffsetDateTime::now_utc());
        let md = render_markdown(&report);
        assert!(md.contains("Verdict: **PASS**"));
    }
}
