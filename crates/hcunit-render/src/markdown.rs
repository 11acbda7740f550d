use crate::{RenderableOutcome, RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# hcunit report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Fail => "FAIL",
        RenderableVerdictStatus::Error => "ERROR",
    };
    let passed = report
        .tests
        .iter()
        .filter(|t| t.outcome == RenderableOutcome::Pass)
        .count();
    out.push_str(&format!(
        "- Verdict: **{}**\n- Namespace: `{}`\n- Tests: {} passed / {} total\n\n",
        verdict,
        report.namespace,
        passed,
        report.tests.len()
    ));

    if let Some(err) = &report.error {
        out.push_str(&format!("> Error (`{}`): {}\n\n", err.kind, err.message));
    }

    if report.tests.is_empty() {
        out.push_str("No tests evaluated.\n");
        return out;
    }

    out.push_str("## Tests\n\n| Outcome | Query |\n|---|---|\n");
    for t in &report.tests {
        out.push_str(&format!(
            "| {} | `{}` |\n",
            t.outcome.label(),
            t.query.replace('|', "\\|")
        ));
    }

    out
}
