use crate::{RenderableOutcome, RenderableReport, RenderableVerdictStatus};

/// One `PASS: <query>` / `FAIL: <query>` line per test, then a summary line.
pub fn render_text_report(report: &RenderableReport) -> String {
    let mut out = String::new();
    for t in &report.tests {
        out.push_str(&format!("{}: {}\n", t.outcome.label(), t.query));
    }

    let total = report.tests.len();
    let failed = report
        .tests
        .iter()
        .filter(|t| t.outcome == RenderableOutcome::Fail)
        .count();

    match (report.verdict, &report.error) {
        (RenderableVerdictStatus::Error, Some(err)) => {
            out.push_str(&format!("[FAILURE] {}\n", err.message));
        }
        (RenderableVerdictStatus::Pass, _) => {
            out.push_str(&format!(
                "[SUCCESS] {total} {} passed in namespace {}\n",
                plural(total),
                report.namespace
            ));
        }
        _ => {
            out.push_str(&format!(
                "[FAILURE] {failed} of {total} {} failed in namespace {}\n",
                plural(total),
                report.namespace
            ));
        }
    }
    out
}

/// Error block for duplicate test identifiers, one `DUPLICATE KEY` line each.
pub fn render_duplicates(ids: &[String]) -> String {
    let mut out = String::from("ERROR: duplicate test identifiers found in policy\n");
    for id in ids {
        out.push_str(&format!("DUPLICATE KEY: {id}\n"));
    }
    out
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "test" } else { "tests" }
}
