//! The `eval` use case: render templates and run every policy test against them.

use anyhow::Context;
use camino::Utf8Path;
use hcunit_domain::{
    ConfigDocument, HcunitError, PolicyEngine, SuiteReport, TemplateRenderer, assemble_input,
    merge_values, normalize_manifests, run_suite,
};
use std::io::Read;
use time::OffsetDateTime;

/// Input for the eval use case.
#[derive(Clone, Debug)]
pub struct EvalInput<'a> {
    /// Template directory, or a single template file.
    pub template: &'a Utf8Path,
    /// Values sources in merge order; `-` reads stdin.
    pub values: &'a [String],
    pub policy: &'a Utf8Path,
    pub namespace: &'a str,
}

/// Output from the eval use case.
///
/// A report with failed tests is still `Ok`; see [`SuiteReport::violation`].
#[derive(Clone, Debug)]
pub struct EvalOutput {
    pub suite: SuiteReport,
    /// Merged values the templates were rendered with.
    pub values: ConfigDocument,
    pub started_at: OffsetDateTime,
}

/// Run the eval use case end to end.
pub fn run_eval(
    input: &EvalInput<'_>,
    stdin: &mut dyn Read,
    renderer: &dyn TemplateRenderer,
    engine: &dyn PolicyEngine,
) -> anyhow::Result<EvalOutput> {
    let started_at = OffsetDateTime::now_utc();

    hcunit_io::validate_policy_path(input.policy)?;

    let sources = hcunit_io::read_values_sources(input.values, stdin)?;
    let values = merge_values(&sources)?;

    let templates = hcunit_io::walk_templates(input.template)
        .with_context(|| format!("load templates from {}", input.template))?;
    tracing::info!(
        templates = templates.len(),
        values_sources = sources.len(),
        "rendering templates"
    );

    let rendered = renderer
        .render(&templates, &values)
        .map_err(into_render_error)?;
    let manifests = normalize_manifests(&rendered)?;
    let document = assemble_input(manifests, values.clone());

    let suite = run_suite(engine, input.policy.as_str(), input.namespace, &document)?;
    tracing::info!(
        total = suite.total(),
        failed = suite.failed().len(),
        "evaluation finished"
    );

    Ok(EvalOutput {
        suite,
        values,
        started_at,
    })
}

/// Renderer failures always surface as `Render`, keeping the adapter's message.
fn into_render_error(err: anyhow::Error) -> anyhow::Error {
    if err.downcast_ref::<HcunitError>().is_some() {
        return err;
    }
    HcunitError::Render {
        message: format!("{err:#}"),
    }
    .into()
}
