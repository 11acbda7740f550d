use anyhow::Context;
use hcunit_domain::{ConfigDocument, HcunitError, RenderedFiles, TemplateRenderer};
use hcunit_types::TemplatePath;
use hcunit_types::ids::DOCUMENT_SEPARATOR;
use std::collections::BTreeMap;
use std::process::Command;

const CHART_NAME: &str = "hcunit";
const RELEASE_NAME: &str = "hcunit-name";
const RELEASE_NAMESPACE: &str = "hcunit-namespace";
const SOURCE_PREFIX: &str = "# Source: hcunit/templates/";

/// `TemplateRenderer` backed by the `helm` executable.
///
/// Each render writes a throwaway chart to a temp directory and runs
/// `helm template` against it.
///
/// Only what `helm template` prints comes back: `NOTES.txt`, partials and
/// templates that render to nothing never reach the normalizer. The raw-text
/// path of the normalizer is still taken by any non-YAML template that helm
/// emits with a `# Source:` marker, and by other renderers.
#[derive(Clone, Debug)]
pub struct HelmCli {
    bin: String,
}

impl HelmCli {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

impl Default for HelmCli {
    fn default() -> Self {
        Self::new("helm")
    }
}

impl TemplateRenderer for HelmCli {
    fn render(
        &self,
        templates: &BTreeMap<TemplatePath, String>,
        values: &ConfigDocument,
    ) -> anyhow::Result<RenderedFiles> {
        let chart = tempfile::Builder::new()
            .prefix("hcunit-chart-")
            .tempdir()
            .context("create chart directory")?;
        let root = chart.path();

        std::fs::write(
            root.join("Chart.yaml"),
            format!("apiVersion: v2\nname: {CHART_NAME}\nversion: 0.1.0\n"),
        )
        .context("write Chart.yaml")?;
        let values_yaml = serde_yaml::to_string(values).context("serialize values")?;
        std::fs::write(root.join("values.yaml"), values_yaml).context("write values.yaml")?;

        let dir = root.join("templates");
        for (path, text) in templates {
            let dest = dir.join(path.as_str());
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
            std::fs::write(&dest, text)
                .with_context(|| format!("write template {}", path.as_str()))?;
        }

        tracing::debug!(bin = %self.bin, templates = templates.len(), "running helm template");
        let output = Command::new(&self.bin)
            .arg("template")
            .arg(RELEASE_NAME)
            .arg(root)
            .args(["--namespace", RELEASE_NAMESPACE])
            .output()
            .with_context(|| format!("spawn {}", self.bin))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(HcunitError::Render {
                message: if stderr.is_empty() {
                    format!("{} exited with {}", self.bin, output.status)
                } else {
                    stderr
                },
            }
            .into());
        }

        Ok(split_helm_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Split `helm template` output back into per-template text.
///
/// Documents without a `# Source:` marker for this chart are dropped. Several
/// documents from the same template are re-joined with the document separator.
pub fn split_helm_output(stdout: &str) -> RenderedFiles {
    let mut chunks: BTreeMap<TemplatePath, Vec<String>> = BTreeMap::new();
    let mut current: Option<(TemplatePath, Vec<&str>)> = None;

    let mut flush = |current: &mut Option<(TemplatePath, Vec<&str>)>| {
        if let Some((path, lines)) = current.take() {
            chunks.entry(path).or_default().push(lines.join("\n"));
        }
    };

    for line in stdout.lines() {
        if line.trim_end() == "---" {
            flush(&mut current);
        } else if let Some(path) = line.strip_prefix(SOURCE_PREFIX) {
            flush(&mut current);
            current = Some((TemplatePath::new(path.trim()), Vec::new()));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }
    flush(&mut current);

    chunks
        .into_iter()
        .map(|(path, docs)| (path, docs.join(DOCUMENT_SEPARATOR)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_by_source_marker() {
        let out = "---\n# Source: hcunit/templates/deployment.yaml\nkind: Deployment\nspec:\n  replicas: 3\n---\n# Source: hcunit/templates/nested/svc.yaml\nkind: Service\n";
        let files = split_helm_output(out);
        assert_eq!(files.len(), 2);
        assert_eq!(
            files[&TemplatePath::new("deployment.yaml")],
            "kind: Deployment\nspec:\n  replicas: 3"
        );
        assert_eq!(files[&TemplatePath::new("nested/svc.yaml")], "kind: Service");
    }

    #[test]
    fn rejoins_documents_of_one_template() {
        let out = "---\n# Source: hcunit/templates/multi.yaml\na: 1\n---\n# Source: hcunit/templates/multi.yaml\nb: 2\n";
        let files = split_helm_output(out);
        assert_eq!(files[&TemplatePath::new("multi.yaml")], "a: 1\n---\nb: 2");
    }

    #[test]
    fn drops_text_outside_chart_sources() {
        let out = "WARNING: something\n---\n# Source: other/templates/x.yaml\nx: 1\n";
        assert!(split_helm_output(out).is_empty());
    }

    #[test]
    fn empty_output_is_empty() {
        assert!(split_helm_output("").is_empty());
    }
}
