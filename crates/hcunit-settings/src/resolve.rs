use crate::model::{HcunitConfigV1, SCHEMA_CONFIG_V1};
use anyhow::Context;
use hcunit_types::ids::DEFAULT_NAMESPACE;

/// Values taken from the command line; `None`/empty means "not given".
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub namespace: Option<String>,
    pub opa: Option<String>,
    pub helm: Option<String>,
    pub values: Vec<String>,
    pub report_out: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub namespace: String,
    pub opa: String,
    pub helm: String,
    pub values: Vec<String>,
    pub report_out: Option<String>,
}

pub fn resolve_config(
    cfg: HcunitConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let namespace = non_blank(overrides.namespace)
        .or_else(|| non_blank(cfg.namespace))
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
    validate_namespace(&namespace).with_context(|| format!("invalid namespace: {namespace:?}"))?;

    let values = if overrides.values.is_empty() {
        cfg.values
    } else {
        overrides.values
    };

    Ok(ResolvedConfig {
        namespace,
        opa: overrides.opa.or(cfg.opa).unwrap_or_else(|| "opa".to_string()),
        helm: overrides.helm.or(cfg.helm).unwrap_or_else(|| "helm".to_string()),
        values,
        report_out: overrides.report_out.or(cfg.report_out),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A package path: dot-separated identifiers (`main`, `policies.k8s`).
fn validate_namespace(ns: &str) -> anyhow::Result<()> {
    for segment in ns.split('.') {
        let mut chars = segment.chars();
        let Some(first) = chars.next() else {
            anyhow::bail!("empty package segment");
        };
        if !(first.is_ascii_alphabetic() || first == '_') {
            anyhow::bail!("segment {segment:?} must start with a letter or underscore");
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            anyhow::bail!("segment {segment:?} contains characters outside [A-Za-z0-9_]");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let resolved = resolve_config(HcunitConfigV1::default(), Overrides::default())
            .expect("resolve");
        assert_eq!(
            resolved,
            ResolvedConfig {
                namespace: "main".to_string(),
                opa: "opa".to_string(),
                helm: "helm".to_string(),
                values: Vec::new(),
                report_out: None,
            }
        );
    }

    #[test]
    fn file_values_fill_gaps() {
        let cfg = parse_config_toml(
            r#"
schema = "hcunit.config.v1"
namespace = "policies.k8s"
opa = "/opt/opa"
values = ["base.yaml", "ci.yaml"]
report_out = "out/report.json"
"#,
        )
        .expect("parse");
        let resolved = resolve_config(cfg, Overrides::default()).expect("resolve");
        assert_eq!(resolved.namespace, "policies.k8s");
        assert_eq!(resolved.opa, "/opt/opa");
        assert_eq!(resolved.helm, "helm");
        assert_eq!(resolved.values, vec!["base.yaml", "ci.yaml"]);
        assert_eq!(resolved.report_out.as_deref(), Some("out/report.json"));
    }

    #[test]
    fn cli_overrides_win() {
        let cfg = parse_config_toml("namespace = \"file\"\nvalues = [\"file.yaml\"]\n")
            .expect("parse");
        let overrides = Overrides {
            namespace: Some("cli".to_string()),
            values: vec!["-".to_string()],
            ..Overrides::default()
        };
        let resolved = resolve_config(cfg, overrides).expect("resolve");
        assert_eq!(resolved.namespace, "cli");
        assert_eq!(resolved.values, vec!["-"]);
    }

    #[test]
    fn rejects_unknown_schema() {
        let cfg = parse_config_toml("schema = \"hcunit.config.v9\"\n").expect("parse");
        let err = resolve_config(cfg, Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("unsupported config schema"));
    }

    #[test]
    fn rejects_malformed_namespace() {
        for bad in ["a..b", ".main", "9lives", "has-dash"] {
            let overrides = Overrides {
                namespace: Some(bad.to_string()),
                ..Overrides::default()
            };
            let err = resolve_config(HcunitConfigV1::default(), overrides).unwrap_err();
            assert!(
                err.to_string().contains("invalid namespace"),
                "namespace {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn blank_namespace_counts_as_unset() {
        let overrides = Overrides {
            namespace: Some(String::new()),
            ..Overrides::default()
        };
        let resolved = resolve_config(HcunitConfigV1::default(), overrides).expect("resolve");
        assert_eq!(resolved.namespace, "main");

        let cfg = parse_config_toml("namespace = \"policies\"\n").expect("parse");
        let overrides = Overrides {
            namespace: Some("  ".to_string()),
            ..Overrides::default()
        };
        let resolved = resolve_config(cfg, overrides).expect("resolve");
        assert_eq!(resolved.namespace, "policies");

        let cfg = parse_config_toml("namespace = \"\"\n").expect("parse");
        let resolved = resolve_config(cfg, Overrides::default()).expect("resolve");
        assert_eq!(resolved.namespace, "main");
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        assert!(parse_config_toml("namespcae = \"typo\"\n").is_err());
    }
}
