//! CLI entry point for hcunit.
//!
//! This module is intentionally thin: it handles argument parsing, output sinks, and exit codes.
//! All business logic lives in the `hcunit-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use hcunit_app::{
    EvalInput, build_report, error_exit_code, error_report, render_duplicates, render_markdown,
    render_text_report, render_trace, run_discover, run_eval, verdict_exit_code, write_report,
    write_text,
};
use hcunit_domain::HcunitError;
use hcunit_io::{HelmCli, OpaCli};
use hcunit_settings::{Overrides, ResolvedConfig};
use time::OffsetDateTime;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "hcunit",
    version,
    about = "Unit-test rendered Helm chart templates against Rego policies"
)]
struct Cli {
    /// Path to hcunit config TOML (a missing file means defaults).
    #[arg(long, default_value = "hcunit.toml", global = true)]
    config: Utf8PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render templates and evaluate every policy test against them.
    Eval {
        /// Template directory, or a single template file.
        #[arg(short = 't', long)]
        template: Utf8PathBuf,

        /// Values file(s) merged in order; `-` reads stdin (once).
        #[arg(short = 'c', long = "values")]
        values: Vec<String>,

        /// Rego policy file defining `expect[...]` / `assert[...]` rules.
        #[arg(short = 'p', long)]
        policy: Utf8PathBuf,

        /// Policy package to query (default: main).
        #[arg(short = 'n', long)]
        namespace: Option<String>,

        /// Print the evaluation trace before the report.
        #[arg(short = 'v', long)]
        verbose: bool,

        /// Policy engine executable.
        #[arg(long, env = "HCUNIT_OPA")]
        opa: Option<String>,

        /// Template renderer executable.
        #[arg(long, env = "HCUNIT_HELM")]
        helm: Option<String>,

        /// Where to write the JSON report.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Where to write a Markdown summary.
        #[arg(long)]
        markdown_out: Option<Utf8PathBuf>,
    },

    /// List the test rules a policy defines, without evaluating them.
    Discover {
        /// Rego policy file.
        #[arg(short = 'p', long)]
        policy: Utf8PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Eval {
            template,
            values,
            policy,
            namespace,
            verbose,
            opa,
            helm,
            report_out,
            markdown_out,
        } => {
            let overrides = Overrides {
                namespace,
                opa,
                helm,
                values,
                report_out: report_out.map(|p| p.to_string()),
            };
            cmd_eval(
                &cli.config,
                overrides,
                &template,
                &policy,
                verbose,
                markdown_out.as_deref(),
            )
        }
        Commands::Discover { policy } => cmd_discover(&cli.config, &policy),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HCUNIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let json = std::env::var("HCUNIT_LOG_JSON").is_ok_and(|v| v == "1" || v == "true");
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Load config if present; a missing file is allowed (defaults apply).
fn load_config(path: &Utf8Path, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let text = std::fs::read_to_string(path).unwrap_or_default();
    let cfg = if text.trim().is_empty() {
        hcunit_settings::HcunitConfigV1::default()
    } else {
        hcunit_settings::parse_config_toml(&text).with_context(|| format!("parse {path}"))?
    };
    hcunit_settings::resolve_config(cfg, overrides).context("resolve config")
}

fn cmd_eval(
    config: &Utf8Path,
    overrides: Overrides,
    template: &Utf8Path,
    policy: &Utf8Path,
    verbose: bool,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let started_at = OffsetDateTime::now_utc();
    let resolved = match load_config(config, overrides) {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("hcunit error: {err:#}");
            std::process::exit(1);
        }
    };
    let report_out = resolved.report_out.as_deref().map(Utf8Path::new);

    let renderer = HelmCli::new(resolved.helm.as_str());
    let engine = OpaCli::new(resolved.opa.as_str());
    let input = EvalInput {
        template,
        values: &resolved.values,
        policy,
        namespace: &resolved.namespace,
    };

    match run_eval(&input, &mut std::io::stdin().lock(), &renderer, &engine) {
        Ok(output) => {
            if verbose {
                print!("{}", render_trace(&output.suite.results));
                println!();
            }
            let report = build_report(&output.suite, output.started_at);
            print!("{}", render_text_report(&report));

            if let Some(path) = report_out {
                write_report(path, &report).context("write report json")?;
            }
            if let Some(path) = markdown_out {
                write_text(path, &render_markdown(&report)).context("write markdown")?;
            }

            let code = verdict_exit_code(report.verdict.status);
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = error_report(&resolved.namespace, &err, started_at);
            if let Some(path) = report_out {
                let _ = write_report(path, &report);
            }
            if let Some(path) = markdown_out {
                let _ = write_text(path, &render_markdown(&report));
            }

            if let Some(HcunitError::DuplicateTests { ids }) = err.downcast_ref::<HcunitError>() {
                eprint!("{}", render_duplicates(ids));
            } else {
                eprintln!("hcunit error: {err:#}");
            }
            std::process::exit(error_exit_code(&err));
        }
    }
}

fn cmd_discover(config: &Utf8Path, policy: &Utf8Path) -> anyhow::Result<()> {
    let resolved = match load_config(config, Overrides::default()) {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("hcunit error: {err:#}");
            std::process::exit(1);
        }
    };
    let engine = OpaCli::new(resolved.opa.as_str());

    let output = match run_discover(policy, &engine) {
        Ok(output) => output,
        Err(err) => {
            eprintln!("hcunit error: {err:#}");
            std::process::exit(1);
        }
    };

    if let Some(package) = &output.package {
        println!("package: {package}");
        if *package != resolved.namespace {
            tracing::warn!(
                package = %package,
                namespace = %resolved.namespace,
                "policy package differs from the configured namespace"
            );
        }
    }
    for (id, count) in &output.tests {
        println!("{id}\t{count}");
    }

    match output.problem() {
        None => Ok(()),
        Some(HcunitError::DuplicateTests { ids }) => {
            eprint!("{}", render_duplicates(&ids));
            std::process::exit(1);
        }
        Some(err) => {
            eprintln!("hcunit error: {err}");
            std::process::exit(1);
        }
    }
}
