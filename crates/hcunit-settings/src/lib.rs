//! Config parsing and override resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{HcunitConfigV1, SCHEMA_CONFIG_V1};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `hcunit.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<HcunitConfigV1> {
    let cfg: HcunitConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective run settings (CLI overrides, then file, then defaults).
pub fn resolve_config(cfg: HcunitConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
