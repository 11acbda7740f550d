use serde::{Deserialize, Serialize};

pub const SCHEMA_CONFIG_V1: &str = "hcunit.config.v1";

/// `hcunit.toml` schema v1. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HcunitConfigV1 {
    /// Optional schema string for tooling (`hcunit.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Policy package queried for tests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Policy engine executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opa: Option<String>,

    /// Template renderer executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helm: Option<String>,

    /// Values sources used when none are given on the command line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_out: Option<String>,
}
