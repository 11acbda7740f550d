use crate::TestId;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for hcunit reports.
pub const SCHEMA_REPORT_V1: &str = "hcunit.report.v1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Pass => "PASS",
            Outcome::Fail => "FAIL",
        }
    }
}

/// `error` means the run never produced a per-test table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Pass,
    Fail,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictSummary {
    pub status: VerdictStatus,
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub id: TestId,
    pub query: String,
    pub outcome: Outcome,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunError {
    /// One of the `ids::ERR_*` kinds.
    pub kind: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMeta {
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub duration_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEnvelope {
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    pub namespace: String,
    pub verdict: VerdictSummary,
    #[serde(default)]
    pub tests: Vec<TestRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RunError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn envelope_serializes_with_lowercase_enums_and_rfc3339() {
        let report = ReportEnvelope {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "hcunit".to_string(),
                version: "0.1.0".to_string(),
            },
            run: RunMeta {
                started_at: datetime!(2024-01-02 03:04:05 UTC),
                finished_at: datetime!(2024-01-02 03:04:06 UTC),
                duration_ms: 1000,
            },
            namespace: "main".to_string(),
            verdict: VerdictSummary {
                status: VerdictStatus::Fail,
                total: 1,
                passed: 0,
                failed: 1,
            },
            tests: vec![TestRecord {
                id: TestId::new("assert", "minReplicas"),
                query: "data.main.assert[minReplicas]".to_string(),
                outcome: Outcome::Fail,
            }],
            error: None,
        };

        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["run"]["started_at"], json!("2024-01-02T03:04:05Z"));
        assert_eq!(value["verdict"]["status"], json!("fail"));
        assert_eq!(value["tests"][0]["id"], json!("assert[minReplicas]"));
        assert_eq!(value["tests"][0]["outcome"], json!("fail"));
        assert!(value.get("error").is_none());

        let back: ReportEnvelope = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, report);
    }
}
