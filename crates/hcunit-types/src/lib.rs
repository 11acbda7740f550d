//! Stable DTOs and IDs used across the hcunit workspace.
//!
//! This crate is intentionally boring:
//! - reserved names and constants shared by every layer
//! - the `TestId` key used for discovery and reporting
//! - canonical template-relative path handling
//! - the JSON report envelope

#![forbid(unsafe_code)]

pub mod ids;
pub mod path;
pub mod report;
pub mod test_id;

pub use path::TemplatePath;
pub use report::{
    Outcome, ReportEnvelope, RunError, RunMeta, SCHEMA_REPORT_V1, TestRecord, ToolMeta,
    VerdictStatus, VerdictSummary,
};
pub use test_id::TestId;
