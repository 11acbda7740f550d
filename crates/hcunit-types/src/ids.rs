//! Stable names shared by every layer.
//!
//! Error kinds are snake_case and appear verbatim in the JSON report.

/// Namespace queried when the caller does not name one.
pub const DEFAULT_NAMESPACE: &str = "main";

/// Top-level input key holding the merged values document.
pub const VALUES_KEY: &str = "values";

/// Values source token meaning "read standard input".
pub const STDIN_TOKEN: &str = "-";

/// Separator between documents inside one rendered YAML file.
pub const DOCUMENT_SEPARATOR: &str = "\n---\n";

/// Extensions treated as structured YAML documents by the normalizer.
pub const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

// Error kinds
pub const ERR_EMPTY_PATH: &str = "empty_path";
pub const ERR_UNEXPECTED_DIRECTORY: &str = "unexpected_directory";
pub const ERR_INVALID_POLICY_PATH: &str = "invalid_policy_path";
pub const ERR_STDIN_REUSED: &str = "stdin_reused";
pub const ERR_PARSE: &str = "parse_error";
pub const ERR_NORMALIZE: &str = "normalize_error";
pub const ERR_RENDER: &str = "render_error";
pub const ERR_DUPLICATE_TESTS: &str = "duplicate_tests";
pub const ERR_NO_MATCHING_TESTS: &str = "no_matching_tests";
pub const ERR_EVAL_PREPARE: &str = "eval_prepare_error";
pub const ERR_EVAL_RUN: &str = "eval_run_error";
pub const ERR_ENGINE: &str = "engine_error";
pub const ERR_POLICY_VIOLATION: &str = "policy_violation";
pub const ERR_RUNTIME: &str = "runtime_error";
