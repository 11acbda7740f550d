//! IO adapters: validate paths, read values and templates, drive `helm` and `opa`.
//!
//! This crate is allowed to do filesystem IO and spawn external processes.
//! Policy decisions stay in `hcunit-domain`.

#![forbid(unsafe_code)]

mod helm;
mod opa;
mod paths;
mod templates;
mod values;

pub use helm::{HelmCli, split_helm_output};
pub use opa::{OpaCli, parse_eval_output};
pub use paths::{validate_file_path, validate_policy_path, validate_template_root};
pub use templates::walk_templates;
pub use values::read_values_sources;
