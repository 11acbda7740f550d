//! Use case orchestration for hcunit.
//!
//! This crate provides the application layer: use cases that coordinate the domain, io, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and output sinks.

#![forbid(unsafe_code)]

mod discover;
mod eval;
mod render;
mod report;

pub use discover::{DiscoverOutput, run_discover};
pub use eval::{EvalInput, EvalOutput, run_eval};
pub use render::{
    render_duplicates, render_markdown, render_text_report, render_trace, to_renderable,
};
pub use report::{
    build_report, error_exit_code, error_report, serialize_report, verdict_exit_code,
    write_report, write_text,
};
