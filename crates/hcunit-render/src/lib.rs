//! Rendering utilities for terminal and CI surfaces.

#![forbid(unsafe_code)]

mod markdown;
mod model;
mod text;
mod trace;

pub use markdown::render_markdown;
pub use model::{
    RenderableError, RenderableOutcome, RenderableReport, RenderableTest, RenderableTrace,
    RenderableTraceEvent, RenderableVerdictStatus,
};
pub use text::{render_duplicates, render_text_report};
pub use trace::render_trace;
