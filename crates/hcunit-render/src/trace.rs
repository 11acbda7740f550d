use crate::{RenderableTrace, RenderableTraceEvent};
use std::collections::HashMap;

/// Pretty-print evaluation traces, one block per query.
///
/// Events are indented by the depth of their query in the parent chain,
/// so nested rule evaluations read like a call tree.
pub fn render_trace(traces: &[RenderableTrace]) -> String {
    let mut out = String::new();
    for (i, trace) in traces.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("# {}\n", trace.query));

        let mut depths: HashMap<u64, usize> = HashMap::new();
        for event in &trace.events {
            let depth = depth_of(&mut depths, event);
            let mut line = format!("{}{}", "| ".repeat(depth), event.op);
            if let Some(message) = &event.message {
                line.push(' ');
                line.push_str(message);
            }
            if let Some(location) = &event.location {
                line.push_str(&format!(" ({location})"));
            }
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

fn depth_of(depths: &mut HashMap<u64, usize>, event: &RenderableTraceEvent) -> usize {
    if let Some(depth) = depths.get(&event.query_id) {
        return *depth;
    }
    let depth = if event.query_id == event.parent_id {
        0
    } else {
        depths.get(&event.parent_id).map_or(0, |d| d + 1)
    };
    depths.insert(event.query_id, depth);
    depth
}
