#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableOutcome {
    Pass,
    Fail,
}

impl RenderableOutcome {
    pub fn label(self) -> &'static str {
        match self {
            RenderableOutcome::Pass => "PASS",
            RenderableOutcome::Fail => "FAIL",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Fail,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableTest {
    pub query: String,
    pub outcome: RenderableOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableError {
    pub kind: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub namespace: String,
    pub verdict: RenderableVerdictStatus,
    /// In report order.
    pub tests: Vec<RenderableTest>,
    pub error: Option<RenderableError>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableTraceEvent {
    pub op: String,
    pub query_id: u64,
    pub parent_id: u64,
    /// `file:row:col`, already formatted.
    pub location: Option<String>,
    pub message: Option<String>,
}

/// Trace of one query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableTrace {
    pub query: String,
    pub events: Vec<RenderableTraceEvent>,
}
