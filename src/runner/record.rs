use ahash::AHashMap;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::graph::ComponentId;

/// The state machine of one run:
/// `Pending -> Running -> {Completed | Failed | Stopped}`.
/// The three right-hand states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Stopped,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed | RunStatus::Stopped)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            RunStatus::Pending => "pending",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Stopped => "stopped",
        };
        write!(f, "{}", tag)
    }
}

/// What one component produced during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentResult {
    pub success: bool,
    pub outputs: AHashMap<String, serde_json::Value>,
    pub error: Option<String>,
}

impl ComponentResult {
    pub fn succeeded(outputs: AHashMap<String, serde_json::Value>) -> Self {
        Self {
            success: true,
            outputs,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            outputs: AHashMap::new(),
            error: Some(message.into()),
        }
    }
}

/// Everything recorded about one end-to-end execution attempt.
///
/// Owned by the run that created it and mutated only by that run's driver;
/// retained until the caller discards it. On a failed run the results map
/// holds every component that finished before (and including) the failure,
/// so partial progress stays inspectable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    pub id: String,
    pub status: RunStatus,
    /// Fraction of components finished, in `[0.0, 1.0]`.
    pub progress: f64,
    pub results: AHashMap<ComponentId, ComponentResult>,
    /// Run-level failure description: the validation summary, the failing
    /// component's message, or an internal fault.
    pub error: Option<String>,
}

impl RunRecord {
    pub(crate) fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            status: RunStatus::Pending,
            progress: 0.0,
            results: AHashMap::new(),
            error: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == RunStatus::Completed
    }
}
