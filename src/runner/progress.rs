use super::record::{RunRecord, RunStatus};

/// One status update emitted while a run is in flight.
///
/// Updates exist purely for display; consuming or ignoring them has no
/// effect on engine state.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub run_id: String,
    pub status: RunStatus,
    /// Fraction of components finished, in `[0.0, 1.0]`.
    pub progress: f64,
    /// Display name of the component the update refers to, when there is
    /// one.
    pub current_component: Option<String>,
}

/// Receives status updates and the terminal record of a run.
///
/// Passed to the driver by the caller; the engine keeps no subscriber state
/// of its own. Implementations must be `Send + Sync` so a run can be moved
/// onto a worker thread while its caller observes progress.
pub trait ProgressSink: Send + Sync {
    /// Called at component boundaries while the run is `Running`.
    fn on_update(&self, update: &ProgressUpdate);

    /// Called exactly once, after the run has reached a terminal status.
    fn on_finished(&self, record: &RunRecord);
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_update(&self, _update: &ProgressUpdate) {}

    fn on_finished(&self, _record: &RunRecord) {}
}
