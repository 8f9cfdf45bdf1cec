use crate::types::{BuildNumber, JobName, LogBlob, QueueId};
use std::collections::BTreeMap;
use std::fmt;

/// Terminal verdict of a completed build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildResult {
    Success,
    Unstable,
    Failure,
    Aborted,
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildResult::Success => "SUCCESS",
            BuildResult::Unstable => "UNSTABLE",
            BuildResult::Failure => "FAILURE",
            BuildResult::Aborted => "ABORTED",
        };
        f.write_str(name)
    }
}

/// A completed build record. Immutable once created; numbers are
/// per-job monotonic starting at 1 and never reused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Build {
    pub number: BuildNumber,
    pub result: BuildResult,
    pub log: LogBlob,
}

/// A job waiting for a compute resource. Carries no build number yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueEntry {
    pub id: QueueId,
}

impl QueueEntry {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
        }
    }
}

impl Default for QueueEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// An in-flight build, bound to the number it will produce once the
/// record becomes durable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutionHandle {
    pub number: BuildNumber,
}

/// Point-in-time copy of one job's build history, queue slot and
/// execution slot, cloned out of the registry actor in a single
/// message turn. Readers of a snapshot can never observe a build
/// half-transitioned between states.
#[derive(Clone, Debug)]
pub struct JobSnapshot {
    pub name: JobName,
    pub builds: BTreeMap<BuildNumber, Build>,
    pub queue: Option<QueueEntry>,
    pub execution: Option<ExecutionHandle>,
}

impl JobSnapshot {
    /// Highest completed build number, 0 when the job has no builds.
    pub fn last_completed_number(&self) -> BuildNumber {
        self.builds.keys().next_back().copied().unwrap_or(0)
    }
}
