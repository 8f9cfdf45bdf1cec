use crate::errors::{LookupResult, StateResult};
use crate::model::{Build, BuildResult, ExecutionHandle, JobSnapshot, QueueEntry};
use crate::types::{BuildNumber, JobName, LogBlob};
use tokio::sync::oneshot;

#[derive(Debug)]
pub enum RegistryMessage {
    CreateJob {
        name: JobName,
        response: oneshot::Sender<StateResult<()>>,
    },
    JobExists {
        name: JobName,
        response: oneshot::Sender<bool>,
    },
    Snapshot {
        name: JobName,
        response: oneshot::Sender<Option<JobSnapshot>>,
    },
    GetBuild {
        name: JobName,
        number: BuildNumber,
        response: oneshot::Sender<LookupResult<Option<Build>>>,
    },
    GetLastCompleted {
        name: JobName,
        response: oneshot::Sender<LookupResult<BuildNumber>>,
    },
    GetQueueEntry {
        name: JobName,
        response: oneshot::Sender<LookupResult<Option<QueueEntry>>>,
    },
    GetExecution {
        name: JobName,
        response: oneshot::Sender<LookupResult<Option<ExecutionHandle>>>,
    },
    Enqueue {
        name: JobName,
        response: oneshot::Sender<StateResult<QueueEntry>>,
    },
    BeginBuild {
        name: JobName,
        response: oneshot::Sender<StateResult<ExecutionHandle>>,
    },
    FinishBuild {
        name: JobName,
        result: BuildResult,
        log: LogBlob,
        response: oneshot::Sender<StateResult<Build>>,
    },
}
