mod actor;
mod messages;

use self::{actor::JobRegistry, messages::RegistryMessage};
use crate::errors::{LookupResult, StateResult};
use crate::model::{Build, BuildResult, ExecutionHandle, JobSnapshot, QueueEntry};
use crate::types::{BuildNumber, JobName, LogBlob};
use tokio::sync::{mpsc, oneshot};

/// A `JobRegistry` holding every job's build history, queue slot and
/// execution slot.
///
/// This struct is actually an actor handle, the real work is done in the
/// actor spawned by `JobRegistryHandle::spawn`. Because one actor task owns
/// all job state, transitions are serialized per job and `snapshot` returns
/// an internally consistent view, without an `Arc<Mutex>` in sight. The
/// handle is freely cloneable across tasks.
#[derive(Clone)]
pub struct JobRegistryHandle {
    sender: mpsc::Sender<RegistryMessage>,
}

impl JobRegistryHandle {
    /// Spawn a new registry.
    ///
    /// Specify the capacity for the registry's message queue. This limits
    /// the build-up of inbound messages.
    pub fn spawn(message_capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(message_capacity);
        JobRegistry::spawn(receiver);
        Self { sender }
    }

    /// Register a new job with no builds. The name is stored verbatim;
    /// empty and whitespace-only names are legal, distinct keys.
    pub async fn create_job(&self, name: impl Into<JobName>) -> StateResult<()> {
        self.call(|response| RegistryMessage::CreateJob {
            name: name.into(),
            response,
        })
        .await
    }

    pub async fn job_exists(&self, name: &str) -> bool {
        self.call(|response| RegistryMessage::JobExists {
            name: name.to_string(),
            response,
        })
        .await
    }

    /// Consistent point-in-time copy of the job's state, or `None` if no
    /// such job exists.
    pub async fn snapshot(&self, name: &str) -> Option<JobSnapshot> {
        self.call(|response| RegistryMessage::Snapshot {
            name: name.to_string(),
            response,
        })
        .await
    }

    pub async fn get_build(
        &self,
        name: &str,
        number: BuildNumber,
    ) -> LookupResult<Option<Build>> {
        self.call(|response| RegistryMessage::GetBuild {
            name: name.to_string(),
            number,
            response,
        })
        .await
    }

    /// Highest completed build number, 0 when the job has no builds.
    pub async fn last_completed_number(&self, name: &str) -> LookupResult<BuildNumber> {
        self.call(|response| RegistryMessage::GetLastCompleted {
            name: name.to_string(),
            response,
        })
        .await
    }

    pub async fn queue_entry(&self, name: &str) -> LookupResult<Option<QueueEntry>> {
        self.call(|response| RegistryMessage::GetQueueEntry {
            name: name.to_string(),
            response,
        })
        .await
    }

    pub async fn execution(&self, name: &str) -> LookupResult<Option<ExecutionHandle>> {
        self.call(|response| RegistryMessage::GetExecution {
            name: name.to_string(),
            response,
        })
        .await
    }

    /// Place the job in the pending queue. At most one entry per job.
    pub async fn enqueue(&self, name: &str) -> StateResult<QueueEntry> {
        self.call(|response| RegistryMessage::Enqueue {
            name: name.to_string(),
            response,
        })
        .await
    }

    /// Move the job onto an execution slot, consuming its queue entry if
    /// one is pending. The returned handle is bound to the build number
    /// the execution will produce.
    pub async fn begin_build(&self, name: &str) -> StateResult<ExecutionHandle> {
        self.call(|response| RegistryMessage::BeginBuild {
            name: name.to_string(),
            response,
        })
        .await
    }

    /// Complete the in-flight execution, making its build record durable.
    pub async fn finish_build(
        &self,
        name: &str,
        result: BuildResult,
        log: LogBlob,
    ) -> StateResult<Build> {
        self.call(|response| RegistryMessage::FinishBuild {
            name: name.to_string(),
            result,
            log,
            response,
        })
        .await
    }

    async fn call<T>(&self, msg: impl FnOnce(oneshot::Sender<T>) -> RegistryMessage) -> T {
        let (tx, rx) = oneshot::channel();
        self.sender.send(msg(tx)).await.expect("JobRegistry exited");
        rx.await.expect("JobRegistry exited")
    }
}
