use super::messages::RegistryMessage;
use crate::errors::{LookupError, LookupResult, StateError, StateResult};
use crate::model::{Build, BuildResult, ExecutionHandle, JobSnapshot, QueueEntry};
use crate::types::{BuildNumber, JobName, LogBlob};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::{mpsc, oneshot};

/// The mutable per-job triple: completed history, queue slot,
/// execution slot. The actor owning the map is the single point of
/// mutation, which is what gives every job serial state transitions
/// and every snapshot internal consistency.
struct JobState {
    builds: BTreeMap<BuildNumber, Build>,
    queue: Option<QueueEntry>,
    execution: Option<ExecutionHandle>,
    next_number: BuildNumber,
}

impl JobState {
    fn new() -> Self {
        Self {
            builds: BTreeMap::new(),
            queue: None,
            execution: None,
            next_number: 1,
        }
    }

    fn enqueue(&mut self) -> StateResult<QueueEntry> {
        if self.queue.is_some() {
            return Err(StateError::AlreadyQueued);
        }
        let entry = QueueEntry::new();
        self.queue = Some(entry);
        Ok(entry)
    }

    fn begin_build(&mut self) -> StateResult<ExecutionHandle> {
        if self.execution.is_some() {
            return Err(StateError::AlreadyRunning);
        }
        // a queued entry becomes this execution
        self.queue.take();
        let handle = ExecutionHandle {
            number: self.next_number,
        };
        self.next_number += 1;
        self.execution = Some(handle);
        Ok(handle)
    }

    fn finish_build(&mut self, result: BuildResult, log: LogBlob) -> StateResult<Build> {
        let handle = self.execution.take().ok_or(StateError::NotRunning)?;
        let build = Build {
            number: handle.number,
            result,
            log,
        };
        self.builds.insert(build.number, build.clone());
        Ok(build)
    }

    fn last_completed(&self) -> BuildNumber {
        self.builds.keys().next_back().copied().unwrap_or(0)
    }

    fn snapshot(&self, name: &str) -> JobSnapshot {
        JobSnapshot {
            name: name.to_string(),
            builds: self.builds.clone(),
            queue: self.queue,
            execution: self.execution,
        }
    }
}

pub struct JobRegistry {
    inbox: mpsc::Receiver<RegistryMessage>,
    jobs: HashMap<JobName, JobState>,
}

impl JobRegistry {
    pub fn spawn(inbox: mpsc::Receiver<RegistryMessage>) {
        let actor = Self {
            inbox,
            jobs: HashMap::new(),
        };
        tokio::spawn(async move { actor.run().await });
    }

    async fn run(mut self) {
        use self::RegistryMessage::*;
        while let Some(msg) = self.inbox.recv().await {
            match msg {
                CreateJob { name, response } => {
                    let _ = response.send(self.create_job(name));
                }
                JobExists { name, response } => {
                    let _ = response.send(self.jobs.contains_key(&name));
                }
                Snapshot { name, response } => {
                    let snapshot = self.jobs.get(&name).map(|state| state.snapshot(&name));
                    let _ = response.send(snapshot);
                }
                GetBuild {
                    name,
                    number,
                    response,
                } => {
                    let result = self
                        .job(&name)
                        .map(|state| state.builds.get(&number).cloned());
                    let _ = response.send(result);
                }
                GetLastCompleted { name, response } => {
                    let result = self.job(&name).map(JobState::last_completed);
                    let _ = response.send(result);
                }
                GetQueueEntry { name, response } => {
                    let result = self.job(&name).map(|state| state.queue);
                    let _ = response.send(result);
                }
                GetExecution { name, response } => {
                    let result = self.job(&name).map(|state| state.execution);
                    let _ = response.send(result);
                }
                Enqueue { name, response } => {
                    let _ = response.send(self.transition(&name, JobState::enqueue));
                }
                BeginBuild { name, response } => {
                    let _ = response.send(self.transition(&name, JobState::begin_build));
                }
                FinishBuild {
                    name,
                    result,
                    log,
                    response,
                } => {
                    let _ =
                        response.send(self.transition(&name, |state| state.finish_build(result, log)));
                }
            }
        }
    }

    fn create_job(&mut self, name: JobName) -> StateResult<()> {
        if self.jobs.contains_key(&name) {
            return Err(StateError::JobExists(name));
        }
        tracing::debug!(job = %name, "job created");
        self.jobs.insert(name, JobState::new());
        Ok(())
    }

    // names are looked up verbatim: no trimming, no normalization
    fn job(&self, name: &str) -> LookupResult<&JobState> {
        self.jobs
            .get(name)
            .ok_or_else(|| LookupError::NoSuchJob(name.to_string()))
    }

    fn transition<T>(
        &mut self,
        name: &str,
        apply: impl FnOnce(&mut JobState) -> StateResult<T>,
    ) -> StateResult<T> {
        let state = self
            .jobs
            .get_mut(name)
            .ok_or_else(|| StateError::NoSuchJob(name.to_string()))?;
        let outcome = apply(state);
        if outcome.is_ok() {
            tracing::debug!(job = %name, "job state transition");
        }
        outcome
    }
}
