mod actors;
pub mod errors;
pub mod model;
pub mod types;
pub mod views;

// re-export the registry handle as if it is the job registry itself.
pub use actors::registry::JobRegistryHandle as JobRegistry;
pub use model::{Build, BuildResult, ExecutionHandle, JobSnapshot, QueueEntry};
pub use views::ViewStore;

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn basic() {
        let registry = JobRegistry::spawn(32);
        registry.create_job("aProject").await.expect("job create err");

        // queued -> executing -> completed, one serial build
        registry.enqueue("aProject").await.expect("enqueue err");
        let handle = registry.begin_build("aProject").await.expect("begin err");
        assert_eq!(handle.number, 1);
        let build = registry
            .finish_build("aProject", BuildResult::Success, Bytes::from_static(b"echo 1"))
            .await
            .expect("finish err");
        assert_eq!(build.number, 1);

        let snapshot = registry.snapshot("aProject").await.expect("job vanished");
        assert_eq!(snapshot.last_completed_number(), 1);
        assert!(snapshot.queue.is_none());
        assert!(snapshot.execution.is_none());
    }
}
