use buildlib::{JobRegistry, ViewStore};
use std::sync::Arc;

/// Shared state every command runs against: the job registry handle and
/// the view store. Cheap to clone; commands of different invocations
/// never block each other's dispatch.
#[derive(Clone)]
pub struct Context {
    registry: JobRegistry,
    views: Arc<ViewStore>,
}

impl Context {
    /// Specify the capacity for the registry's message queue, as with
    /// `JobRegistry::spawn`.
    pub fn new(message_capacity: usize) -> Self {
        Self {
            registry: JobRegistry::spawn(message_capacity),
            views: Arc::new(ViewStore::new()),
        }
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    pub fn views(&self) -> &ViewStore {
        &self.views
    }
}
