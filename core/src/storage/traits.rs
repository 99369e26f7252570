use crate::model::task::Task;

/// Persistence seam for the task store.
///
/// Both operations are infallible by contract: a backend that cannot read
/// reports an empty list, and a backend that cannot write drops the write.
/// Failures are logged at the backend, never surfaced, so the in-memory
/// store stays usable for the rest of the session either way.
pub trait TaskStorage {
    fn load(&self) -> Vec<Task>;
    fn save(&self, tasks: &[Task]);
}
