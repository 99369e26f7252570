use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::task::{Priority, Task, TaskPatch};
use crate::storage::TaskStorage;

/// Hard ceiling on the number of tasks. Product decision: the list is meant
/// to stay short enough to finish.
pub const MAX_TASKS: usize = 5;

/// Single source of truth for the task list. Every successful mutation is
/// written through to the storage backend; reads are served from memory.
pub struct TaskStore<S: TaskStorage> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: TaskStorage> TaskStore<S> {
    /// Builds the store from whatever the backend has persisted.
    pub fn new(storage: S) -> Self {
        let tasks = storage.load();
        Self { storage, tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn can_add_more(&self) -> bool {
        self.tasks.len() < MAX_TASKS
    }

    /// Adds a task. Returns `false` without mutating anything when the title
    /// is empty after trimming or the list is already at `MAX_TASKS`.
    pub fn add(
        &mut self,
        title: &str,
        description: Option<String>,
        priority: Priority,
        end_date: Option<DateTime<Utc>>,
    ) -> bool {
        let title = title.trim();
        if title.is_empty() || !self.can_add_more() {
            return false;
        }
        self.tasks
            .push(Task::new(title.to_string(), description, priority, end_date));
        self.storage.save(&self.tasks);
        true
    }

    /// Applies a partial update to the task with the given id; no-op when the
    /// id is unknown. `updated_at` is refreshed on every match, identical
    /// field values included. A patch title that trims empty is dropped so a
    /// task can never end up untitled.
    pub fn update(&mut self, id: &Uuid, patch: TaskPatch) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == *id) else {
            return;
        };

        if let Some(title) = patch.title {
            let title = title.trim();
            if !title.is_empty() {
                task.title = title.to_string();
            }
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(end_date) = patch.end_date {
            task.end_date = end_date;
        }
        task.updated_at = Utc::now();

        self.storage.save(&self.tasks);
    }

    /// Flips the completion flag; no-op when the id is unknown.
    pub fn toggle(&mut self, id: &Uuid) {
        let Some(completed) = self
            .tasks
            .iter()
            .find(|t| t.id == *id)
            .map(|t| t.completed)
        else {
            return;
        };
        self.update(id, TaskPatch::completed(!completed));
    }

    /// Removes the task with the given id; no-op (and no write) when unknown.
    pub fn delete(&mut self, id: &Uuid) {
        let initial_len = self.tasks.len();
        self.tasks.retain(|t| t.id != *id);
        if self.tasks.len() != initial_len {
            self.storage.save(&self.tasks);
        }
    }

    /// Snapshot of the list in display order.
    pub fn sorted_tasks(&self) -> Vec<Task> {
        let mut tasks = self.tasks.clone();
        sort_for_display(&mut tasks);
        tasks
    }
}

/// Display order: incomplete tasks first, then by priority rank within each
/// group. The sort is stable, so ties keep their stored order.
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by_key(|t| (t.completed, t.priority.rank()));
}
