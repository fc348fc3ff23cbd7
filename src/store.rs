// Task store: the authoritative, insertion-ordered task collection

use crate::models::Task;
use crate::record::Record;
use crate::subscribe::{SubscriptionId, Subscribers};
use eyre::{Result, eyre};
use tracing::{debug, info};
use uuid::Uuid;

const MAX_ID_LEN: usize = 256;

/// Owner of the task collection and its two mutations
///
/// Every successful mutation bumps `version` before subscribers run, so a
/// listener (or a memoized view) always observes the fully applied state.
#[derive(Debug)]
pub struct TaskStore {
    id: Uuid,
    version: u64,
    tasks: Vec<Task>,
    subscribers: Subscribers<[Task]>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            version: 0,
            tasks: Vec::new(),
            subscribers: Subscribers::new(),
        }
    }

    /// Create a store pre-populated with `seed`, in order
    ///
    /// Seed tasks go through `add_task`, so a seed with duplicate or invalid ids is rejected.
    pub fn with_seed<I>(seed: I) -> Result<Self>
    where
        I: IntoIterator<Item = Task>,
    {
        let mut store = Self::new();
        for task in seed {
            store.add_task(task)?;
        }
        info!(store = %store.id, count = store.tasks.len(), "Task store seeded");
        Ok(store)
    }

    /// Identity of this store, stable for its whole lifetime
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Monotonic counter bumped by every mutation
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Current collection, in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a task to the end of the collection
    ///
    /// A task whose id is already present is rejected and the collection is left unchanged.
    pub fn add_task(&mut self, task: Task) -> Result<()> {
        Self::validate_id(task.id())?;

        if self.get(task.id()).is_some() {
            return Err(eyre!("Task with id {} already exists", task.id()));
        }

        debug!(id = task.id(), title = %task.title, "add_task: appending");
        self.tasks.push(task);
        self.commit();
        Ok(())
    }

    /// Flip the completion flag of the task with `id`
    ///
    /// Unknown ids are a no-op. Returns whether a task was toggled.
    pub fn toggle_task(&mut self, id: &str) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!(id, "toggle_task: no such task, ignoring");
            return false;
        };

        task.completed = !task.completed;
        debug!(id, completed = task.completed, "toggle_task: flipped");
        self.commit();
        true
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Register a listener called with the collection after every mutation
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[Task]) + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn commit(&mut self) {
        self.version += 1;
        self.subscribers.notify(&self.tasks);
    }

    /// Validate task ID
    fn validate_id(id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(eyre!("Task ID cannot be empty or whitespace-only"));
        }

        if id.len() > MAX_ID_LEN {
            return Err(eyre!("Task ID too long: {} chars (max {})", id.len(), MAX_ID_LEN));
        }

        Ok(())
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
