// Explicit application state handed to every consumer

use crate::events::Event;
use crate::filter::FilterCriterion;
use crate::models::Task;
use crate::store::TaskStore;
use crate::view::FilterView;
use eyre::{Result, eyre};
use std::rc::Rc;
use tracing::{debug, info};

/// The task store and the filter view, owned together
///
/// Consumers receive this by reference instead of looking state up implicitly.
/// It can only be obtained through `TaskContextBuilder::build`, which refuses
/// to produce a context with a missing piece.
#[derive(Debug)]
pub struct TaskContext {
    store: TaskStore,
    filter: FilterView,
}

/// Assembles a `TaskContext`, failing fast when a piece is missing
#[derive(Debug, Default)]
pub struct TaskContextBuilder {
    store: Option<TaskStore>,
    filter: Option<FilterView>,
}

impl TaskContextBuilder {
    pub fn store(mut self, store: TaskStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn filter(mut self, filter: FilterView) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn build(self) -> Result<TaskContext> {
        let store = self
            .store
            .ok_or_else(|| eyre!("TaskContext requires a TaskStore; none was provided"))?;
        let filter = self
            .filter
            .ok_or_else(|| eyre!("TaskContext requires a FilterView; none was provided"))?;

        info!(
            store = %store.id(),
            tasks = store.tasks().len(),
            filter = %filter.criterion(),
            "Task context ready"
        );
        Ok(TaskContext { store, filter })
    }
}

impl TaskContext {
    pub fn builder() -> TaskContextBuilder {
        TaskContextBuilder::default()
    }

    /// Context over `seed` with the default `all` criterion
    pub fn with_seed<I>(seed: I) -> Result<Self>
    where
        I: IntoIterator<Item = Task>,
    {
        Self::builder()
            .store(TaskStore::with_seed(seed)?)
            .filter(FilterView::default())
            .build()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore {
        &mut self.store
    }

    pub fn filter(&self) -> &FilterView {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut FilterView {
        &mut self.filter
    }

    pub fn add_task(&mut self, task: Task) -> Result<()> {
        self.store.add_task(task)
    }

    pub fn toggle_task(&mut self, id: &str) -> bool {
        self.store.toggle_task(id)
    }

    pub fn set_filter(&mut self, criterion: FilterCriterion) {
        self.filter.set_filter(criterion)
    }

    /// Tasks visible under the active criterion
    pub fn visible_tasks(&self) -> Rc<[Task]> {
        self.filter.visible_tasks(&self.store)
    }

    /// Apply one event. Only `Add` can fail.
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        debug!(%event, "dispatch");
        match event {
            Event::Toggle(id) => {
                self.toggle_task(&id);
            }
            Event::SetFilter(criterion) => self.set_filter(criterion),
            Event::Add(task) => self.add_task(task)?,
        }
        Ok(())
    }
}
