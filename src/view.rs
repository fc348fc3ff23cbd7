// Filter view: the selected criterion plus a memoized visible-task derivation

use crate::filter::{FilterCriterion, visible_tasks};
use crate::models::Task;
use crate::store::TaskStore;
use crate::subscribe::{SubscriptionId, Subscribers};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;
use uuid::Uuid;

/// What a cached derivation was computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    store: Uuid,
    version: u64,
    criterion: FilterCriterion,
}

#[derive(Debug)]
struct CachedView {
    key: CacheKey,
    tasks: Rc<[Task]>,
}

/// Owner of the active filter criterion
#[derive(Debug, Default)]
pub struct FilterView {
    criterion: FilterCriterion,
    cache: RefCell<Option<CachedView>>,
    subscribers: Subscribers<FilterCriterion>,
}

impl FilterView {
    pub fn new(criterion: FilterCriterion) -> Self {
        Self {
            criterion,
            cache: RefCell::new(None),
            subscribers: Subscribers::new(),
        }
    }

    pub fn criterion(&self) -> FilterCriterion {
        self.criterion
    }

    /// Replace the active criterion
    ///
    /// Listeners only run when the value actually changes.
    pub fn set_filter(&mut self, criterion: FilterCriterion) {
        if self.criterion == criterion {
            debug!(%criterion, "set_filter: unchanged");
            return;
        }

        debug!(from = %self.criterion, to = %criterion, "set_filter: switching");
        self.criterion = criterion;
        self.subscribers.notify(&self.criterion);
    }

    /// Tasks of `store` matching the active criterion
    ///
    /// Memoized on (store identity, store version, criterion); the result is
    /// always what `visible_tasks` would compute from scratch.
    pub fn visible_tasks(&self, store: &TaskStore) -> Rc<[Task]> {
        let key = CacheKey {
            store: store.id(),
            version: store.version(),
            criterion: self.criterion,
        };

        if let Some(cached) = self.cache.borrow().as_ref()
            && cached.key == key
        {
            debug!(version = key.version, criterion = %key.criterion, "visible_tasks: cache hit");
            return Rc::clone(&cached.tasks);
        }

        let tasks: Rc<[Task]> = visible_tasks(store.tasks(), self.criterion).into();
        debug!(
            version = key.version,
            criterion = %key.criterion,
            count = tasks.len(),
            "visible_tasks: recomputed"
        );
        *self.cache.borrow_mut() = Some(CachedView {
            key,
            tasks: Rc::clone(&tasks),
        });
        tasks
    }

    /// Register a listener called with the new criterion whenever it changes
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FilterCriterion) + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_seed;

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_default_criterion_is_all() {
        assert_eq!(FilterView::default().criterion(), FilterCriterion::All);
    }

    #[test]
    fn test_seed_scenario() {
        let mut store = TaskStore::with_seed(default_seed()).unwrap();
        let mut view = FilterView::default();

        assert_eq!(titles(&view.visible_tasks(&store)), vec!["Initial Task"]);

        view.set_filter(FilterCriterion::Completed);
        assert!(view.visible_tasks(&store).is_empty());

        store.toggle_task("1");
        assert_eq!(titles(&view.visible_tasks(&store)), vec!["Initial Task"]);

        view.set_filter(FilterCriterion::Active);
        assert!(view.visible_tasks(&store).is_empty());
    }

    #[test]
    fn test_toggle_unknown_keeps_all_views() {
        let mut store = TaskStore::with_seed(default_seed()).unwrap();
        let mut view = FilterView::default();

        let before: Vec<Vec<Task>> = FilterCriterion::ALL
            .iter()
            .map(|c| {
                view.set_filter(*c);
                view.visible_tasks(&store).to_vec()
            })
            .collect();

        store.toggle_task("nonexistent");

        for (criterion, expected) in FilterCriterion::ALL.iter().zip(before) {
            view.set_filter(*criterion);
            assert_eq!(view.visible_tasks(&store).to_vec(), expected);
        }
    }

    #[test]
    fn test_set_filter_twice_is_idempotent() {
        let mut store = TaskStore::with_seed(default_seed()).unwrap();
        store.add_task(Task::with_id("2", "Second")).unwrap();
        store.toggle_task("2");

        let mut view = FilterView::default();
        view.set_filter(FilterCriterion::Completed);
        let once = view.visible_tasks(&store).to_vec();
        view.set_filter(FilterCriterion::Completed);
        let twice = view.visible_tasks(&store).to_vec();

        assert_eq!(once, twice);
        assert_eq!(titles(&twice), vec!["Second"]);
    }

    #[test]
    fn test_cache_reused_until_mutation() {
        let mut store = TaskStore::with_seed(default_seed()).unwrap();
        let view = FilterView::default();

        let first = view.visible_tasks(&store);
        let second = view.visible_tasks(&store);
        assert!(Rc::ptr_eq(&first, &second));

        store.toggle_task("1");
        let third = view.visible_tasks(&store);
        assert!(!Rc::ptr_eq(&first, &third));
        assert!(third[0].completed);
    }

    #[test]
    fn test_cache_never_stale_across_stores() {
        let a = TaskStore::with_seed(default_seed()).unwrap();
        let b = TaskStore::with_seed(vec![Task::with_id("x", "Other store")]).unwrap();
        assert_eq!(a.version(), b.version());

        let view = FilterView::default();
        assert_eq!(titles(&view.visible_tasks(&a)), vec!["Initial Task"]);
        assert_eq!(titles(&view.visible_tasks(&b)), vec!["Other store"]);
    }

    #[test]
    fn test_memoized_equals_fresh() {
        let mut store = TaskStore::new();
        for i in 0..6 {
            store.add_task(Task::with_id(i.to_string(), format!("Task {}", i))).unwrap();
        }
        store.toggle_task("1");
        store.toggle_task("4");

        let mut view = FilterView::default();
        for criterion in FilterCriterion::ALL {
            view.set_filter(criterion);
            let memo = view.visible_tasks(&store);
            let memo_again = view.visible_tasks(&store);
            let fresh = visible_tasks(store.tasks(), criterion);
            assert_eq!(memo.to_vec(), fresh);
            assert_eq!(memo_again.to_vec(), fresh);
        }
    }

    #[test]
    fn test_subscribers_notified_on_change_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut view = FilterView::default();

        let sink = Rc::clone(&seen);
        view.subscribe(move |c: &FilterCriterion| sink.borrow_mut().push(*c));

        view.set_filter(FilterCriterion::All);
        view.set_filter(FilterCriterion::Active);
        view.set_filter(FilterCriterion::Active);
        view.set_filter(FilterCriterion::Completed);

        assert_eq!(*seen.borrow(), vec![FilterCriterion::Active, FilterCriterion::Completed]);
    }
}
