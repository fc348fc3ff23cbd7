// Filter criteria and the visible-task derivation

use crate::models::Task;
use crate::record::{IndexValue, Record};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Predicate on a single indexed field
#[derive(Debug, Clone)]
pub struct Filter {
    /// Field name to filter on
    pub field: String,
    /// Comparison operator
    pub op: FilterOp,
    /// Value to compare against
    pub value: IndexValue,
}

/// Comparison operators for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq, // ==
}

impl Filter {
    /// Check a record against this predicate. A record lacking the field never matches.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let fields = record.indexed_fields();
        let Some(actual) = fields.get(&self.field) else {
            return false;
        };

        match self.op {
            FilterOp::Eq => *actual == self.value,
        }
    }
}

impl std::fmt::Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterOp::Eq => write!(f, "="),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.value)
    }
}

/// Which subset of tasks the dashboard shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FilterCriterion {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterCriterion {
    /// Every criterion, in the order the filter bar shows them
    pub const ALL: [FilterCriterion; 3] = [FilterCriterion::All, FilterCriterion::Active, FilterCriterion::Completed];

    /// Label used by the filter bar
    pub fn label(self) -> &'static str {
        match self {
            FilterCriterion::All => "All",
            FilterCriterion::Active => "Active",
            FilterCriterion::Completed => "Completed",
        }
    }

    /// Compile the criterion into field predicates. `All` has none.
    pub fn filters(self) -> Vec<Filter> {
        let completed = |value: bool| Filter {
            field: "completed".to_string(),
            op: FilterOp::Eq,
            value: IndexValue::Bool(value),
        };

        match self {
            FilterCriterion::All => Vec::new(),
            FilterCriterion::Active => vec![completed(false)],
            FilterCriterion::Completed => vec![completed(true)],
        }
    }
}

impl std::fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterCriterion::All => write!(f, "all"),
            FilterCriterion::Active => write!(f, "active"),
            FilterCriterion::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for FilterCriterion {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FilterCriterion::All),
            "active" => Ok(FilterCriterion::Active),
            "completed" => Ok(FilterCriterion::Completed),
            other => Err(eyre!(
                "Invalid filter: {} (expected all, active or completed)",
                other
            )),
        }
    }
}

/// Derive the visible subset of `tasks` for `criterion`
///
/// Pure: the input is never touched and the output keeps the input order.
pub fn visible_tasks(tasks: &[Task], criterion: FilterCriterion) -> Vec<Task> {
    let filters = criterion.filters();
    tasks
        .iter()
        .filter(|task| filters.iter().all(|filter| filter.matches(*task)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Task> {
        let mut tasks = vec![
            Task::with_id("a", "Buy milk"),
            Task::with_id("b", "Call bank"),
            Task::with_id("c", "Fix bike"),
            Task::with_id("d", "Read book"),
        ];
        tasks[1].completed = true;
        tasks[3].completed = true;
        tasks
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_filter_matches() {
        let task = Task::with_id("a", "Buy milk");

        let open = Filter {
            field: "completed".to_string(),
            op: FilterOp::Eq,
            value: IndexValue::Bool(false),
        };
        assert!(open.matches(&task));

        let done = Filter {
            value: IndexValue::Bool(true),
            ..open
        };
        assert!(!done.matches(&task));
    }

    #[test]
    fn test_filter_missing_field_never_matches() {
        let filter = Filter {
            field: "priority".to_string(),
            op: FilterOp::Eq,
            value: IndexValue::Bool(false),
        };
        assert!(!filter.matches(&Task::with_id("a", "Buy milk")));
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(FilterOp::Eq.to_string(), "=");
        assert_eq!(FilterCriterion::Active.filters()[0].to_string(), "completed = false");
    }

    #[test]
    fn test_criterion_parse() {
        assert_eq!("all".parse::<FilterCriterion>().unwrap(), FilterCriterion::All);
        assert_eq!(" Active ".parse::<FilterCriterion>().unwrap(), FilterCriterion::Active);
        assert_eq!("COMPLETED".parse::<FilterCriterion>().unwrap(), FilterCriterion::Completed);
        assert!("done".parse::<FilterCriterion>().is_err());
    }

    #[test]
    fn test_criterion_default_and_serde() {
        assert_eq!(FilterCriterion::default(), FilterCriterion::All);
        assert_eq!(serde_json::to_string(&FilterCriterion::Completed).unwrap(), "\"completed\"");
        for criterion in FilterCriterion::ALL {
            assert_eq!(criterion.to_string().parse::<FilterCriterion>().unwrap(), criterion);
        }
    }

    #[test]
    fn test_visible_all_is_identity() {
        let tasks = sample();
        assert_eq!(visible_tasks(&tasks, FilterCriterion::All), tasks);
        assert!(visible_tasks(&[], FilterCriterion::All).is_empty());
    }

    #[test]
    fn test_visible_preserves_order() {
        let tasks = sample();
        assert_eq!(ids(&visible_tasks(&tasks, FilterCriterion::Active)), vec!["a", "c"]);
        assert_eq!(ids(&visible_tasks(&tasks, FilterCriterion::Completed)), vec!["b", "d"]);
    }

    #[test]
    fn test_active_and_completed_partition() {
        let tasks = sample();
        let active = visible_tasks(&tasks, FilterCriterion::Active);
        let completed = visible_tasks(&tasks, FilterCriterion::Completed);

        assert_eq!(active.len() + completed.len(), tasks.len());
        for task in &tasks {
            let hits = active.iter().chain(completed.iter()).filter(|t| *t == task).count();
            assert_eq!(hits, 1, "task {} should appear exactly once", task.id);
        }
    }

    #[test]
    fn test_visible_does_not_mutate_input() {
        let tasks = sample();
        let before = tasks.clone();
        let _ = visible_tasks(&tasks, FilterCriterion::Completed);
        let _ = visible_tasks(&tasks, FilterCriterion::Active);
        assert_eq!(tasks, before);
    }
}
