// User events that drive the store and the filter view

use crate::filter::FilterCriterion;
use crate::models::Task;
use eyre::{Context, Result, eyre};
use std::str::FromStr;

/// A discrete user interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Click on a task
    Toggle(String),
    /// Click on a filter button
    SetFilter(FilterCriterion),
    /// Create a task
    Add(Task),
}

impl FromStr for Event {
    type Err = eyre::Report;

    /// Parse `toggle:<id>`, `filter:<criterion>`, `add:<title>` or `add-id:<id>=<title>`
    ///
    /// The whole argument of `add` is the title, so titles may contain `=` or `:`.
    fn from_str(s: &str) -> Result<Self> {
        let (kind, arg) = s
            .split_once(':')
            .ok_or_else(|| eyre!("Invalid event: {} (expected <kind>:<argument>)", s))?;

        if arg.trim().is_empty() {
            return Err(eyre!("Invalid event: {} (missing argument)", s));
        }

        match kind.trim() {
            "toggle" => Ok(Event::Toggle(arg.trim().to_string())),
            "filter" => {
                let criterion = arg
                    .parse::<FilterCriterion>()
                    .with_context(|| format!("Invalid event: {}", s))?;
                Ok(Event::SetFilter(criterion))
            }
            "add" => Ok(Event::Add(Task::new(arg.trim()))),
            "add-id" => {
                let (id, title) = arg
                    .split_once('=')
                    .ok_or_else(|| eyre!("Invalid event: {} (expected add-id:<id>=<title>)", s))?;
                if id.trim().is_empty() || title.trim().is_empty() {
                    return Err(eyre!("Invalid event: {} (expected add-id:<id>=<title>)", s));
                }
                Ok(Event::Add(Task::with_id(id.trim(), title.trim())))
            }
            other => Err(eyre!(
                "Unknown event kind: {} (expected toggle, filter, add or add-id)",
                other
            )),
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Toggle(id) => write!(f, "toggle:{}", id),
            Event::SetFilter(criterion) => write!(f, "filter:{}", criterion),
            Event::Add(task) => write!(f, "add-id:{}={}", task.id, task.title),
        }
    }
}
