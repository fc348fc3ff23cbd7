// Data models for TaskZen

use crate::record::{IndexValue, Record};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A unit of work shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create an open task with a freshly generated id
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            title: title.into(),
            completed: false,
        }
    }

    /// Create an open task with a caller-chosen id
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed: false,
        }
    }
}

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }

    fn indexed_fields(&self) -> HashMap<String, IndexValue> {
        let mut fields = HashMap::new();
        fields.insert("completed".to_string(), IndexValue::Bool(self.completed));
        fields
    }
}

/// The collection every fresh store starts from
pub fn default_seed() -> Vec<Task> {
    vec![Task::with_id("1", "Initial Task")]
}
