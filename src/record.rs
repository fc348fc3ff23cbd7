// Record trait for anything the task store can hold

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Core trait that any stored record must implement
pub trait Record: Serialize + for<'de> Deserialize<'de> + Clone + 'static {
    /// Unique identifier for this record within its collection
    fn id(&self) -> &str;

    /// Fields that filter predicates can match against
    /// Return empty HashMap if the record exposes nothing to filter on
    fn indexed_fields(&self) -> HashMap<String, IndexValue> {
        HashMap::new()
    }
}

/// Value types that can be indexed for filtering
#[derive(Debug, Clone, PartialEq)]
pub enum IndexValue {
    Bool(bool),
}

impl std::fmt::Display for IndexValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexValue::Bool(b) => write!(f, "{}", b),
        }
    }
}
