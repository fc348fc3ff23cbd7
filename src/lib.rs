// TaskZen - Task list state with filtered views

pub mod context;
pub mod events;
pub mod filter;
pub mod models;
pub mod record;
pub mod render;
pub mod seed;
pub mod store;
pub mod subscribe;
pub mod view;

// Re-export main types for convenience
pub use context::{TaskContext, TaskContextBuilder};
pub use events::Event;
pub use filter::{Filter, FilterCriterion, FilterOp, visible_tasks};
pub use models::{Task, default_seed};
pub use record::{IndexValue, Record};
pub use render::ErrorBoundary;
pub use store::TaskStore;
pub use subscribe::SubscriptionId;
pub use view::FilterView;
