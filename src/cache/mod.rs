pub mod policy;
pub mod store;

pub use policy::{CacheAction, InvalidationPolicy, MutationKind, TASKS_FIELD};
pub use store::{CacheStats, TaskListCache};
