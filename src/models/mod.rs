pub mod epoch;
pub mod input;
pub mod task;
pub mod view;

pub use epoch::{Epoch, EpochKind, WeekStart};
pub use input::{CreateTaskInput, Patch, TaskField, UpdateTaskInput};
pub use task::{RecurringSpec, Task, TaskResult, WireTask};
pub use view::{ViewFilter, ViewType};
