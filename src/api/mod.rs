//! Remote task API.
//!
//! [`TaskApi`] is the seam between the command layer and the server:
//! [`GraphqlApi`] talks to the real backend, [`MemoryApi`] keeps tasks in
//! process for tests.

pub mod graphql;
pub mod memory;
pub mod transport;

use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::input::{CreateTaskInput, UpdateTaskInput};
use crate::models::task::{TaskResult, WireTask};
use crate::models::view::ViewFilter;

pub use graphql::GraphqlApi;
pub use memory::MemoryApi;
pub use transport::{HttpTransport, Transport};

pub trait TaskApi {
    fn list_tasks(&self, filter: &ViewFilter) -> AppResult<Vec<WireTask>>;
    fn create_task(&self, input: &CreateTaskInput) -> AppResult<TaskResult>;
    fn update_task(&self, input: &UpdateTaskInput) -> AppResult<TaskResult>;
    /// Returns the id of the deleted task.
    fn delete_task(&self, id: Uuid) -> AppResult<Uuid>;
}
