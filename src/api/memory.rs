use std::cell::{Cell, RefCell};
use uuid::Uuid;

use super::TaskApi;
use crate::errors::{AppError, AppResult};
use crate::models::input::{CreateTaskInput, Patch, UpdateTaskInput};
use crate::models::task::{Task, TaskResult, WireTask};
use crate::models::view::ViewFilter;

/// In-process task store answering the same operations as the server.
#[derive(Default)]
pub struct MemoryApi {
    tasks: RefCell<Vec<Task>>,
    calls: Cell<usize>,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of API calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    fn tick(&self) {
        self.calls.set(self.calls.get() + 1);
    }

    fn not_found(id: Uuid) -> AppError {
        AppError::Graphql(format!("task {} not found", id))
    }
}

impl TaskApi for MemoryApi {
    fn list_tasks(&self, filter: &ViewFilter) -> AppResult<Vec<WireTask>> {
        self.tick();
        Ok(self
            .tasks
            .borrow()
            .iter()
            .filter(|t| filter.matches(&t.scheduled_on))
            .map(Task::to_wire)
            .collect())
    }

    fn create_task(&self, input: &CreateTaskInput) -> AppResult<TaskResult> {
        self.tick();
        let task = Task {
            id: Uuid::new_v4(),
            title: input.title.clone(),
            cost: input.cost,
            is_completed: false,
            scheduled_on: input.scheduled_on,
            recurring: input.recurring,
        };
        let wire = task.to_wire();
        self.tasks.borrow_mut().push(task);
        Ok(wire.into())
    }

    fn update_task(&self, input: &UpdateTaskInput) -> AppResult<TaskResult> {
        self.tick();
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == input.id)
            .ok_or_else(|| Self::not_found(input.id))?;

        if let Patch::Set(title) = &input.title {
            task.title = title.clone();
        }
        if let Patch::Set(cost) = &input.cost {
            task.cost = *cost;
        }
        if let Patch::Set(epoch) = &input.scheduled_on {
            task.scheduled_on = *epoch;
        }
        if let Patch::Set(date) = &input.complete_date {
            task.is_completed = date.is_some();
        }
        Ok(task.to_wire().into())
    }

    fn delete_task(&self, id: Uuid) -> AppResult<Uuid> {
        self.tick();
        let mut tasks = self.tasks.borrow_mut();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(id)
    }
}
