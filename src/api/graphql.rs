//! GraphQL documents and the remote `TaskApi` implementation.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use uuid::Uuid;

use super::TaskApi;
use super::transport::{GraphqlError, GraphqlRequest, GraphqlResponse, Transport};
use crate::errors::{AppError, AppResult};
use crate::models::epoch::WireEpoch;
use crate::models::input::{CreateTaskInput, Patch, UpdateTaskInput};
use crate::models::task::{TaskResult, WireRecurringSpec, WireTask};
use crate::models::view::ViewFilter;

pub const LIST_TASKS: &str = r#"
query ListTasks($viewType: ViewType!, $epoch: InputEpoch) {
  tasks(filter: { viewFilter: { type: $viewType, epoch: $epoch } }) {
    id
    title
    cost
    isCompleted
    scheduledOn { type date }
    recurring { startDate pattern { every } }
  }
}
"#;

pub const CREATE_TASK: &str = r#"
mutation CreateTask($title: String!, $cost: Int, $scheduledOn: InputEpoch, $recurringSpec: InputRecurringSpec) {
  createTask(input: { title: $title, cost: $cost, scheduledOn: $scheduledOn, recurringSpec: $recurringSpec }) {
    id
    title
    cost
    isCompleted
    scheduledOn { type date }
    recurring { startDate pattern { every } }
  }
}
"#;

pub const UPDATE_TASK: &str = r#"
mutation UpdateTask($input: UpdateTaskInput!) {
  updateTask(input: $input) {
    id
    title
    cost
    isCompleted
    scheduledOn { type date }
    recurring { startDate pattern { every } }
  }
}
"#;

pub const UPDATE_TASK_COMPLETE_DATE: &str = r#"
mutation UpdateTaskCompleteDate($id: UUID!, $completeDate: NaiveDate) {
  updateTask(input: { id: $id, completeDate: $completeDate }) {
    id
    title
    cost
    isCompleted
    scheduledOn { type date }
    recurring { startDate pattern { every } }
  }
}
"#;

pub const DELETE_TASK: &str = r#"
mutation DeleteTask($id: UUID!) {
  deleteTask(id: $id)
}
"#;

/// `UpdateTaskInput` as sent on the wire: unchanged fields are omitted,
/// cleared fields are sent as `null`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireUpdateInput<'a> {
    id: Uuid,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    title: Patch<&'a String>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    cost: Patch<Option<i32>>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    scheduled_on: Patch<Option<WireEpoch>>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    complete_date: Patch<Option<chrono::NaiveDate>>,
}

impl<'a> From<&'a UpdateTaskInput> for WireUpdateInput<'a> {
    fn from(input: &'a UpdateTaskInput) -> Self {
        Self {
            id: input.id,
            title: input.title.as_ref(),
            cost: input.cost.clone(),
            scheduled_on: input.scheduled_on.clone().map(|e| e.to_wire()),
            complete_date: input.complete_date.clone(),
        }
    }
}

pub fn list_variables(filter: &ViewFilter) -> Value {
    json!({
        "viewType": filter.view_type,
        "epoch": filter.epoch.to_wire(),
    })
}

pub fn create_variables(input: &CreateTaskInput) -> Value {
    json!({
        "title": input.title,
        "cost": input.cost,
        "scheduledOn": input.scheduled_on.to_wire(),
        "recurringSpec": input.recurring.map(WireRecurringSpec::from),
    })
}

pub fn update_variables(input: &UpdateTaskInput) -> AppResult<(&'static str, &'static str, Value)> {
    if input.only_completion() {
        let date = input.complete_date.clone().into_option().flatten();
        return Ok((
            "UpdateTaskCompleteDate",
            UPDATE_TASK_COMPLETE_DATE,
            json!({ "id": input.id, "completeDate": date }),
        ));
    }
    let wire = serde_json::to_value(WireUpdateInput::from(input))?;
    Ok(("UpdateTask", UPDATE_TASK, json!({ "input": wire })))
}

fn map_errors(errors: &[GraphqlError]) -> AppError {
    if errors
        .iter()
        .any(|e| matches!(e.code(), Some("UNAUTHORIZED") | Some("FORBIDDEN")))
    {
        return AppError::Unauthorized;
    }
    let joined = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    AppError::Graphql(joined)
}

/// Pull `data.<field>` out of a response, surfacing GraphQL errors first.
pub fn extract<T: DeserializeOwned>(resp: GraphqlResponse, field: &str) -> AppResult<T> {
    if !resp.errors.is_empty() {
        return Err(map_errors(&resp.errors));
    }
    let value = resp
        .data
        .and_then(|mut d| d.get_mut(field).map(Value::take))
        .ok_or_else(|| AppError::Graphql(format!("response has no '{}' field", field)))?;
    Ok(serde_json::from_value(value)?)
}

pub struct GraphqlApi<T: Transport> {
    transport: T,
}

impl<T: Transport> GraphqlApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    fn call<R: DeserializeOwned>(
        &self,
        operation_name: &'static str,
        query: &'static str,
        variables: Value,
        field: &str,
    ) -> AppResult<R> {
        let request = GraphqlRequest {
            query,
            operation_name,
            variables,
        };
        let resp = self.transport.execute(&request)?;
        extract(resp, field)
    }
}

impl<T: Transport> TaskApi for GraphqlApi<T> {
    fn list_tasks(&self, filter: &ViewFilter) -> AppResult<Vec<WireTask>> {
        self.call("ListTasks", LIST_TASKS, list_variables(filter), "tasks")
    }

    fn create_task(&self, input: &CreateTaskInput) -> AppResult<TaskResult> {
        let raw: Value = self.call("CreateTask", CREATE_TASK, create_variables(input), "createTask")?;
        Ok(TaskResult::from_value(raw)?)
    }

    fn update_task(&self, input: &UpdateTaskInput) -> AppResult<TaskResult> {
        let (name, doc, vars) = update_variables(input)?;
        let raw: Value = self.call(name, doc, vars, "updateTask")?;
        Ok(TaskResult::from_value(raw)?)
    }

    fn delete_task(&self, id: Uuid) -> AppResult<Uuid> {
        self.call("DeleteTask", DELETE_TASK, json!({ "id": id }), "deleteTask")
    }
}
