use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::epoch::{Epoch, EpochError, WeekStart, WireEpoch};

/// Repeat-every-N-weeks pattern anchored to a start date.
/// Carried as-is; occurrences are never expanded on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurringSpec {
    pub start_date: NaiveDate,
    pub every_n_weeks: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub cost: Option<i32>,
    pub is_completed: bool,
    pub scheduled_on: Epoch,
    pub recurring: Option<RecurringSpec>,
}

impl Task {
    pub fn is_recurring(&self) -> bool {
        self.recurring.is_some()
    }

    /// Decode the GraphQL selection. Fails only on a malformed epoch date.
    pub fn from_wire(wire: &WireTask, week_start: WeekStart) -> Result<Self, EpochError> {
        Ok(Self {
            id: wire.id,
            title: wire.title.clone(),
            cost: wire.cost,
            is_completed: wire.is_completed,
            scheduled_on: Epoch::from_wire(wire.scheduled_on.as_ref(), week_start)?,
            recurring: wire.recurring.map(RecurringSpec::from),
        })
    }

    pub fn to_wire(&self) -> WireTask {
        WireTask {
            id: self.id,
            title: self.title.clone(),
            cost: self.cost,
            is_completed: self.is_completed,
            scheduled_on: self.scheduled_on.to_wire(),
            recurring: self.recurring.map(WireRecurringSpec::from),
        }
    }

    /// Short id shown in listings (first 8 hex chars).
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

// ---------------------------
// Wire shapes
// ---------------------------

/// GraphQL `Task` as selected by the list query and returned by mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTask {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub cost: Option<i32>,
    pub is_completed: bool,
    #[serde(default)]
    pub scheduled_on: Option<WireEpoch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<WireRecurringSpec>,
}

/// A mutation result: the decoded task plus the object exactly as the
/// server sent it. Cache patches merge only the keys present in `fields`.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    pub task: WireTask,
    pub fields: Map<String, Value>,
}

impl TaskResult {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let task: WireTask = serde_json::from_value(value.clone())?;
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Ok(Self { task, fields })
    }
}

impl From<WireTask> for TaskResult {
    fn from(task: WireTask) -> Self {
        let fields = match serde_json::to_value(&task) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Self { task, fields }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecurringPattern {
    pub every: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRecurringSpec {
    pub start_date: NaiveDate,
    pub pattern: WireRecurringPattern,
}

impl From<WireRecurringSpec> for RecurringSpec {
    fn from(w: WireRecurringSpec) -> Self {
        Self {
            start_date: w.start_date,
            every_n_weeks: w.pattern.every,
        }
    }
}

impl From<RecurringSpec> for WireRecurringSpec {
    fn from(r: RecurringSpec) -> Self {
        Self {
            start_date: r.start_date,
            pattern: WireRecurringPattern {
                every: r.every_n_weeks,
            },
        }
    }
}
