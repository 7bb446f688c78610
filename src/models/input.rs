//! Mutation inputs.
//!
//! Updates are field-level partial patches: a field is either left alone or
//! set, and nullable fields can be set to `null`. [`Patch`] keeps "not sent"
//! distinct from "sent as null".

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

use super::epoch::Epoch;
use super::task::RecurringSpec;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Unchanged,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Patch::Set(_))
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Set(x) => Patch::Set(x),
            Patch::Unchanged => Patch::Unchanged,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Patch::Set(x) => Patch::Set(f(x)),
            Patch::Unchanged => Patch::Unchanged,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Set(x) => Some(x),
            Patch::Unchanged => None,
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(x: Option<T>) -> Self {
        match x {
            Some(x) => Patch::Set(x),
            None => Patch::Unchanged,
        }
    }
}

/// Only meaningful together with `skip_serializing_if = "Patch::is_unchanged"`.
impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Set(x) => x.serialize(serializer),
            Patch::Unchanged => serializer.serialize_none(),
        }
    }
}

/// Task fields an update can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    Title,
    Cost,
    ScheduledOn,
    CompleteDate,
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskField::Title => "title",
            TaskField::Cost => "cost",
            TaskField::ScheduledOn => "scheduledOn",
            TaskField::CompleteDate => "completeDate",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskInput {
    pub title: String,
    pub cost: Option<i32>,
    pub scheduled_on: Epoch,
    pub recurring: Option<RecurringSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskInput {
    pub id: Uuid,
    pub title: Patch<String>,
    pub cost: Patch<Option<i32>>,
    pub scheduled_on: Patch<Epoch>,
    pub complete_date: Patch<Option<NaiveDate>>,
}

impl UpdateTaskInput {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            title: Patch::Unchanged,
            cost: Patch::Unchanged,
            scheduled_on: Patch::Unchanged,
            complete_date: Patch::Unchanged,
        }
    }

    /// Completion toggle: `Some(date)` completes, `None` reopens.
    pub fn complete(id: Uuid, date: Option<NaiveDate>) -> Self {
        Self {
            complete_date: Patch::Set(date),
            ..Self::new(id)
        }
    }

    pub fn touched_fields(&self) -> Vec<TaskField> {
        let mut out = Vec::new();
        if self.title.is_set() {
            out.push(TaskField::Title);
        }
        if self.cost.is_set() {
            out.push(TaskField::Cost);
        }
        if self.scheduled_on.is_set() {
            out.push(TaskField::ScheduledOn);
        }
        if self.complete_date.is_set() {
            out.push(TaskField::CompleteDate);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.touched_fields().is_empty()
    }

    pub fn only_completion(&self) -> bool {
        self.touched_fields() == [TaskField::CompleteDate]
    }
}
