//! Read/write consistency policy for the local task-list cache.
//!
//! Cached `tasks` results are only correct while list membership is
//! unchanged. Any mutation that can move a task in or out of some view's
//! filter drops every cached `tasks` field so the next read refetches.
//! Mutations that cannot change membership patch the cached entity in place
//! from the fields the server returned.

use crate::models::input::{TaskField, UpdateTaskInput};
use crate::models::view::ViewFilter;

/// Root query field holding every task list.
pub const TASKS_FIELD: &str = "tasks";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    CreateTask,
    UpdateTask { fields: Vec<TaskField> },
    UpdateCompleteDate,
    DeleteTask,
}

impl MutationKind {
    pub fn for_update(input: &UpdateTaskInput) -> Self {
        if input.only_completion() {
            MutationKind::UpdateCompleteDate
        } else {
            MutationKind::UpdateTask {
                fields: input.touched_fields(),
            }
        }
    }

    /// Operation name used in the audit log.
    pub fn operation(&self) -> &'static str {
        match self {
            MutationKind::CreateTask => "add",
            MutationKind::UpdateTask { .. } => "edit",
            MutationKind::UpdateCompleteDate => "done",
            MutationKind::DeleteTask => "del",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    /// Drop every cached instance of the `tasks` field.
    InvalidateTaskLists,
    /// Merge the mutation result into cached entities with the same id.
    PatchInPlace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvalidationPolicy {
    /// Treat every update as membership-changing.
    pub invalidate_on_any_update: bool,
}

impl InvalidationPolicy {
    pub fn new(invalidate_on_any_update: bool) -> Self {
        Self {
            invalidate_on_any_update,
        }
    }

    pub fn action_for(&self, mutation: &MutationKind) -> CacheAction {
        match mutation {
            MutationKind::CreateTask | MutationKind::DeleteTask => CacheAction::InvalidateTaskLists,
            MutationKind::UpdateTask { .. } if self.invalidate_on_any_update => {
                CacheAction::InvalidateTaskLists
            }
            MutationKind::UpdateTask { fields } => {
                let membership = ViewFilter::membership_fields();
                if fields.iter().any(|f| membership.contains(f)) {
                    CacheAction::InvalidateTaskLists
                } else {
                    CacheAction::PatchInPlace
                }
            }
            MutationKind::UpdateCompleteDate => CacheAction::PatchInPlace,
        }
    }
}
