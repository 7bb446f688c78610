//! Task operations against the API with the local cache kept consistent.
//!
//! Every mutation goes through [`TaskService::apply_cache_policy`] after the
//! server answers, then leaves an audit row in the `log` table.

use chrono::NaiveDate;
use rusqlite::Connection;
use uuid::Uuid;

use crate::api::TaskApi;
use crate::cache::policy::{CacheAction, InvalidationPolicy, MutationKind, TASKS_FIELD};
use crate::cache::store::{TaskListCache, cache_key};
use crate::core::planning::Board;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::models::epoch::{Epoch, WeekStart};
use crate::models::input::{CreateTaskInput, Patch, UpdateTaskInput};
use crate::models::task::{Task, TaskResult, WireTask};
use crate::models::view::{ViewFilter, ViewType};

/// Tasks for one view plus where they came from.
#[derive(Debug, Clone)]
pub struct Listing {
    pub tasks: Vec<Task>,
    pub from_cache: bool,
}

pub struct TaskService<'a, A: TaskApi> {
    api: A,
    conn: &'a Connection,
    cache: TaskListCache<'a>,
    policy: InvalidationPolicy,
    week_start: WeekStart,
}

impl<'a, A: TaskApi> TaskService<'a, A> {
    pub fn new(api: A, conn: &'a Connection, policy: InvalidationPolicy, week_start: WeekStart) -> Self {
        Self {
            api,
            conn,
            cache: TaskListCache::new(conn),
            policy,
            week_start,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &TaskListCache<'a> {
        &self.cache
    }

    fn decode(&self, wire: &[WireTask]) -> AppResult<Vec<Task>> {
        wire.iter()
            .map(|w| Task::from_wire(w, self.week_start).map_err(Into::into))
            .collect()
    }

    pub fn list(&self, filter: &ViewFilter, refresh: bool) -> AppResult<Listing> {
        if !refresh && let Some(cached) = self.cache.get(filter)? {
            log::debug!("cache hit {}", cache_key(filter));
            return Ok(Listing {
                tasks: self.decode(&cached)?,
                from_cache: true,
            });
        }

        let fetched = self.api.list_tasks(filter)?;
        let tasks = self.decode(&fetched)?;
        self.cache.put(filter, &fetched)?;
        Ok(Listing {
            tasks,
            from_cache: false,
        })
    }

    /// Planning board of `active`: its PLANNED list grouped by schedule kind.
    pub fn board(&self, active: Epoch, today: NaiveDate, refresh: bool) -> AppResult<Board> {
        let listing = self.list(&ViewFilter::new(ViewType::Planned, active), refresh)?;
        let mut board = Board::build(active, listing.tasks, today, self.week_start);
        board.from_cache = listing.from_cache;
        Ok(board)
    }

    /// Move a task to another epoch. A schedule change, so cached lists are
    /// dropped.
    pub fn reschedule(&self, id: Uuid, to: Epoch) -> AppResult<Task> {
        let mut input = UpdateTaskInput::new(id);
        input.scheduled_on = Patch::Set(to);
        self.update(&input)
    }

    /// Resolve a full id or a unique prefix of a task seen in a cached list.
    pub fn resolve_id(&self, input: &str) -> AppResult<Uuid> {
        self.cache.resolve_id(input)
    }

    pub fn apply_cache_policy(&self, kind: &MutationKind, returned: Option<&TaskResult>) -> AppResult<CacheAction> {
        let action = self.policy.action_for(kind);
        match (action, returned) {
            (CacheAction::InvalidateTaskLists, _) => {
                self.cache.invalidate_field(TASKS_FIELD)?;
            }
            (CacheAction::PatchInPlace, Some(result)) => {
                self.cache.patch_task(result.task.id, &result.fields)?;
            }
            // Nothing to merge without a result.
            (CacheAction::PatchInPlace, None) => {}
        }
        log::debug!("{} -> {:?}", kind.operation(), action);
        Ok(action)
    }

    pub fn create(&self, input: &CreateTaskInput) -> AppResult<Task> {
        let result = self.api.create_task(input)?;
        let kind = MutationKind::CreateTask;
        self.apply_cache_policy(&kind, Some(&result))?;

        let task = Task::from_wire(&result.task, self.week_start)?;
        ttlog(
            self.conn,
            kind.operation(),
            &task.short_id(),
            &format!("Created task '{}' ({})", task.title, task.scheduled_on),
        )?;
        Ok(task)
    }

    pub fn update(&self, input: &UpdateTaskInput) -> AppResult<Task> {
        let result = self.api.update_task(input)?;
        let kind = MutationKind::for_update(input);
        self.apply_cache_policy(&kind, Some(&result))?;

        let task = Task::from_wire(&result.task, self.week_start)?;
        let fields = input
            .touched_fields()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        ttlog(
            self.conn,
            kind.operation(),
            &task.short_id(),
            &format!("Updated {} of '{}'", fields, task.title),
        )?;
        Ok(task)
    }

    /// `Some(date)` marks the task done on that date, `None` reopens it.
    pub fn set_completed(&self, id: Uuid, date: Option<NaiveDate>) -> AppResult<Task> {
        self.update(&UpdateTaskInput::complete(id, date))
    }

    pub fn delete(&self, id: Uuid) -> AppResult<Uuid> {
        let deleted = self.api.delete_task(id)?;
        let kind = MutationKind::DeleteTask;
        self.apply_cache_policy(&kind, None)?;

        let short = deleted.simple().to_string();
        ttlog(self.conn, kind.operation(), &short[..8], "Deleted task")?;
        Ok(deleted)
    }
}
