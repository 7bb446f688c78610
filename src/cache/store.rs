//! Normalized query cache kept in the `query_cache` table.
//!
//! One row per cached root-field instance: `(field, args)` identifies it
//! and `payload` holds the JSON result. Task lists live under the `tasks`
//! field with args `VIEW,epoch-token`.

use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::policy::TASKS_FIELD;
use crate::errors::{AppError, AppResult};
use crate::models::task::WireTask;
use crate::models::view::ViewFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub tasks: usize,
    pub keys: Vec<String>,
}

pub struct TaskListCache<'a> {
    conn: &'a Connection,
}

pub fn args_for(filter: &ViewFilter) -> String {
    format!("{},{}", filter.view_type.as_str(), filter.epoch.to_url_token())
}

/// Display form of a cache key, e.g. `tasks(SCHEDULED,WEEK.2024-04-29)`.
pub fn cache_key(filter: &ViewFilter) -> String {
    format!("{}({})", TASKS_FIELD, args_for(filter))
}

impl<'a> TaskListCache<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, filter: &ViewFilter) -> AppResult<Option<Vec<WireTask>>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM query_cache WHERE field = ?1 AND args = ?2",
                params![TASKS_FIELD, args_for(filter)],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(p) => Ok(Some(serde_json::from_str(&p)?)),
            None => Ok(None),
        }
    }

    pub fn put(&self, filter: &ViewFilter, tasks: &[WireTask]) -> AppResult<()> {
        let payload = serde_json::to_string(tasks)?;
        self.conn.execute(
            "INSERT INTO query_cache (field, args, payload, fetched_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(field, args) DO UPDATE SET
                payload = excluded.payload,
                fetched_at = excluded.fetched_at",
            params![TASKS_FIELD, args_for(filter), payload, Local::now().to_rfc3339()],
        )?;
        log::debug!("cache put {} ({} tasks)", cache_key(filter), tasks.len());
        Ok(())
    }

    /// Every cached argument set of `field`.
    pub fn instances(&self, field: &str) -> AppResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT args FROM query_cache WHERE field = ?1 ORDER BY args")?;
        let rows = stmt.query_map([field], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Drop every cached instance of `field`, whatever its arguments.
    /// Returns the number of instances removed.
    pub fn invalidate_field(&self, field: &str) -> AppResult<usize> {
        let instances = self.instances(field)?;
        let mut removed = 0;
        for args in &instances {
            removed += self.conn.execute(
                "DELETE FROM query_cache WHERE field = ?1 AND args = ?2",
                params![field, args],
            )?;
        }
        log::debug!("cache invalidated {} instance(s) of {}", removed, field);
        Ok(removed)
    }

    /// Merge the keys the server returned into every cached list entry with
    /// id `id`. Keys missing from `fields` keep their cached values.
    /// Returns how many entries were touched.
    pub fn patch_task(&self, id: Uuid, fields: &Map<String, Value>) -> AppResult<usize> {
        let id = Value::String(id.to_string());

        let mut stmt = self
            .conn
            .prepare("SELECT args, payload FROM query_cache WHERE field = ?1")?;
        let rows: Vec<(String, String)> = stmt
            .query_map([TASKS_FIELD], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<_, _>>()?;

        let mut touched = 0;
        for (args, payload) in rows {
            let mut list: Vec<Value> = serde_json::from_str(&payload)?;
            let mut changed = false;

            for entry in list.iter_mut() {
                let Value::Object(obj) = entry else { continue };
                if obj.get("id") != Some(&id) {
                    continue;
                }
                for (k, v) in fields {
                    obj.insert(k.clone(), v.clone());
                }
                changed = true;
                touched += 1;
            }

            if changed {
                self.conn.execute(
                    "UPDATE query_cache SET payload = ?1 WHERE field = ?2 AND args = ?3",
                    params![serde_json::to_string(&list)?, TASKS_FIELD, args],
                )?;
            }
        }
        Ok(touched)
    }

    /// Resolve a full id or a unique prefix against every cached list.
    pub fn resolve_id(&self, input: &str) -> AppResult<Uuid> {
        if let Ok(id) = Uuid::parse_str(input) {
            return Ok(id);
        }

        let needle = input.trim().to_lowercase().replace('-', "");
        if needle.is_empty() {
            return Err(AppError::TaskNotFound(input.to_string()));
        }

        let mut found: Vec<Uuid> = Vec::new();
        for args in self.instances(TASKS_FIELD)? {
            let payload: String = self.conn.query_row(
                "SELECT payload FROM query_cache WHERE field = ?1 AND args = ?2",
                params![TASKS_FIELD, args],
                |row| row.get(0),
            )?;
            let list: Vec<WireTask> = serde_json::from_str(&payload)?;
            for t in list {
                if t.id.simple().to_string().starts_with(&needle) && !found.contains(&t.id) {
                    found.push(t.id);
                }
            }
        }

        match found.as_slice() {
            [one] => Ok(*one),
            [] => Err(AppError::TaskNotFound(input.to_string())),
            _ => Err(AppError::AmbiguousTaskId(input.to_string())),
        }
    }

    pub fn clear(&self) -> AppResult<usize> {
        Ok(self.conn.execute("DELETE FROM query_cache", [])?)
    }

    pub fn stats(&self) -> AppResult<CacheStats> {
        let entries: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM query_cache", [], |row| row.get(0))?;
        let keys = self
            .instances(TASKS_FIELD)?
            .into_iter()
            .map(|a| format!("{}({})", TASKS_FIELD, a))
            .collect::<Vec<_>>();

        let mut tasks = 0;
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM query_cache WHERE field = ?1")?;
        let rows = stmt.query_map([TASKS_FIELD], |row| row.get::<_, String>(0))?;
        for r in rows {
            let list: Vec<Value> = serde_json::from_str(&r?)?;
            tasks += list.len();
        }

        Ok(CacheStats {
            entries: entries as usize,
            tasks,
            keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::open_in_memory;
    use crate::models::epoch::{Epoch, WeekStart};
    use crate::models::task::TaskResult;
    use crate::models::view::ViewType;
    use chrono::NaiveDate;

    fn task(n: u128, title: &str) -> WireTask {
        WireTask {
            id: Uuid::from_u128(n),
            title: title.into(),
            cost: None,
            is_completed: false,
            scheduled_on: None,
            recurring: None,
        }
    }

    fn week_filter(view: ViewType) -> ViewFilter {
        let d = NaiveDate::from_ymd_opt(2024, 4, 29).unwrap();
        ViewFilter::new(view, Epoch::of_week(d, WeekStart::Monday))
    }

    #[test]
    fn key_format() {
        assert_eq!(
            cache_key(&week_filter(ViewType::Scheduled)),
            "tasks(SCHEDULED,WEEK.2024-04-29)"
        );
    }

    #[test]
    fn put_get_and_invalidate_all_instances() {
        let pool = open_in_memory().unwrap();
        let cache = TaskListCache::new(&pool.conn);
        let a = week_filter(ViewType::Scheduled);
        let b = week_filter(ViewType::Planned);

        assert_eq!(cache.get(&a).unwrap(), None);
        cache.put(&a, &[task(1, "one")]).unwrap();
        cache.put(&b, &[]).unwrap();
        assert_eq!(cache.get(&a).unwrap().unwrap().len(), 1);
        assert_eq!(cache.get(&b).unwrap(), Some(vec![]));

        assert_eq!(cache.invalidate_field(TASKS_FIELD).unwrap(), 2);
        assert_eq!(cache.get(&a).unwrap(), None);
        assert_eq!(cache.get(&b).unwrap(), None);
    }

    #[test]
    fn patch_updates_every_list_holding_the_task() {
        let pool = open_in_memory().unwrap();
        let cache = TaskListCache::new(&pool.conn);
        let a = week_filter(ViewType::Scheduled);
        let all = ViewFilter::new(ViewType::Scheduled, Epoch::AllTime);
        cache.put(&a, &[task(1, "one"), task(2, "two")]).unwrap();
        cache.put(&all, &[task(1, "one")]).unwrap();

        let mut done = task(1, "one");
        done.is_completed = true;
        let done = TaskResult::from(done);
        assert_eq!(cache.patch_task(done.task.id, &done.fields).unwrap(), 2);

        let listed = cache.get(&a).unwrap().unwrap();
        assert!(listed[0].is_completed);
        assert!(!listed[1].is_completed);
        assert!(cache.get(&all).unwrap().unwrap()[0].is_completed);
    }

    #[test]
    fn partial_result_keeps_fields_it_does_not_carry() {
        let pool = open_in_memory().unwrap();
        let cache = TaskListCache::new(&pool.conn);
        let a = week_filter(ViewType::Scheduled);

        let mut cached = task(1, "one");
        cached.cost = Some(5);
        cached.scheduled_on = Epoch::of_date(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()).to_wire();
        cache.put(&a, &[cached.clone()]).unwrap();

        let partial = TaskResult::from_value(serde_json::json!({
            "id": Uuid::from_u128(1),
            "title": "x",
            "isCompleted": true
        }))
        .unwrap();
        assert_eq!(cache.patch_task(partial.task.id, &partial.fields).unwrap(), 1);

        let after = &cache.get(&a).unwrap().unwrap()[0];
        assert_eq!(after.title, "x");
        assert!(after.is_completed);
        assert_eq!(after.cost, Some(5));
        assert_eq!(after.scheduled_on, cached.scheduled_on);
    }

    #[test]
    fn resolve_id_by_prefix() {
        let pool = open_in_memory().unwrap();
        let cache = TaskListCache::new(&pool.conn);
        let a = week_filter(ViewType::Scheduled);
        let x = Uuid::parse_str("aaaa1111-0000-0000-0000-000000000000").unwrap();
        let y = Uuid::parse_str("aaaa2222-0000-0000-0000-000000000000").unwrap();
        let mut tx = task(0, "x");
        tx.id = x;
        let mut ty = task(0, "y");
        ty.id = y;
        cache.put(&a, &[tx, ty]).unwrap();

        assert_eq!(cache.resolve_id("aaaa1").unwrap(), x);
        assert_eq!(cache.resolve_id(&y.to_string()).unwrap(), y);
        assert!(matches!(cache.resolve_id("aaaa"), Err(AppError::AmbiguousTaskId(_))));
        assert!(matches!(cache.resolve_id("ffff"), Err(AppError::TaskNotFound(_))));
    }

    #[test]
    fn stats_count_entries_and_tasks() {
        let pool = open_in_memory().unwrap();
        let cache = TaskListCache::new(&pool.conn);
        cache.put(&week_filter(ViewType::Scheduled), &[task(1, "a"), task(2, "b")]).unwrap();
        let s = cache.stats().unwrap();
        assert_eq!(s.entries, 1);
        assert_eq!(s.tasks, 2);
        assert_eq!(s.keys, vec!["tasks(SCHEDULED,WEEK.2024-04-29)".to_string()]);
        assert_eq!(cache.clear().unwrap(), 1);
    }
}
