//! One handler per subcommand, each with the shape
//! `handle(cmd: &Commands, cfg: &Config) -> AppResult<()>`.

pub mod add;
pub mod cache;
pub mod config;
pub mod db;
pub mod del;
pub mod done;
pub mod edit;
pub mod epoch;
pub mod init;
pub mod list;
pub mod log;
pub mod login;
pub mod plan;

use rusqlite::Connection;

use crate::api::{GraphqlApi, HttpTransport};
use crate::auth::TokenStore;
use crate::cache::policy::InvalidationPolicy;
use crate::config::Config;
use crate::core::navigation::ActiveEpoch;
use crate::core::service::TaskService;
use crate::db::initialize::open_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::epoch::Epoch;
use crate::ui::messages::warning;
use crate::utils::date::today;
use crate::utils::path::ensure_parent;

pub type RemoteService<'a> = TaskService<'a, GraphqlApi<HttpTransport>>;

/// Open the configured database, creating it and its schema when missing.
pub fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let path = cfg.database_path();
    ensure_parent(&path)?;
    open_db(&path.to_string_lossy())
}

pub fn active_epoch<'a>(cfg: &Config, conn: &'a Connection) -> ActiveEpoch<'a> {
    ActiveEpoch::new(conn, cfg.week_start, today())
}

/// Epoch named by `--epoch`, or the active one when absent or unreadable.
pub fn selected_epoch(cfg: &Config, conn: &Connection, token: Option<&String>) -> AppResult<Epoch> {
    if let Some(token) = token {
        match Epoch::from_url_token(token, cfg.week_start) {
            Some(e) => return Ok(e),
            None => warning(format!("Unrecognized epoch '{}', using the active one.", token)),
        }
    }
    active_epoch(cfg, conn).load()
}

/// Service bound to the configured endpoint and the stored session token.
pub fn remote_service<'a>(cfg: &Config, conn: &'a Connection) -> AppResult<RemoteService<'a>> {
    let token = TokenStore::new(conn).get()?;
    if token.is_none() {
        ::log::debug!("no session token stored, sending anonymous requests");
    }
    let transport = HttpTransport::new(&cfg.endpoint, token, cfg.request_timeout_secs);
    Ok(TaskService::new(
        GraphqlApi::new(transport),
        conn,
        InvalidationPolicy::new(cfg.invalidate_on_any_update),
        cfg.week_start,
    ))
}
